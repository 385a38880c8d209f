pub mod backend;
pub mod checkin;
pub mod config;
pub mod ui;
pub mod util;

pub use backend::{Ack, MockBackend, ProcessBackend, SubmissionError, SubmitBackend};
pub use checkin::{CheckinRecord, ConsentChoice, FlowController, InfoFields, Role, Screen};
pub use config::{BackendCommand, Config};
pub use ui::App;
