pub mod fields;
pub mod flow;
pub mod record;

pub use flow::{FlowController, InfoFields, Screen};
pub use record::{CheckinRecord, ConsentChoice, Role};
