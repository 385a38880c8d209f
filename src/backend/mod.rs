pub mod error;
pub mod gateway;
pub mod mock;
pub mod protocol;

pub use error::SubmissionError;
pub use gateway::{ProcessBackend, SubmitBackend};
pub use mock::MockBackend;
pub use protocol::{Ack, BackendReply, CheckinRequest};
