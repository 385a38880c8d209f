mod settings;

pub use settings::{BackendCommand, Config};
