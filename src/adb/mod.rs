pub mod bridge;
pub mod device;
pub mod discovery;
pub mod parsers;
pub mod shell;
pub mod types;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdbError {
    #[error("adb not found in PATH")]
    AdbNotFound,

    #[error("Failed to execute {command}: {source}")]
    ExecutionFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command timed out: {command}")]
    Timeout { command: String },

    #[error("Device returned an error: {0}")]
    DeviceError(String),
}
