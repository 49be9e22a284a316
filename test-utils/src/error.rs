use thiserror::Error;

/// Errors that can occur while inspecting a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// The mock server was started without request recording.
    #[error("Request recording is disabled on the mock server")]
    RecordingDisabled,
}
