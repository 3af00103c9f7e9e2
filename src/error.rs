// Crate-wide error type. Window errors are the only fatal class; asset
// errors are always recovered by the caller with a fallback substitute.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed.
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the window failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// Reading or decoding the logo image failed.
    #[error("image load error: {0}")]
    ImageLoad(String),

    /// Reading or parsing the banner font failed.
    #[error("font load error: {0}")]
    FontLoad(String),
}
