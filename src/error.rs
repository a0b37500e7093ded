use thiserror::Error;

/// Errors surfaced to the host by the drawing surface.
///
/// Ignorable input (a move before any down, an up with nothing drawn) is never
/// an error; the gesture machine reports it as
/// [`GestureOutcome::Ignored`](crate::input::GestureOutcome::Ignored).
#[derive(Error, Debug)]
pub enum CanvasError {
    /// The supplied background could not be decoded. The previous background is kept.
    #[error("Failed to decode background image: {0}")]
    BackgroundDecode(#[source] image::ImageError),

    /// Rendering was requested into a buffer that cannot hold any pixels.
    #[error("Invalid surface size {width}x{height}")]
    InvalidSurfaceSize { width: u32, height: u32 },

    #[error("Invalid canvas configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding an exported frame failed (host side).
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

pub type CanvasResult<T> = Result<T, CanvasError>;
