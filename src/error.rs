use thiserror::Error;

/// Error type for blur operations.
///
/// Every variant is detected before or during a single `blur` call; no
/// failure is retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The blur radius is negative (or NaN)
    ///
    /// Detected during validation, before any pixel work begins.
    #[error("Blur radius must be non-negative, got {0}")]
    NegativeRadius(f32),

    /// Source and destination dimensions do not match
    ///
    /// Blurring never resizes; callers that need a differently-sized
    /// destination must rescale before calling `blur`.
    #[error("Source and destination dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Source dimensions (width, height)
        expected: (u32, u32),
        /// Destination dimensions (width, height)
        actual: (u32, u32),
    },

    /// Pixel data length does not match the stated dimensions
    #[error("Pixel data length {actual} does not match {width}x{height}")]
    InvalidLength {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// The worker thread pool could not be constructed
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    /// A parallel line task panicked
    ///
    /// The whole call fails and the destination buffer is left in an
    /// unspecified, possibly partially blurred state.
    #[error("A blur worker panicked; destination contents are unspecified")]
    WorkerPanicked,
}
