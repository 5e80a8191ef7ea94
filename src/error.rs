use alloc::string::String;

/// Errors from DIB header parsing and pixel unpacking.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DibError {
    #[error("truncated buffer: need {needed} bytes, got {actual}")]
    TruncatedBuffer { needed: usize, actual: usize },

    #[error(
        "dimension mismatch: header declares {}x{}, target is {}x{}",
        expected.0, expected.1, actual.0, actual.1
    )]
    DimensionMismatch {
        /// Dimensions declared by the header (width, |height|).
        expected: (i64, i64),
        /// Dimensions of the target image.
        actual: (i64, i64),
    },

    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    #[error("unimplemented format: {0}")]
    UnimplementedFormat(String),

    #[error("unsupported compression: {0}")]
    UnsupportedCompression(u32),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: i32, height: i32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}
