use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("pixel intensity {value} exceeds declared maximum {max}")]
    IntensityOutOfRange { value: u16, max: u16 },

    #[error("target level count must be between 1 and {max}, got {got}")]
    InvalidLevelCount { got: usize, max: usize },

    #[error("histogram must contain at least one bin")]
    EmptyHistogram,

    #[error("failed to allocate partition scratch tables")]
    Allocation,
}
