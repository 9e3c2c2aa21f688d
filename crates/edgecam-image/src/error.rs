/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image has a zero dimension.
    #[error("Image size must be non-zero, got {0}x{1}")]
    EmptyImage(usize, usize),

    /// Error when two images were expected to have the same size.
    #[error("Image size mismatch ({0}x{1}) vs ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the row stride is smaller than the row width.
    #[error("Row stride ({0}) must be at least the row width ({1})")]
    InvalidRowStride(usize, usize),

    /// Error when the source buffer cannot hold the declared layout.
    #[error("Source buffer length ({0}) is smaller than the required length ({1})")]
    InsufficientSourceLength(usize, usize),

    /// Error when the destination buffer is smaller than width * height.
    #[error("Output buffer capacity ({0}) is smaller than the image area ({1})")]
    InsufficientOutputCapacity(usize, usize),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),
}
