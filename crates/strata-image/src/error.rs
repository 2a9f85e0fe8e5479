/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must agree in size do not.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the image has fewer channels than an operation needs.
    #[error("Not enough channels: got {0}, at least {1} required")]
    NotEnoughChannels(usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds for an image with {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel ({0}, {1}) is out of bounds for an image of {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a row range does not fit inside the image.
    #[error("Row range {0}..{1} is out of bounds for an image with {2} rows")]
    RowRangeOutOfBounds(usize, usize, usize),

    /// Error when a packed layout code does not describe a known sample layout.
    #[error("Invalid sample layout code {0} for {1} channels")]
    InvalidLayoutCode(u64, u64),
}
