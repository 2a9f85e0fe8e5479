use crate::{error::ImageError, image::Image, ImageSize};

/// Element type of a single sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleDepth {
    /// 8-bit unsigned samples.
    U8 = 0,
}

/// Number of low bits of the layout code reserved for the sample depth.
const DEPTH_BITS: u64 = 3;

/// Fixed-size description of an image.
///
/// The root participant fills it from the image it owns and broadcasts it, so that every other
/// participant can allocate correctly sized buffers before any pixel data moves.
///
/// # Examples
///
/// ```
/// use strata_image::{Image, ImageMetadata, ImageSize};
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 4, height: 2 }, 0).unwrap();
/// let meta = ImageMetadata::from_image(&image);
///
/// assert_eq!(meta.rows, 2);
/// assert_eq!(meta.cols, 4);
/// assert_eq!(meta.channels, 3);
/// assert_eq!(ImageMetadata::from_words(meta.to_words()).unwrap(), meta);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Number of rows (image height).
    pub rows: usize,
    /// Number of columns (image width).
    pub cols: usize,
    /// Packed sample layout: depth in the low bits, `channels - 1` above.
    pub layout_code: u64,
    /// Number of interleaved channels.
    pub channels: usize,
}

impl ImageMetadata {
    /// Number of 64-bit words used by [`ImageMetadata::to_words`].
    pub const WORDS: usize = 4;

    /// Describe an image with the given geometry and 8-bit samples.
    pub fn new(rows: usize, cols: usize, channels: usize) -> Self {
        Self {
            rows,
            cols,
            layout_code: Self::layout_code_for(SampleDepth::U8, channels),
            channels,
        }
    }

    /// Describe an existing 8-bit image.
    pub fn from_image<const C: usize>(image: &Image<u8, C>) -> Self {
        Self::new(image.rows(), image.cols(), C)
    }

    /// Compute the packed layout code for a depth and channel count.
    pub fn layout_code_for(depth: SampleDepth, channels: usize) -> u64 {
        (depth as u64) | ((channels.saturating_sub(1) as u64) << DEPTH_BITS)
    }

    /// The image size described by this record.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.cols,
            height: self.rows,
        }
    }

    /// Total number of samples, `rows * cols * channels`.
    pub fn num_samples(&self) -> usize {
        self.rows * self.cols * self.channels
    }

    /// Encode the record as a fixed-size array, ready for a broadcast.
    pub fn to_words(&self) -> [u64; Self::WORDS] {
        [
            self.rows as u64,
            self.cols as u64,
            self.layout_code,
            self.channels as u64,
        ]
    }

    /// Decode a record previously produced by [`ImageMetadata::to_words`].
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidLayoutCode`] if the layout code does not agree with the
    /// channel count or names an unknown sample depth.
    pub fn from_words(words: [u64; Self::WORDS]) -> Result<Self, ImageError> {
        let [rows, cols, layout_code, channels] = words;
        let expected = Self::layout_code_for(SampleDepth::U8, channels as usize);
        if channels == 0 || layout_code != expected {
            return Err(ImageError::InvalidLayoutCode(layout_code, channels));
        }

        Ok(Self {
            rows: rows as usize,
            cols: cols as usize,
            layout_code,
            channels: channels as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_code_packs_channels() {
        assert_eq!(ImageMetadata::layout_code_for(SampleDepth::U8, 1), 0);
        assert_eq!(ImageMetadata::layout_code_for(SampleDepth::U8, 3), 16);
        assert_eq!(ImageMetadata::layout_code_for(SampleDepth::U8, 4), 24);
    }

    #[test]
    fn words_round_trip() -> Result<(), ImageError> {
        let meta = ImageMetadata::new(480, 640, 3);
        assert_eq!(meta.to_words(), [480, 640, 16, 3]);
        assert_eq!(ImageMetadata::from_words(meta.to_words())?, meta);
        assert_eq!(meta.num_samples(), 480 * 640 * 3);
        Ok(())
    }

    #[test]
    fn words_reject_inconsistent_layout() {
        assert_eq!(
            ImageMetadata::from_words([10, 10, 0, 3]),
            Err(ImageError::InvalidLayoutCode(0, 3))
        );
        assert_eq!(
            ImageMetadata::from_words([0, 0, 0, 0]),
            Err(ImageError::InvalidLayoutCode(0, 0))
        );
    }
}
