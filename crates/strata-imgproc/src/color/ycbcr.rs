use crate::pixels;
use strata_image::{Image, ImageError};

/// Number of leading channels read by the conversions.
const REQUIRED_CHANNELS: usize = 3;

/// How a converted floating point component is narrowed to an 8-bit sample.
///
/// Both modes saturate to `[0, 255]` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantization {
    /// Drop the fractional part.
    Truncate,
    /// Round to the nearest integer, ties to even.
    #[default]
    NearestEven,
}

impl Quantization {
    /// Narrow a component to an 8-bit sample.
    #[inline]
    pub fn quantize(self, value: f32) -> u8 {
        let value = match self {
            Quantization::Truncate => value,
            Quantization::NearestEven => value.round_ties_even(),
        };
        value.clamp(0.0, 255.0) as u8
    }
}

fn check_shapes<const C: usize>(src: &Image<u8, C>, dst: &Image<u8, 3>) -> Result<(), ImageError> {
    if C < REQUIRED_CHANNELS {
        return Err(ImageError::NotEnoughChannels(C, REQUIRED_CHANNELS));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    Ok(())
}

/// Convert an RGB image to a YCbCr image.
///
/// The first three channels of the input are read as R, G, B in the range [0, 255]; any
/// further channel is ignored.
///
/// # Arguments
///
/// * `src` - The input RGB image with at least 3 channels.
/// * `dst` - The output image, written in the channel order Y, Cr, Cb.
/// * `quantization` - How components are narrowed to 8 bits.
///
/// The transform is
///
/// * Y  = 0.2989 R + 0.5866 G + 0.1145 B
/// * Cr = 0.713 (R - Y) + 128
/// * Cb = 0.564 (B - Y) + 128
///
/// # Errors
///
/// * [`ImageError::NotEnoughChannels`] if the input has fewer than 3 channels.
/// * [`ImageError::InvalidImageSize`] if the images differ in size.
///
/// # Example
///
/// ```
/// use strata_image::{Image, ImageSize};
/// use strata_imgproc::color::{ycbcr_from_rgb, Quantization};
///
/// let rgb = Image::<u8, 3>::new(ImageSize { width: 1, height: 1 }, vec![10, 200, 30]).unwrap();
/// let mut ycbcr = Image::<u8, 3>::from_size_val(rgb.size(), 0).unwrap();
///
/// ycbcr_from_rgb(&rgb, &mut ycbcr, Quantization::Truncate).unwrap();
///
/// assert_eq!(ycbcr.as_slice(), &[123, 46, 75]);
/// ```
pub fn ycbcr_from_rgb<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, 3>,
    quantization: Quantization,
) -> Result<(), ImageError> {
    check_shapes(src, dst)?;

    pixels::iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f32;
        let g = src_pixel[1] as f32;
        let b = src_pixel[2] as f32;

        let y = 0.2989 * r + 0.5866 * g + 0.1145 * b;
        let cr = (r - y) * 0.713 + 128.0;
        let cb = (b - y) * 0.564 + 128.0;

        dst_pixel[0] = quantization.quantize(y);
        dst_pixel[1] = quantization.quantize(cr);
        dst_pixel[2] = quantization.quantize(cb);
    });

    Ok(())
}

/// Convert a YCbCr image to an RGB image.
///
/// The first three channels of the input are read in the order Y, Cr, Cb, as produced by
/// [`ycbcr_from_rgb`].
///
/// # Arguments
///
/// * `src` - The input YCbCr image with at least 3 channels.
/// * `dst` - The output RGB image.
/// * `quantization` - How components are narrowed to 8 bits.
///
/// Each component is clamped to [0, 255] before narrowing:
///
/// * R = Y + 1.403 (Cr - 128)
/// * G = Y - 0.3456 (Cb - 128) - 0.7145 (Cr - 128)
/// * B = Y + 1.773 (Cb - 128)
///
/// # Errors
///
/// * [`ImageError::NotEnoughChannels`] if the input has fewer than 3 channels.
/// * [`ImageError::InvalidImageSize`] if the images differ in size.
pub fn rgb_from_ycbcr<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, 3>,
    quantization: Quantization,
) -> Result<(), ImageError> {
    check_shapes(src, dst)?;

    pixels::iter_rows(src, dst, |src_pixel, dst_pixel| {
        let y = src_pixel[0] as f32;
        let cr = src_pixel[1] as f32 - 128.0;
        let cb = src_pixel[2] as f32 - 128.0;

        let r = (y + 1.403 * cr).clamp(0.0, 255.0);
        let g = (y - 0.3456 * cb - 0.7145 * cr).clamp(0.0, 255.0);
        let b = (y + 1.773 * cb).clamp(0.0, 255.0);

        dst_pixel[0] = quantization.quantize(r);
        dst_pixel[1] = quantization.quantize(g);
        dst_pixel[2] = quantization.quantize(b);
    });

    Ok(())
}
