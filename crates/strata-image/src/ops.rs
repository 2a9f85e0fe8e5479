use crate::{Image, ImageError};

/// Merge single-channel images into one interleaved image.
///
/// # Arguments
///
/// * `channels` - One image per output channel, all of the same size.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the planes do not share a size.
///
/// Example:
///
/// ```
/// use strata_image::{Image, ImageSize};
/// use strata_image::ops::merge_channels;
///
/// let size = ImageSize { width: 2, height: 1 };
/// let a = Image::<u8, 1>::new(size, vec![1, 2]).unwrap();
/// let b = Image::<u8, 1>::new(size, vec![3, 4]).unwrap();
///
/// let merged = merge_channels(&[a, b]).unwrap();
/// assert_eq!(merged.as_slice(), &[1, 3, 2, 4]);
/// ```
pub fn merge_channels<T, const C: usize>(
    channels: &[Image<T, 1>; C],
) -> Result<Image<T, C>, ImageError>
where
    T: Clone + Default,
{
    let Some(first) = channels.first() else {
        return Image::new(Default::default(), Vec::new());
    };
    let size = first.size();

    if let Some(bad) = channels.iter().find(|ch| ch.size() != size) {
        return Err(ImageError::InvalidImageSize(
            bad.width(),
            bad.height(),
            size.width,
            size.height,
        ));
    }

    let mut data = vec![T::default(); size.width * size.height * C];
    for (c, plane) in channels.iter().enumerate() {
        data.chunks_exact_mut(C)
            .zip(plane.as_slice().iter())
            .for_each(|(pixel, v)| pixel[c] = v.clone());
    }

    Image::new(size, data)
}
