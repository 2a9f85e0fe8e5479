use std::path::Path;

use strata_image::{Image, ImageSize};

use crate::error::IoError;

/// An 8-bit image with the channel layout found in the file.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit grayscale image with alpha channel
    La8(Image<u8, 2>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
}

impl GenericImage {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::L8(img) => img.size(),
            GenericImage::La8(img) => img.size(),
            GenericImage::Rgb8(img) => img.size(),
            GenericImage::Rgba8(img) => img.size(),
        }
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::L8(_) => 1,
            GenericImage::La8(_) => 2,
            GenericImage::Rgb8(_) => 3,
            GenericImage::Rgba8(_) => 4,
        }
    }
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate. Samples deeper
/// than 8 bits are narrowed to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] if there is no file at `file_path`.
/// * [`IoError::ImageCodecError`] if the file cannot be decoded.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let color = img.color();
    log::debug!("read {} ({color:?}, {size})", file_path.display());

    let image = match (color.channel_count(), color.has_alpha()) {
        (1, _) => GenericImage::L8(Image::new(size, img.into_luma8().into_raw())?),
        (2, _) => GenericImage::La8(Image::new(size, img.into_luma_alpha8().into_raw())?),
        (_, false) => GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
        (_, true) => GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?),
    };

    Ok(image)
}

/// Writes an 8-bit image to the given file path.
///
/// The format is chosen from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to the output file.
/// * `image` - An image with 1, 2, 3 or 4 channels.
///
/// # Errors
///
/// * [`IoError::UnsupportedChannels`] for other channel counts.
/// * [`IoError::ImageCodecError`] if the format cannot store the image.
pub fn write_image<const C: usize>(
    file_path: impl AsRef<Path>,
    image: &Image<u8, C>,
) -> Result<(), IoError> {
    let color = match C {
        1 => image::ExtendedColorType::L8,
        2 => image::ExtendedColorType::La8,
        3 => image::ExtendedColorType::Rgb8,
        4 => image::ExtendedColorType::Rgba8,
        _ => return Err(IoError::UnsupportedChannels(C)),
    };

    image::save_buffer(
        file_path.as_ref(),
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        color,
    )?;

    log::debug!("wrote {} ({})", file_path.as_ref().display(), image.size());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient<const C: usize>(width: usize, height: usize) -> Result<Image<u8, C>, IoError> {
        let data = (0..width * height * C).map(|i| (i % 256) as u8).collect();
        Ok(Image::new(ImageSize { width, height }, data)?)
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_any("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_write_png_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");

        let image = gradient::<3>(7, 5)?;
        write_image(&file_path, &image)?;

        let back = read_image_any(&file_path)?;
        assert_eq!(back.num_channels(), 3);
        assert_eq!(back, GenericImage::Rgb8(image));
        Ok(())
    }

    #[test]
    fn read_write_png_gray() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        let image = gradient::<1>(4, 9)?;
        write_image(&file_path, &image)?;

        let back = read_image_any(&file_path)?;
        assert_eq!(back.size(), image.size());
        assert_eq!(back, GenericImage::L8(image));
        Ok(())
    }

    #[test]
    fn read_write_jpeg() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.jpeg");

        let image = gradient::<3>(16, 8)?;
        write_image(&file_path, &image)?;

        // lossy: only the layout survives exactly
        let back = read_image_any(&file_path)?;
        assert_eq!(back.size(), image.size());
        assert_eq!(back.num_channels(), 3);
        Ok(())
    }

    #[test]
    fn write_unsupported_channels() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = gradient::<5>(2, 2)?;
        let res = write_image(tmp_dir.path().join("five.png"), &image);
        assert!(matches!(res, Err(IoError::UnsupportedChannels(5))));
        Ok(())
    }
}
