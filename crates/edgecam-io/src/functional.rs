use std::path::Path;

use edgecam_image::{Image, ImageSize};

use crate::error::IoError;

/// A decoded image in one of the layouts the edge pipeline consumes.
#[derive(Debug)]
pub enum GenericImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
}

impl GenericImage {
    /// Get the size of the decoded image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::L8(image) => image.size(),
            GenericImage::Rgb8(image) => image.size(),
        }
    }
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate.
/// Grayscale images are returned as [`GenericImage::L8`]; every other color type is
/// converted to [`GenericImage::Rgb8`].
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
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

    let image = match img.color() {
        image::ColorType::L8 => GenericImage::L8(Image::new(size, img.into_luma8().into_raw())?),
        _ => GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
    };

    Ok(image)
}
