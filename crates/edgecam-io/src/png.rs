use std::{fs, fs::File, io::BufWriter, path::Path};

use edgecam_image::{Image, ImageSize};
use png::{BitDepth, ColorType, Decoder, Encoder};

use crate::error::IoError;

/// Read a PNG image with a single channel (mono8).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
///
/// # Errors
///
/// Returns an error if the file is missing, does not have a `.png` extension, or
/// is not an 8-bit grayscale PNG.
pub fn read_image_png_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let (buf, size) = read_png_impl(file_path)?;
    Ok(Image::new(size, buf)?)
}

/// Write a grayscale image as an 8-bit PNG.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
/// * `image` - The grayscale image to encode.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path,
        image.as_slice(),
        image.size(),
        BitDepth::Eight,
        ColorType::Grayscale,
    )
}

fn read_png_impl(file_path: impl AsRef<Path>) -> Result<(Vec<u8>, ImageSize), IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    let is_png = file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = fs::File::open(file_path)?;
    let mut reader = Decoder::new(file)
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    if info.color_type != ColorType::Grayscale || info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedPngLayout(info.color_type, info.bit_depth));
    }

    buf.truncate(info.buffer_size());

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };

    Ok((buf, size))
}

fn write_png_impl(
    file_path: impl AsRef<Path>,
    image_data: &[u8],
    image_size: ImageSize,
    // Make sure you set `depth` correctly
    depth: BitDepth,
    color_type: ColorType,
) -> Result<(), IoError> {
    // png dimensions are 32 bit
    let (Ok(width), Ok(height)) = (
        u32::try_from(image_size.width),
        u32::try_from(image_size.height),
    ) else {
        return Err(IoError::PngEncodingError(format!(
            "{image_size} does not fit in a png header"
        )));
    };

    let file = File::create(file_path)?;

    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color_type);
    encoder.set_depth(depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_image_png_mono8, write_image_png_gray8, write_png_impl};
    use crate::error::IoError;
    use edgecam_image::{Image, ImageSize};
    use png::{BitDepth, ColorType};

    #[test]
    fn write_read_gray8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("edges.png");

        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let data = (0..12u8).map(|v| v * 20).collect::<Vec<_>>();
        let image = Image::<u8, 1>::new(size, data)?;

        write_image_png_gray8(&file_path, &image)?;
        let decoded = read_image_png_mono8(&file_path)?;

        assert_eq!(decoded.size(), size);
        assert_eq!(decoded.as_slice(), image.as_slice());
        Ok(())
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn write_oversized_dimensions() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("wide.png");

        let size = ImageSize {
            width: u32::MAX as usize + 1,
            height: 1,
        };
        let res = write_png_impl(&file_path, &[], size, BitDepth::Eight, ColorType::Grayscale);
        assert!(matches!(res, Err(IoError::PngEncodingError(_))));
        assert!(!file_path.exists());
        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_png_mono8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_wrong_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("edges.jpg");
        std::fs::write(&file_path, [0u8; 4])?;

        let res = read_image_png_mono8(&file_path);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }
}
