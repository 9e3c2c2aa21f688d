use edgecam_image::{view::required_len, GrayView, Image, ImageError, ImageSize};

use crate::parallel::RowExecutor;

/// Extract the luminance of a packed YUYV (YUV 4:2:2) frame.
///
/// Each pair of pixels is stored as `Y0 U Y1 V`, so the luminance of pixel `x` is
/// the byte at `2 * x` of its row. Chroma is dropped.
///
/// # Arguments
///
/// * `src` - The packed YUYV frame.
/// * `row_stride` - The distance in bytes between the starts of two rows, at least `2 * width`.
/// * `dst` - The output grayscale image. Its size defines the frame size.
///
/// # Errors
///
/// Returns an error if the stride is too small or `src` is too short.
///
/// # Example
///
/// ```
/// use edgecam_image::{Image, ImageSize};
/// use edgecam_imgproc::color::gray_from_yuyv_u8;
///
/// let yuyv = [10u8, 128, 20, 128, 30, 128, 40, 128];
/// let mut gray = Image::<u8, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0).unwrap();
///
/// gray_from_yuyv_u8(&yuyv, 4, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[10, 20, 30, 40]);
/// ```
pub fn gray_from_yuyv_u8(
    src: &[u8],
    row_stride: usize,
    dst: &mut Image<u8, 1>,
) -> Result<(), ImageError> {
    let size = dst.size();
    if size.is_empty() {
        return Err(ImageError::EmptyImage(size.width, size.height));
    }

    let packed = ImageSize {
        width: size
            .width
            .checked_mul(2)
            .ok_or(ImageError::InvalidRowStride(row_stride, usize::MAX))?,
        height: size.height,
    };
    if row_stride < packed.width {
        return Err(ImageError::InvalidRowStride(row_stride, packed.width));
    }

    let required = required_len(packed, row_stride)
        .ok_or(ImageError::InsufficientSourceLength(src.len(), usize::MAX))?;
    if src.len() < required {
        return Err(ImageError::InsufficientSourceLength(src.len(), required));
    }

    RowExecutor::default().for_each_row(
        dst.as_slice_mut(),
        size.width,
        0..size.height,
        |y, dst_row| {
            let src_row = &src[y * row_stride..y * row_stride + packed.width];
            src_row
                .chunks_exact(2)
                .zip(dst_row.iter_mut())
                .for_each(|(yu, out)| *out = yu[0]);
        },
    );

    Ok(())
}

/// Borrow the luminance plane of a planar or semi-planar YUV 4:2:0 frame.
///
/// Single buffer camera readbacks in I420, NV12 or NV21 layouts start with a full
/// resolution Y plane of `height` rows, `row_stride` bytes apart, followed by the
/// chroma samples. `data` must hold the whole Y plane plus at least the
/// `2 * ceil(width / 2) * ceil(height / 2)` chroma samples of the frame. The chroma
/// is not read, so the view can be handed directly to the edge detector without
/// copying.
///
/// When the planes live in separate buffers, as with Android `YUV_420_888` images,
/// build a [`GrayView`] over the Y plane instead.
///
/// # Errors
///
/// Returns an error if the size is empty, if `row_stride < width` or if `data` is
/// too short to hold a 4:2:0 frame of that layout.
pub fn luma_view_yuv420(
    data: &[u8],
    size: ImageSize,
    row_stride: usize,
) -> Result<GrayView<'_>, ImageError> {
    if size.is_empty() {
        return Err(ImageError::EmptyImage(size.width, size.height));
    }

    if row_stride < size.width {
        return Err(ImageError::InvalidRowStride(row_stride, size.width));
    }

    // luma rows are all padded since the chroma follows them
    let chroma = size
        .width
        .div_ceil(2)
        .checked_mul(size.height.div_ceil(2))
        .and_then(|pairs| pairs.checked_mul(2));
    let required = row_stride
        .checked_mul(size.height)
        .zip(chroma)
        .and_then(|(luma, chroma)| luma.checked_add(chroma))
        .ok_or(ImageError::InsufficientSourceLength(data.len(), usize::MAX))?;
    if data.len() < required {
        return Err(ImageError::InsufficientSourceLength(data.len(), required));
    }

    GrayView::new(data, size, row_stride)
}
