use crate::{error::ImageError, image::ImageSize};

/// A borrowed single channel 8-bit image with an explicit row stride.
///
/// Camera readbacks often pad each row for memory alignment, so consecutive rows
/// start `row_stride` samples apart while only the first `width` samples of each
/// row carry pixel data. The last row does not need to be padded.
///
/// # Examples
///
/// ```
/// use edgecam_image::{GrayView, ImageSize};
///
/// // 2x2 image with 2 bytes of padding per row
/// let data = [1u8, 2, 0, 0, 3, 4];
/// let view = GrayView::new(&data, ImageSize { width: 2, height: 2 }, 4).unwrap();
///
/// assert_eq!(view.row(0), &[1, 2]);
/// assert_eq!(view.row(1), &[3, 4]);
/// assert!(!view.is_contiguous());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GrayView<'a> {
    data: &'a [u8],
    size: ImageSize,
    row_stride: usize,
}

impl<'a> GrayView<'a> {
    /// Create a new view over strided luminance data.
    ///
    /// # Arguments
    ///
    /// * `data` - The raw samples, row-major.
    /// * `size` - The logical size of the image.
    /// * `row_stride` - The distance in samples between the starts of two rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is empty, if `row_stride < width` or if
    /// `data` is too short for the declared layout.
    pub fn new(data: &'a [u8], size: ImageSize, row_stride: usize) -> Result<Self, ImageError> {
        if size.is_empty() {
            return Err(ImageError::EmptyImage(size.width, size.height));
        }

        if row_stride < size.width {
            return Err(ImageError::InvalidRowStride(row_stride, size.width));
        }

        let required = required_len(size, row_stride)
            .ok_or(ImageError::InsufficientSourceLength(data.len(), usize::MAX))?;
        if data.len() < required {
            return Err(ImageError::InsufficientSourceLength(data.len(), required));
        }

        Ok(Self {
            data,
            size,
            row_stride,
        })
    }

    /// Get the size of the image in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the row stride in samples.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Whether rows are packed back to back without padding.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.row_stride == self.size.width
    }

    /// Get the pixel samples of row `y`, without padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.row_stride;
        &self.data[start..start + self.size.width]
    }

    /// Iterate over the rows of the view, without padding.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.size.height).map(move |y| self.row(y))
    }

    /// The samples covering the logical image, as a contiguous slice.
    ///
    /// Returns `None` when the rows are padded.
    pub fn as_contiguous(&self) -> Option<&'a [u8]> {
        if self.is_contiguous() {
            Some(&self.data[..self.size.area()])
        } else {
            None
        }
    }

    /// Copy the view into `dst` dropping the row padding.
    ///
    /// `dst` is resized to exactly `width * height` samples. Its allocation is
    /// reused when it is already large enough.
    pub fn copy_to_contiguous(&self, dst: &mut Vec<u8>) {
        dst.resize(self.size.area(), 0);
        dst.chunks_exact_mut(self.size.width)
            .zip(self.rows())
            .for_each(|(dst_row, src_row)| dst_row.copy_from_slice(src_row));
    }
}

/// Minimum number of samples a buffer needs to hold an image of `size` with the given stride.
///
/// Returns `None` if the length does not fit in a `usize`.
pub fn required_len(size: ImageSize, row_stride: usize) -> Option<usize> {
    if size.is_empty() {
        return Some(0);
    }
    row_stride
        .checked_mul(size.height - 1)?
        .checked_add(size.width)
}
