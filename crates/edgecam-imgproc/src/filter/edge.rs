use edgecam_image::{GrayView, Image, ImageError, ImageSize};

use super::kernels::{correlate3, SOBEL_X, SOBEL_Y};
use crate::parallel::{ExecutionStrategy, ParallelError, RowExecutor};

/// Squared gradient magnitude above which a pixel is classified as an edge.
pub const EDGE_THRESHOLD: i32 = 128 * 128;

/// Output value written for pixels whose gradient magnitude exceeds [`EDGE_THRESHOLD`].
pub const EDGE_VALUE: u8 = 0xFF;

/// Output value written for flat pixels.
///
/// Kept above zero so that flat regions remain visible when the edge map is displayed.
pub const FLAT_VALUE: u8 = 0x1F;

/// Classify a pixel from its horizontal and vertical Sobel responses.
///
/// The comparison is strict: a squared magnitude equal to [`EDGE_THRESHOLD`] is flat.
///
/// # Examples
///
/// ```
/// use edgecam_imgproc::filter::{classify_gradient, EDGE_VALUE, FLAT_VALUE};
///
/// assert_eq!(classify_gradient(128, 0), FLAT_VALUE);
/// assert_eq!(classify_gradient(128, 1), EDGE_VALUE);
/// ```
#[inline]
pub fn classify_gradient(x_sum: i32, y_sum: i32) -> u8 {
    if x_sum * x_sum + y_sum * y_sum > EDGE_THRESHOLD {
        EDGE_VALUE
    } else {
        FLAT_VALUE
    }
}

/// Binary Sobel edge detector for grayscale camera frames.
///
/// The detector owns a scratch buffer used to drop the row padding of strided
/// sources. The buffer is kept between calls and only reallocated when the frame
/// size grows, so a detector is meant to be reused across frames. Each thread
/// running detections needs its own detector.
///
/// Only the interior of the output is written. The one pixel border keeps whatever
/// value the caller stored there before the call.
///
/// # Examples
///
/// ```
/// use edgecam_imgproc::filter::{EdgeDetector, EDGE_VALUE, FLAT_VALUE};
///
/// // 4x3 image with a vertical step, rows padded to 6 bytes
/// let src = [
///     0u8, 0, 255, 255, 9, 9,
///     0, 0, 255, 255, 9, 9,
///     0, 0, 255, 255,
/// ];
/// let mut dst = [0u8; 4 * 3];
///
/// let mut detector = EdgeDetector::new();
/// detector.detect(&mut dst, &src, 4, 3, 6).unwrap();
///
/// assert_eq!(&dst[4..8], &[0, EDGE_VALUE, EDGE_VALUE, 0]);
/// ```
#[derive(Debug, Default)]
pub struct EdgeDetector {
    executor: RowExecutor,
    scratch: Vec<u8>,
}

impl EdgeDetector {
    /// Create a detector running rows on the global Rayon thread pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with the given execution strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy needs a thread pool that cannot be built.
    pub fn with_strategy(strategy: ExecutionStrategy) -> Result<Self, ParallelError> {
        Ok(Self {
            executor: RowExecutor::new(strategy)?,
            scratch: Vec::new(),
        })
    }

    /// The execution strategy of the detector.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.executor.strategy()
    }

    /// Detect edges in a raw, possibly strided, luminance buffer.
    ///
    /// # Arguments
    ///
    /// * `dst` - The output buffer, at least `width * height` samples. Samples past
    ///   `width * height` are never touched.
    /// * `src` - The luminance samples, `row_stride` samples per row.
    /// * `width` - The image width in pixels.
    /// * `height` - The image height in pixels.
    /// * `row_stride` - The distance in samples between the starts of two rows.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InsufficientOutputCapacity`] if `dst` is too small, or an
    /// error describing the invalid source layout. `dst` is left untouched on error.
    pub fn detect(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
        width: usize,
        height: usize,
        row_stride: usize,
    ) -> Result<(), ImageError> {
        let view = GrayView::new(src, ImageSize { width, height }, row_stride)?;
        self.detect_into(&view, dst)
    }

    /// Detect edges in a grayscale view, writing into an image of the same size.
    ///
    /// # Errors
    ///
    /// Returns an error if the sizes of `src` and `dst` differ.
    pub fn detect_view(
        &mut self,
        src: &GrayView<'_>,
        dst: &mut Image<u8, 1>,
    ) -> Result<(), ImageError> {
        if src.size() != dst.size() {
            return Err(ImageError::InvalidImageSize(
                src.width(),
                src.height(),
                dst.width(),
                dst.height(),
            ));
        }

        self.detect_into(src, dst.as_slice_mut())
    }

    fn detect_into(&mut self, src: &GrayView<'_>, dst: &mut [u8]) -> Result<(), ImageError> {
        let area = src
            .size()
            .checked_area()
            .ok_or(ImageError::InsufficientOutputCapacity(dst.len(), usize::MAX))?;
        if dst.len() < area {
            return Err(ImageError::InsufficientOutputCapacity(dst.len(), area));
        }

        let linear = match src.as_contiguous() {
            Some(data) => data,
            None => {
                if self.scratch.capacity() < area {
                    log::debug!(
                        "growing edge scratch buffer from {} to {} samples",
                        self.scratch.capacity(),
                        area
                    );
                }
                src.copy_to_contiguous(&mut self.scratch);
                &self.scratch[..]
            }
        };

        sobel_edges_impl(
            &self.executor,
            linear,
            src.width(),
            src.height(),
            &mut dst[..area],
        );

        Ok(())
    }
}

/// Compute the binary Sobel edge map of a contiguous grayscale image.
///
/// Rows are processed serially on the calling thread and no scratch buffer is
/// needed. Use an [`EdgeDetector`] to pick an execution strategy.
///
/// Interior pixels are set to [`EDGE_VALUE`] or [`FLAT_VALUE`]; the one pixel
/// border of `dst` is left untouched.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output edge map.
///
/// PRECONDITION: `src` and `dst` must have the same size.
///
/// # Examples
///
/// ```
/// use edgecam_image::{Image, ImageSize};
/// use edgecam_imgproc::filter::{sobel_edges, FLAT_VALUE};
///
/// let size = ImageSize { width: 4, height: 4 };
/// let src = Image::<u8, 1>::from_size_val(size, 100).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// sobel_edges(&src, &mut dst).unwrap();
///
/// assert_eq!(dst.get_pixel(1, 1, 0).unwrap(), &FLAT_VALUE);
/// assert_eq!(dst.get_pixel(0, 0, 0).unwrap(), &0);
/// ```
pub fn sobel_edges(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    sobel_edges_impl(
        &RowExecutor::serial(),
        src.as_slice(),
        src.width(),
        src.height(),
        dst.as_slice_mut(),
    );

    Ok(())
}

fn sobel_edges_impl(
    executor: &RowExecutor,
    src: &[u8],
    width: usize,
    height: usize,
    dst: &mut [u8],
) {
    // no interior pixels
    if width < 3 || height < 3 {
        return;
    }

    executor.for_each_row(dst, width, 1..height - 1, |y, dst_row| {
        let rows = [
            &src[(y - 1) * width..y * width],
            &src[y * width..(y + 1) * width],
            &src[(y + 1) * width..(y + 2) * width],
        ];

        dst_row[1..width - 1]
            .iter_mut()
            .enumerate()
            .for_each(|(i, out)| {
                let x = i + 1;
                let x_sum = correlate3(&SOBEL_X, rows, x);
                let y_sum = correlate3(&SOBEL_Y, rows, x);
                *out = classify_gradient(x_sum, y_sum);
            });
    });
}
