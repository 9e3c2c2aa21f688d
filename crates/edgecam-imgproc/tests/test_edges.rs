use edgecam_image::{GrayView, Image, ImageError, ImageSize};
use edgecam_imgproc::filter::{sobel_edges, EdgeDetector, EDGE_VALUE, FLAT_VALUE};
use edgecam_imgproc::parallel::ExecutionStrategy;
use rand::{rngs::StdRng, Rng, SeedableRng};

const SENTINEL: u8 = 0x42;

fn random_frame(rng: &mut StdRng, width: usize, height: usize, row_stride: usize) -> Vec<u8> {
    (0..row_stride * height)
        .map(|i| {
            // keep the padding at a fixed value so it is easy to spot if read
            if i % row_stride < width {
                rng.random::<u8>()
            } else {
                0xEE
            }
        })
        .collect()
}

/// Straightforward per-pixel evaluation of the 3x3 neighbourhood formulas.
fn reference_edges(src: &[u8], width: usize, height: usize, row_stride: usize) -> Vec<u8> {
    let mut dst = vec![SENTINEL; width * height];
    let at = |x: usize, y: usize| src[y * row_stride + x] as i32;

    for j in 1..height.saturating_sub(1) {
        for i in 1..width.saturating_sub(1) {
            let (a00, a01, a02) = (at(i - 1, j - 1), at(i, j - 1), at(i + 1, j - 1));
            let (a10, a12) = (at(i - 1, j), at(i + 1, j));
            let (a20, a21, a22) = (at(i - 1, j + 1), at(i, j + 1), at(i + 1, j + 1));

            let x_sum = -a00 - 2 * a10 - a20 + a02 + 2 * a12 + a22;
            let y_sum = a00 + 2 * a01 + a02 - a20 - 2 * a21 - a22;
            let mag2 = x_sum * x_sum + y_sum * y_sum;

            dst[j * width + i] = if mag2 > 128 * 128 {
                EDGE_VALUE
            } else {
                FLAT_VALUE
            };
        }
    }

    dst
}

#[test]
fn test_matches_reference() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut detector = EdgeDetector::new();

    for (width, height, row_stride) in [(5, 5, 5), (17, 9, 32), (64, 48, 64), (3, 40, 7)] {
        let src = random_frame(&mut rng, width, height, row_stride);
        let mut dst = vec![SENTINEL; width * height];
        detector.detect(&mut dst, &src, width, height, row_stride)?;

        assert_eq!(
            dst,
            reference_edges(&src, width, height, row_stride),
            "mismatch for {width}x{height} stride {row_stride}"
        );
    }

    Ok(())
}

#[test]
fn test_strided_matches_contiguous() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(11);
    let (width, height) = (33, 21);

    let contiguous = random_frame(&mut rng, width, height, width);

    // same pixels with 31 bytes of alignment padding per row
    let row_stride = 64;
    let mut strided = vec![0xEEu8; row_stride * height];
    for (dst_row, src_row) in strided
        .chunks_exact_mut(row_stride)
        .zip(contiguous.chunks_exact(width))
    {
        dst_row[..width].copy_from_slice(src_row);
    }

    let mut detector = EdgeDetector::new();
    let mut out_contiguous = vec![SENTINEL; width * height];
    let mut out_strided = vec![SENTINEL; width * height];
    detector.detect(&mut out_contiguous, &contiguous, width, height, width)?;
    detector.detect(&mut out_strided, &strided, width, height, row_stride)?;

    assert_eq!(out_contiguous, out_strided);
    Ok(())
}

#[test]
fn test_strategies_agree() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(3);
    let (width, height, row_stride) = (120, 80, 128);
    let src = random_frame(&mut rng, width, height, row_stride);

    let mut outputs = Vec::new();
    for strategy in [
        ExecutionStrategy::Serial,
        ExecutionStrategy::ParallelRows,
        ExecutionStrategy::Fixed(3),
    ] {
        let mut detector = EdgeDetector::with_strategy(strategy)?;
        assert_eq!(detector.strategy(), strategy);

        let mut dst = vec![SENTINEL; width * height];
        detector.detect(&mut dst, &src, width, height, row_stride)?;
        outputs.push(dst);
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
    Ok(())
}

#[test]
fn test_deterministic_across_calls() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(5);
    let mut detector = EdgeDetector::new();

    let src = random_frame(&mut rng, 40, 30, 48);
    let mut first = vec![SENTINEL; 40 * 30];
    detector.detect(&mut first, &src, 40, 30, 48)?;

    // a frame of a different size in between resizes the scratch buffer
    let other = random_frame(&mut rng, 100, 70, 112);
    let mut other_dst = vec![SENTINEL; 100 * 70];
    detector.detect(&mut other_dst, &other, 100, 70, 112)?;

    let mut second = vec![SENTINEL; 40 * 30];
    detector.detect(&mut second, &src, 40, 30, 48)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_detect_view_and_sobel_edges_agree() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(13);
    let size = ImageSize {
        width: 24,
        height: 16,
    };
    let src = Image::<u8, 1>::new(size, random_frame(&mut rng, 24, 16, 24))?;

    let mut from_view = Image::<u8, 1>::from_size_val(size, SENTINEL)?;
    EdgeDetector::new().detect_view(&src.view()?, &mut from_view)?;

    let mut from_fn = Image::<u8, 1>::from_size_val(size, SENTINEL)?;
    sobel_edges(&src, &mut from_fn)?;

    assert_eq!(from_view, from_fn);
    Ok(())
}

#[test]
fn test_horizontal_step() -> Result<(), ImageError> {
    // top rows bright, bottom rows dark: strong vertical gradient
    let (width, height) = (6, 6);
    let data: Vec<u8> = (0..width * height)
        .map(|i| if i / width < 3 { 200 } else { 10 })
        .collect();
    let view = GrayView::new(&data, [width, height].into(), width)?;

    let mut dst = Image::<u8, 1>::from_size_val(view.size(), 0)?;
    EdgeDetector::new().detect_view(&view, &mut dst)?;

    for x in 1..width - 1 {
        assert_eq!(dst.get_pixel(x, 1, 0)?, &FLAT_VALUE);
        assert_eq!(dst.get_pixel(x, 2, 0)?, &EDGE_VALUE);
        assert_eq!(dst.get_pixel(x, 3, 0)?, &EDGE_VALUE);
        assert_eq!(dst.get_pixel(x, 4, 0)?, &FLAT_VALUE);
        assert_eq!(dst.get_pixel(x, 0, 0)?, &0);
    }
    Ok(())
}
