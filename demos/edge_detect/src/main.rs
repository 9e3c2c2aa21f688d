use argh::FromArgs;
use std::path::PathBuf;

use edgecam::{
    image::{GrayView, Image},
    imgproc::{
        color,
        filter::{EdgeDetector, EDGE_VALUE, FLAT_VALUE},
        parallel::ExecutionStrategy,
    },
    io::{
        fps_counter::FpsCounter,
        functional::{self as F, GenericImage},
        png,
    },
};

#[derive(FromArgs)]
/// Compute the binary Sobel edge map of an image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output png edge map
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// padding bytes appended to each row to simulate an aligned camera readback
    #[argh(option, default = "0")]
    row_padding: usize,

    /// number of times the detector is run on the frame
    #[argh(option, default = "1")]
    iterations: usize,

    /// run on a dedicated pool with this many threads, 0 for the serial path
    #[argh(option)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image and convert it to grayscale
    let gray = match F::read_image_any(&args.image_path)? {
        GenericImage::L8(gray) => gray,
        GenericImage::Rgb8(rgb) => {
            let mut gray = Image::<u8, 1>::from_size_val(rgb.size(), 0)?;
            color::gray_from_rgb_u8(&rgb, &mut gray)?;
            gray
        }
    };
    if gray.size().is_empty() {
        return Err(format!("{:?} has no pixels", args.image_path).into());
    }
    log::info!("loaded {} from {:?}", gray.size(), args.image_path);

    // lay the frame out the way a padded camera readback would
    let row_stride = gray.width() + args.row_padding;
    let mut frame = vec![0u8; row_stride * gray.height()];
    frame
        .chunks_exact_mut(row_stride)
        .zip(gray.as_slice().chunks_exact(gray.width()))
        .for_each(|(dst, src)| dst[..src.len()].copy_from_slice(src));
    let view = GrayView::new(&frame, gray.size(), row_stride)?;

    let strategy = match args.threads {
        Some(0) => ExecutionStrategy::Serial,
        Some(n) => ExecutionStrategy::Fixed(n),
        None => ExecutionStrategy::ParallelRows,
    };
    let mut detector = EdgeDetector::with_strategy(strategy)?;
    log::debug!("detector strategy: {:?}", detector.strategy());

    // the detector leaves the border alone, give it a defined value
    let mut edges = Image::<u8, 1>::from_size_val(gray.size(), FLAT_VALUE)?;

    let mut fps_counter = FpsCounter::new();
    for _ in 0..args.iterations.max(1) {
        detector.detect_view(&view, &mut edges)?;
        fps_counter.update();
    }
    log::info!(
        "ran {} iterations at {:.1} fps",
        fps_counter.frame_count(),
        fps_counter.fps()
    );

    let num_edges = edges.as_slice().iter().filter(|&&v| v == EDGE_VALUE).count();
    log::info!(
        "{} edge pixels ({:.2}%)",
        num_edges,
        100.0 * num_edges as f32 / gray.size().area() as f32
    );

    png::write_image_png_gray8(&args.output, &edges)?;
    log::info!("wrote edge map to {:?}", args.output);

    Ok(())
}
