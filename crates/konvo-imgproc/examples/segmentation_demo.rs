use konvo_image::{Image, ImageSize};
use konvo_imgproc::error::ImgProcError;
use konvo_imgproc::filter::gaussian_blur;
use konvo_imgproc::padding::PaddingMode;
use konvo_imgproc::segmentation::{
    global_thresholding, kirsch_edge_detection, line_detection, GlobalThresholdParams,
};

/// Build a synthetic 64x64 scene: a dark background with a bright square and
/// a vertical line.
fn synthetic_scene() -> Result<Image<f32, 1>, ImgProcError> {
    let mut data = vec![0.1f32; 64 * 64];
    for row in 16..32 {
        for col in 16..32 {
            data[row * 64 + col] = 0.9;
        }
    }
    for row in 8..56 {
        data[row * 64 + 48] = 0.8;
    }
    Ok(Image::new(
        ImageSize {
            width: 64,
            height: 64,
        },
        data,
    )?)
}

fn main() -> Result<(), ImgProcError> {
    env_logger::init();

    let image = synthetic_scene()?;

    // smooth before detecting structures
    let mut smoothed = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;
    gaussian_blur(&image, &mut smoothed, 3, 0.8, PaddingMode::Zero)?;

    let lines = line_detection(&smoothed, PaddingMode::Zero, 1.0)?;
    for (orientation, response) in &lines {
        let marked = response.as_slice().iter().filter(|&&v| v == 1.0).count();
        println!("{orientation:?}: {marked} line pixels");
    }

    let edges = kirsch_edge_detection(&smoothed, PaddingMode::Zero)?;
    for (direction, response) in &edges {
        let strongest = response.as_slice().iter().cloned().fold(0.0f32, f32::max);
        println!("{direction:?}: strongest response {strongest:.3}");
    }

    let mut binary = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;
    let result = global_thresholding(&image, &mut binary, GlobalThresholdParams::default())?;
    let foreground = binary.as_slice().iter().filter(|&&v| v == 1.0).count();
    println!(
        "global threshold {:.3} after {} iterations, {} foreground pixels",
        result.threshold, result.iterations, foreground
    );

    Ok(())
}
