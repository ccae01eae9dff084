use konvo_image::Image;

use crate::color::gray_from_rgb;
use crate::error::ImgProcError;
use crate::threshold::thresholding;

/// Parameters for the iterative global threshold search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalThresholdParams {
    /// The threshold seed.
    pub initial_threshold: f32,
    /// The minimal interval between successive thresholds; the search stops
    /// once an update moves less than this.
    pub delta_t: f32,
    /// Safety bound on the number of iterations.
    pub max_iterations: usize,
}

impl Default for GlobalThresholdParams {
    fn default() -> Self {
        Self {
            initial_threshold: 0.5,
            delta_t: 0.01,
            max_iterations: 100,
        }
    }
}

/// The outcome of a converged global threshold search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalThreshold {
    /// The converged threshold the image was binarized with.
    pub threshold: f32,
    /// The number of iterations taken to converge.
    pub iterations: usize,
}

/// Round to three decimal digits, the granularity of the threshold sequence.
fn round3(x: f32) -> f32 {
    (x * 1000.0).round() / 1000.0
}

/// Estimate a single global threshold for a grayscale image and binarize it.
///
/// Starting from the seed, each iteration partitions the pixels into the
/// groups above and at-or-below the current threshold, computes each group's
/// mean intensity and moves the threshold to the average of the two means
/// (rounded to three decimals). The search stops when an update moves less
/// than `delta_t`; the image is then binarized with the pre-update threshold.
///
/// Suitable when the intensity distributions of objects and background are
/// sufficiently distinct for one threshold to apply over the entire image.
///
/// # Arguments
///
/// * `src` - The grayscale source image, intensities in `[0, 1]`.
/// * `dst` - The destination binary image of identical shape.
/// * `params` - Seed, stopping interval and iteration bound.
///
/// # Errors
///
/// Returns an error if a partition leaves one group empty (the group mean is
/// undefined), or if the sequence does not satisfy the stopping condition
/// within `max_iterations`.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::segmentation::{global_thresholding, GlobalThresholdParams};
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 4, height: 1 },
///     vec![0.1, 0.2, 0.8, 0.9],
/// ).unwrap();
/// let mut binary = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// let result = global_thresholding(&image, &mut binary, GlobalThresholdParams::default())
///     .unwrap();
/// assert_eq!(binary.as_slice(), &[0.0, 0.0, 1.0, 1.0]);
/// assert!((result.threshold - 0.5).abs() < 0.01);
/// ```
pub fn global_thresholding(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    params: GlobalThresholdParams,
) -> Result<GlobalThreshold, ImgProcError> {
    let mut global_threshold = round3(params.initial_threshold);

    for iteration in 1..=params.max_iterations {
        let mut above_sum = 0.0f64;
        let mut above_count = 0usize;
        let mut below_sum = 0.0f64;
        let mut below_count = 0usize;

        for &px in src.as_slice() {
            if px > global_threshold {
                above_sum += px as f64;
                above_count += 1;
            } else {
                below_sum += px as f64;
                below_count += 1;
            }
        }

        if above_count == 0 || below_count == 0 {
            return Err(ImgProcError::EmptyPartition(global_threshold));
        }

        let above_mean = above_sum / above_count as f64;
        let below_mean = below_sum / below_count as f64;
        let new_global_threshold = round3(0.5 * (above_mean + below_mean) as f32);

        log::debug!(
            "global threshold iteration {iteration}: {global_threshold} -> {new_global_threshold}"
        );

        if (new_global_threshold - global_threshold).abs() < params.delta_t {
            thresholding(src, dst, global_threshold)?;
            return Ok(GlobalThreshold {
                threshold: global_threshold,
                iterations: iteration,
            });
        }

        global_threshold = new_global_threshold;
    }

    Err(ImgProcError::ThresholdNotConverged(params.max_iterations))
}

/// Estimate a global threshold for a color image.
///
/// Converts the image to grayscale first, then delegates to
/// [`global_thresholding`].
///
/// # Errors
///
/// Same failure modes as [`global_thresholding`].
pub fn global_thresholding_rgb(
    src: &Image<f32, 3>,
    dst: &mut Image<f32, 1>,
    params: GlobalThresholdParams,
) -> Result<GlobalThreshold, ImgProcError> {
    let mut grayscale = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    gray_from_rgb(src, &mut grayscale)?;

    global_thresholding(&grayscale, dst, params)
}
