use konvo_image::Image;
use rayon::prelude::*;

use crate::error::ImgProcError;

/// The number of intensity levels counted by the histogram.
pub const NUM_INTENSITY_LEVELS: usize = 256;

/// Compute the intensity histogram of a grayscale image.
///
/// Intensities in the `[0, 1]` convention are scaled to 256 levels; values
/// outside the range are clamped into the first and last bins.
///
/// # Arguments
///
/// * `src` - The input grayscale image, intensities in `[0, 1]`.
/// * `hist` - The output counts, one per intensity level.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::histogram::{compute_histogram, NUM_INTENSITY_LEVELS};
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 3, height: 1 },
///     vec![0.0, 0.5, 1.0],
/// ).unwrap();
///
/// let mut histogram = [0usize; NUM_INTENSITY_LEVELS];
/// compute_histogram(&image, &mut histogram);
///
/// assert_eq!(histogram[0], 1);
/// assert_eq!(histogram[128], 1);
/// assert_eq!(histogram[255], 1);
/// ```
pub fn compute_histogram(src: &Image<f32, 1>, hist: &mut [usize; NUM_INTENSITY_LEVELS]) {
    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; NUM_INTENSITY_LEVELS],
            |mut local, chunk| {
                for &px in chunk {
                    let level = (px * 255.0).round().clamp(0.0, 255.0) as usize;
                    local[level] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; NUM_INTENSITY_LEVELS],
            |mut a, b| {
                for (i, val) in b.iter().enumerate() {
                    a[i] += val;
                }
                a
            },
        );

    for (dst, &count) in hist.iter_mut().zip(counts.iter()) {
        *dst += count;
    }
}

/// Compute the normalized intensity histogram of a grayscale image.
///
/// Each entry holds the probability of its intensity level rather than the
/// raw count.
///
/// # Errors
///
/// Returns an error if the image contains no pixels.
pub fn compute_histogram_normalized(
    src: &Image<f32, 1>,
) -> Result<[f32; NUM_INTENSITY_LEVELS], ImgProcError> {
    let num_pixels = src.as_slice().len();
    if num_pixels == 0 {
        return Err(ImgProcError::ImageError(
            konvo_image::ImageError::ImageDataNotInitialized,
        ));
    }

    let mut counts = [0usize; NUM_INTENSITY_LEVELS];
    compute_histogram(src, &mut counts);

    let mut probabilities = [0.0f32; NUM_INTENSITY_LEVELS];
    for (p, &count) in probabilities.iter_mut().zip(counts.iter()) {
        *p = count as f32 / num_pixels as f32;
    }

    Ok(probabilities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use konvo_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_compute_histogram() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0.0, 0.0, 0.0, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0],
        )?;

        let mut histogram = [0usize; NUM_INTENSITY_LEVELS];
        compute_histogram(&image, &mut histogram);

        assert_eq!(histogram[0], 3);
        assert_eq!(histogram[128], 3);
        assert_eq!(histogram[255], 3);
        assert_eq!(histogram.iter().sum::<usize>(), 9);

        Ok(())
    }

    #[test]
    fn test_compute_histogram_clamps_out_of_range() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![-0.5, 1.5],
        )?;

        let mut histogram = [0usize; NUM_INTENSITY_LEVELS];
        compute_histogram(&image, &mut histogram);

        assert_eq!(histogram[0], 1);
        assert_eq!(histogram[255], 1);

        Ok(())
    }

    #[test]
    fn test_compute_histogram_normalized() -> Result<(), ImgProcError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![0.0, 0.0, 1.0, 1.0],
        )?;

        let probabilities = compute_histogram_normalized(&image)?;

        assert!((probabilities[0] - 0.5).abs() < 1e-6);
        assert!((probabilities[255] - 0.5).abs() < 1e-6);
        assert!((probabilities.iter().sum::<f32>() - 1.0).abs() < 1e-5);

        Ok(())
    }
}
