use num_traits::{One, Zero};
use std::cmp::PartialOrd;

use konvo_image::{Image, ImageError};

use crate::error::ImgProcError;
use crate::parallel;

/// Binarize an image against a scalar cut value.
///
/// An output pixel is 1 where the source pixel strictly exceeds
/// `threshold_value`, 0 otherwise. Used standalone and as a building block by
/// the segmentation algorithms.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels.
/// * `dst` - The output binary image of identical shape, values in {0, 1}.
/// * `threshold_value` - The cut value, normally in `(0, 1)`.
///
/// # Errors
///
/// Returns an error if `dst` does not match the shape of `src`.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::threshold::thresholding;
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 3, height: 1 },
///     vec![0.2, 0.5, 0.8],
/// ).unwrap();
/// let mut binary = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// thresholding(&image, &mut binary, 0.5).unwrap();
/// assert_eq!(binary.as_slice(), &[0.0, 0.0, 1.0]);
/// ```
pub fn thresholding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold_value: T,
) -> Result<(), ImgProcError>
where
    T: Copy + Send + Sync + PartialOrd + Zero + One,
{
    if src.size() != dst.size() {
        return Err(ImgProcError::ImageError(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )));
    }

    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel > threshold_value {
            T::one()
        } else {
            T::zero()
        };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use konvo_image::{Image, ImageSize};

    #[test]
    fn test_thresholding_binary_codomain() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0.1, 0.4, 0.5, 0.50001, 0.9, -0.3],
        )?;
        let mut dst = Image::from_size_val(src.size(), 7.0)?;

        thresholding(&src, &mut dst, 0.5)?;

        for (&s, &d) in src.as_slice().iter().zip(dst.as_slice().iter()) {
            assert!(d == 0.0 || d == 1.0);
            assert_eq!(d == 1.0, s > 0.5);
        }

        Ok(())
    }

    #[test]
    fn test_thresholding_strict_comparison() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            vec![0.5],
        )?;
        let mut dst = Image::from_size_val(src.size(), 0.0)?;

        thresholding(&src, &mut dst, 0.5)?;

        // equality does not pass the strict comparison
        assert_eq!(dst.as_slice(), &[0.0]);

        Ok(())
    }

    #[test]
    fn test_thresholding_size_mismatch() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        let mut dst = Image::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0.0,
        )?;

        assert!(thresholding(&src, &mut dst, 0.5).is_err());

        Ok(())
    }
}
