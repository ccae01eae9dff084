use std::str::FromStr;

use konvo_image::{Image, ImageError};

use crate::error::ImgProcError;
use crate::parallel;

/// How to remap pixel intensities into the canonical `[0, 1]` range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalizationMethod {
    /// Return the image as is; values may exceed `[0, 1]`.
    #[default]
    Unchanged,
    /// Affine remap of the observed `[min, max]` to `[0, 1]`.
    Stretch,
    /// Clamp all values into `[0, 1]`, discarding out-of-range information.
    Cutoff,
}

impl FromStr for NormalizationMethod {
    type Err = std::convert::Infallible;

    /// Parse a normalization method name, falling back to
    /// [`NormalizationMethod::Unchanged`] with a warning when the name is not
    /// recognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unchanged" => Ok(NormalizationMethod::Unchanged),
            "stretch" => Ok(NormalizationMethod::Stretch),
            "cutoff" => Ok(NormalizationMethod::Cutoff),
            other => {
                log::warn!(
                    "unrecognized normalization method '{other}', falling back to unchanged"
                );
                Ok(NormalizationMethod::Unchanged)
            }
        }
    }
}

/// Find the minimum and maximum values in an image.
///
/// # Errors
///
/// Returns an error if the image contains no pixels.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::normalize::find_min_max;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize { width: 2, height: 2 },
///     vec![0u8, 1, 0, 1, 2, 3, 0, 1, 0, 1, 2, 3],
/// ).unwrap();
///
/// let (min, max) = find_min_max(&image).unwrap();
/// assert_eq!(min, 0);
/// assert_eq!(max, 3);
/// ```
pub fn find_min_max<T, const C: usize>(image: &Image<T, C>) -> Result<(T, T), ImgProcError>
where
    T: Copy + PartialOrd,
{
    let first_element = match image.as_slice().first() {
        Some(x) => x,
        None => return Err(ImgProcError::ImageError(ImageError::ImageDataNotInitialized)),
    };

    let mut min = first_element;
    let mut max = first_element;

    for x in image.as_slice().iter() {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }

    Ok((*min, *max))
}

/// Stretch the contrast of an image to the range `[0, 1]`.
///
/// The lowest observed value maps to 0, the highest to 1, and the rest are
/// distributed linearly in between. Useful when filtering produced values
/// outside the normal range, e.g. after high-pass filtering.
///
/// # Errors
///
/// Returns an error if the image is constant (`min == max`), where the remap
/// is undefined.
pub fn contrast_stretching<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
) -> Result<(), ImgProcError> {
    if src.size() != dst.size() {
        return Err(ImgProcError::ImageError(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )));
    }

    let (min_val, max_val) = find_min_max(src)?;
    if min_val == max_val {
        return Err(ImgProcError::UniformContrast(min_val));
    }

    let slope = 1.0 / (max_val - min_val);
    parallel::par_iter_rows_val(src, dst, |&src_pixel, dst_pixel| {
        *dst_pixel = slope * (src_pixel - min_val);
    });

    Ok(())
}

/// Normalize an image under the requested method.
///
/// * [`NormalizationMethod::Unchanged`] copies the image through; values may
///   exceed `[0, 1]` (documented, not corrected).
/// * [`NormalizationMethod::Stretch`] delegates to [`contrast_stretching`].
/// * [`NormalizationMethod::Cutoff`] clamps into `[0, 1]`; out-of-range
///   pixels lose information.
///
/// # Errors
///
/// Returns an error if `dst` does not match the shape of `src`, or when
/// stretching a constant image.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::normalize::{image_normalization, NormalizationMethod};
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 3, height: 1 },
///     vec![-1.0, 0.5, 3.0],
/// ).unwrap();
/// let mut normalized = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// image_normalization(&image, &mut normalized, NormalizationMethod::Cutoff).unwrap();
/// assert_eq!(normalized.as_slice(), &[0.0, 0.5, 1.0]);
/// ```
pub fn image_normalization<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    method: NormalizationMethod,
) -> Result<(), ImgProcError> {
    if src.size() != dst.size() {
        return Err(ImgProcError::ImageError(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )));
    }

    match method {
        NormalizationMethod::Unchanged => {
            dst.as_slice_mut().copy_from_slice(src.as_slice());
            Ok(())
        }
        NormalizationMethod::Stretch => contrast_stretching(src, dst),
        NormalizationMethod::Cutoff => {
            parallel::par_iter_rows_val(src, dst, |&src_pixel, dst_pixel| {
                *dst_pixel = src_pixel.clamp(0.0, 1.0);
            });
            Ok(())
        }
    }
}

/// Normalize an image buffer in place, used by the convolution engine on its
/// raw result.
pub(crate) fn normalize_in_place<const C: usize>(
    image: &mut Image<f32, C>,
    method: NormalizationMethod,
) -> Result<(), ImgProcError> {
    match method {
        NormalizationMethod::Unchanged => Ok(()),
        NormalizationMethod::Stretch => {
            let (min_val, max_val) = find_min_max(image)?;
            if min_val == max_val {
                return Err(ImgProcError::UniformContrast(min_val));
            }
            let slope = 1.0 / (max_val - min_val);
            image
                .as_slice_mut()
                .iter_mut()
                .for_each(|px| *px = slope * (*px - min_val));
            Ok(())
        }
        NormalizationMethod::Cutoff => {
            image
                .as_slice_mut()
                .iter_mut()
                .for_each(|px| *px = px.clamp(0.0, 1.0));
            Ok(())
        }
    }
}
