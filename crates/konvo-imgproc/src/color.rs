use konvo_image::{Image, ImageError};

use crate::error::ImgProcError;
use crate::parallel;

/// The RGB weights for the grayscale conversion (NTSC formula).
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

/// Convert an RGB image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The weights closely represent the average person's relative perception of
/// the brightness of red, green and blue light.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output grayscale image.
///
/// # Errors
///
/// Returns an error if `dst` does not match the size of `src`.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::color::gray_from_rgb;
///
/// let image = Image::<f32, 3>::from_size_val(
///     ImageSize { width: 4, height: 5 }, 0.0,
/// ).unwrap();
///
/// let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// gray_from_rgb(&image, &mut gray).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.size().width, 4);
/// ```
pub fn gray_from_rgb(src: &Image<f32, 3>, dst: &mut Image<f32, 1>) -> Result<(), ImgProcError> {
    if src.size() != dst.size() {
        return Err(ImgProcError::ImageError(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0];
        let g = src_pixel[1];
        let b = src_pixel[2];
        dst_pixel[0] = RW * r + GW * g + BW * b;
    });

    Ok(())
}

/// Convert a grayscale image to RGB by replicating the value across the three
/// channels.
///
/// # Errors
///
/// Returns an error if `dst` does not match the size of `src`.
pub fn rgb_from_gray(src: &Image<f32, 1>, dst: &mut Image<f32, 3>) -> Result<(), ImgProcError> {
    if src.size() != dst.size() {
        return Err(ImgProcError::ImageError(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.fill(src_pixel[0]);
    });

    Ok(())
}
