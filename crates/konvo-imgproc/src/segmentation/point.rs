use konvo_image::Image;

use crate::error::ImgProcError;
use crate::filter::laplacian;
use crate::padding::PaddingMode;
use crate::threshold::thresholding;

/// Detect isolated points in an image.
///
/// Applies the fixed Laplacian kernel, takes the absolute value of the
/// response and thresholds it. A pixel survives when its local
/// second-derivative magnitude exceeds the cut value, flagging points that
/// stand out from all of their immediate neighbors.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination binary image with shape (H, W, C).
/// * `padding_mode` - The border policy used for the convolution.
/// * `include_diagonal_terms` - Use the 8-neighbor Laplacian kernel.
/// * `threshold_value` - The cut value applied to the response magnitude.
///
/// # Errors
///
/// Returns an error if the shapes mismatch.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::padding::PaddingMode;
/// use konvo_imgproc::segmentation::isolated_point_detection;
///
/// let mut data = vec![0.0f32; 25];
/// data[12] = 1.0;
/// let image = Image::<f32, 1>::new(ImageSize { width: 5, height: 5 }, data).unwrap();
/// let mut points = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// isolated_point_detection(&image, &mut points, PaddingMode::Zero, true, 4.0).unwrap();
/// assert_eq!(points.get([2, 2, 0]), Some(&1.0));
/// assert_eq!(points.get([0, 0, 0]), Some(&0.0));
/// ```
pub fn isolated_point_detection<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    padding_mode: PaddingMode,
    include_diagonal_terms: bool,
    threshold_value: f32,
) -> Result<(), ImgProcError> {
    let mut response = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
    laplacian(src, &mut response, padding_mode, include_diagonal_terms)?;

    response
        .as_slice_mut()
        .iter_mut()
        .for_each(|px| *px = px.abs());

    thresholding(&response, dst, threshold_value)
}
