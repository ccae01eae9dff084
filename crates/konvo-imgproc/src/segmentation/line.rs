use konvo_image::Image;

use crate::error::ImgProcError;
use crate::filter::{convolution_2d, Kernel};
use crate::normalize::NormalizationMethod;
use crate::padding::PaddingMode;
use crate::threshold::thresholding;

/// The four orientations probed by line detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineOrientation {
    /// A one-pixel-wide horizontal line.
    Horizontal,
    /// A one-pixel-wide line at +45 degrees.
    PlusFortyFive,
    /// A one-pixel-wide vertical line.
    Vertical,
    /// A one-pixel-wide line at -45 degrees.
    MinusFortyFive,
}

impl LineOrientation {
    /// All orientations in detection order.
    pub const ALL: [LineOrientation; 4] = [
        LineOrientation::Horizontal,
        LineOrientation::PlusFortyFive,
        LineOrientation::Vertical,
        LineOrientation::MinusFortyFive,
    ];

    /// The fixed 3x3 detection kernel for this orientation.
    pub const fn kernel(&self) -> [[f32; 3]; 3] {
        match self {
            LineOrientation::Horizontal => {
                [[-1.0, -1.0, -1.0], [2.0, 2.0, 2.0], [-1.0, -1.0, -1.0]]
            }
            LineOrientation::PlusFortyFive => {
                [[2.0, -1.0, -1.0], [-1.0, 2.0, -1.0], [-1.0, -1.0, 2.0]]
            }
            LineOrientation::Vertical => {
                [[-1.0, 2.0, -1.0], [-1.0, 2.0, -1.0], [-1.0, 2.0, -1.0]]
            }
            LineOrientation::MinusFortyFive => {
                [[-1.0, -1.0, 2.0], [-1.0, 2.0, -1.0], [2.0, -1.0, -1.0]]
            }
        }
    }
}

/// Detect one-pixel-wide lines along the four fixed orientations.
///
/// Each orientation kernel is convolved over the image, the absolute response
/// is thresholded independently, and the four labeled binary images are
/// returned without merging; callers inspect whichever orientations matter.
/// Higher thresholds keep only higher-contrast lines.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `padding_mode` - The border policy used for the convolutions.
/// * `threshold_value` - The cut value applied to each response magnitude.
///
/// # Errors
///
/// Returns an error if an internal allocation fails on a malformed image.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::padding::PaddingMode;
/// use konvo_imgproc::segmentation::{line_detection, LineOrientation};
///
/// // a vertical line through a 5x5 image
/// let mut data = vec![0.0f32; 25];
/// for row in 0..5 {
///     data[row * 5 + 2] = 1.0;
/// }
/// let image = Image::<f32, 1>::new(ImageSize { width: 5, height: 5 }, data).unwrap();
///
/// let responses = line_detection(&image, PaddingMode::Zero, 5.0).unwrap();
/// let (orientation, vertical) = &responses[2];
/// assert_eq!(*orientation, LineOrientation::Vertical);
/// assert_eq!(vertical.get([2, 2, 0]), Some(&1.0));
/// ```
pub fn line_detection<const C: usize>(
    src: &Image<f32, C>,
    padding_mode: PaddingMode,
    threshold_value: f32,
) -> Result<Vec<(LineOrientation, Image<f32, C>)>, ImgProcError> {
    let mut responses = Vec::with_capacity(LineOrientation::ALL.len());

    for orientation in LineOrientation::ALL {
        let kernel = Kernel::from_matrix(&orientation.kernel())?;

        let mut filtered = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
        convolution_2d(
            src,
            &mut filtered,
            &kernel,
            padding_mode,
            NormalizationMethod::Unchanged,
        )?;

        filtered
            .as_slice_mut()
            .iter_mut()
            .for_each(|px| *px = px.abs());

        let mut binary = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
        thresholding(&filtered, &mut binary, threshold_value)?;

        responses.push((orientation, binary));
    }

    Ok(responses)
}
