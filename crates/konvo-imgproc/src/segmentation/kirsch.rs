use konvo_image::Image;

use crate::error::ImgProcError;
use crate::filter::{convolution_2d, Kernel};
use crate::normalize::NormalizationMethod;
use crate::padding::PaddingMode;

/// The eight compass directions probed by Kirsch edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassDirection {
    /// North.
    North,
    /// North-west.
    NorthWest,
    /// West.
    West,
    /// South-west.
    SouthWest,
    /// South.
    South,
    /// South-east.
    SouthEast,
    /// East.
    East,
    /// North-east.
    NorthEast,
}

impl CompassDirection {
    /// All compass directions in detection order.
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::North,
        CompassDirection::NorthWest,
        CompassDirection::West,
        CompassDirection::SouthWest,
        CompassDirection::South,
        CompassDirection::SouthEast,
        CompassDirection::East,
        CompassDirection::NorthEast,
    ];

    /// The fixed 3x3 Kirsch kernel for this direction.
    pub const fn kernel(&self) -> [[f32; 3]; 3] {
        match self {
            CompassDirection::North => {
                [[-3.0, -3.0, 5.0], [-3.0, 0.0, 5.0], [-3.0, -3.0, 5.0]]
            }
            CompassDirection::NorthWest => {
                [[-3.0, 5.0, 5.0], [-3.0, 0.0, 5.0], [-3.0, -3.0, -3.0]]
            }
            CompassDirection::West => {
                [[5.0, 5.0, 5.0], [-3.0, 0.0, -3.0], [-3.0, -3.0, -3.0]]
            }
            CompassDirection::SouthWest => {
                [[5.0, 5.0, -3.0], [5.0, 0.0, -3.0], [-3.0, -3.0, -3.0]]
            }
            CompassDirection::South => {
                [[5.0, -3.0, -3.0], [5.0, 0.0, -3.0], [5.0, -3.0, -3.0]]
            }
            CompassDirection::SouthEast => {
                [[-3.0, -3.0, -3.0], [5.0, 0.0, -3.0], [5.0, 5.0, -3.0]]
            }
            CompassDirection::East => {
                [[-3.0, -3.0, -3.0], [-3.0, 0.0, -3.0], [5.0, 5.0, 5.0]]
            }
            CompassDirection::NorthEast => {
                [[-3.0, -3.0, -3.0], [-3.0, 0.0, 5.0], [-3.0, 5.0, 5.0]]
            }
        }
    }
}

/// Perform Kirsch edge detection on an image.
///
/// The image is convolved with each of the eight compass kernels (no
/// normalization or thresholding of the intermediate results). A per-pixel
/// running maximum is folded over the positive responses starting from zero,
/// and each direction's output keeps its raw response only where it does not
/// exceed that maximum; ties all retain their value. The union of the eight
/// sparse directional images approximates the total edge map.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `padding_mode` - The border policy used for the convolutions.
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
/// use konvo_imgproc::segmentation::{kirsch_edge_detection, CompassDirection};
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 4, height: 4 },
///     vec![
///         0.0, 0.0, 1.0, 1.0,
///         0.0, 0.0, 1.0, 1.0,
///         0.0, 0.0, 1.0, 1.0,
///         0.0, 0.0, 1.0, 1.0,
///     ],
/// ).unwrap();
///
/// let responses = kirsch_edge_detection(&image, PaddingMode::Zero).unwrap();
/// assert_eq!(responses.len(), 8);
/// assert_eq!(responses[0].0, CompassDirection::North);
/// ```
pub fn kirsch_edge_detection<const C: usize>(
    src: &Image<f32, C>,
    padding_mode: PaddingMode,
) -> Result<Vec<(CompassDirection, Image<f32, C>)>, ImgProcError> {
    let mut filtered = Vec::with_capacity(CompassDirection::ALL.len());

    for direction in CompassDirection::ALL {
        let kernel = Kernel::from_matrix(&direction.kernel())?;

        let mut response = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
        convolution_2d(
            src,
            &mut response,
            &kernel,
            padding_mode,
            NormalizationMethod::Unchanged,
        )?;

        filtered.push((direction, response));
    }

    // fold the per-pixel maximum over the positive responses
    let mut max_response = vec![0.0f32; src.as_slice().len()];
    for (_, response) in &filtered {
        max_response
            .iter_mut()
            .zip(response.as_slice().iter())
            .for_each(|(max_px, &px)| {
                if px > *max_px {
                    *max_px = px;
                }
            });
    }

    // a direction keeps its raw value only where it is not dominated
    for (_, response) in &mut filtered {
        response
            .as_slice_mut()
            .iter_mut()
            .zip(max_response.iter())
            .for_each(|(px, &max_px)| {
                if *px > max_px {
                    *px = 0.0;
                }
            });
    }

    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use konvo_image::{Image, ImageSize};

    fn vertical_step_4x4() -> Result<Image<f32, 1>, ImgProcError> {
        #[rustfmt::skip]
        let data = vec![
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
        ];
        Ok(Image::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            data,
        )?)
    }

    #[test]
    fn test_kirsch_labels_and_shapes() -> Result<(), ImgProcError> {
        let src = vertical_step_4x4()?;

        let responses = kirsch_edge_detection(&src, PaddingMode::Zero)?;

        assert_eq!(responses.len(), 8);
        let labels: Vec<CompassDirection> = responses.iter().map(|(d, _)| *d).collect();
        assert_eq!(labels, CompassDirection::ALL);

        for (_, image) in &responses {
            assert_eq!(image.size(), src.size());
        }

        Ok(())
    }

    #[test]
    fn test_kirsch_kernels_sum_to_zero() {
        for direction in CompassDirection::ALL {
            let sum: f32 = direction.kernel().iter().flatten().sum();
            assert_eq!(sum, 0.0);
        }
    }

    #[test]
    fn test_kirsch_max_self_consistency() -> Result<(), ImgProcError> {
        let src = vertical_step_4x4()?;

        let responses = kirsch_edge_detection(&src, PaddingMode::Zero)?;

        // the 8 kernels sum to the zero kernel, so at every pixel the maximum
        // directional response is non-negative and survives the
        // non-domination rule: the union of the outputs reconstructs the
        // running maximum
        let len = src.as_slice().len();
        for i in 0..len {
            let max_out = responses
                .iter()
                .map(|(_, image)| image.as_slice()[i])
                .fold(f32::NEG_INFINITY, f32::max);
            assert!(max_out >= 0.0);

            for (_, image) in &responses {
                assert!(image.as_slice()[i] <= max_out);
            }
        }

        Ok(())
    }

    #[test]
    fn test_kirsch_step_edge_strongest_across_step() -> Result<(), ImgProcError> {
        let src = vertical_step_4x4()?;

        let responses = kirsch_edge_detection(&src, PaddingMode::Zero)?;

        // the North kernel (positive weights on its right column) responds
        // strongest on the dark side of a dark-to-bright vertical step
        let north = &responses[0].1;
        assert!(*north.get([1, 1, 0]).unwrap() > 0.0);

        Ok(())
    }
}
