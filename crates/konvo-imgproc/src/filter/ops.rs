use konvo_image::Image;

use super::convolution::convolution_2d;
use super::kernels::{generate_filter, FilterSpec, Kernel};
use crate::error::ImgProcError;
use crate::normalize::NormalizationMethod;
use crate::padding::PaddingMode;

/// 3x3 Laplacian kernel over the 4-connected neighborhood.
const LAPLACIAN_CROSS: [[f32; 3]; 3] = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];

/// 3x3 Laplacian kernel including the diagonal terms.
const LAPLACIAN_FULL: [[f32; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, -8.0, 1.0], [1.0, 1.0, 1.0]];

/// Blur an image with a uniform averaging filter.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The kernel side length, must be odd.
/// * `padding_mode` - The border policy used to extend the source.
///
/// # Errors
///
/// Returns an error if the kernel size is even or the shapes mismatch.
pub fn box_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_size: usize,
    padding_mode: PaddingMode,
) -> Result<(), ImgProcError> {
    let kernel = generate_filter(&FilterSpec::Box { size: kernel_size })?;
    convolution_2d(src, dst, &kernel, padding_mode, NormalizationMethod::Unchanged)
}

/// Blur an image with a Gaussian filter.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The kernel side length, must be odd.
/// * `sigma` - The spread of the Gaussian, must be positive.
/// * `padding_mode` - The border policy used to extend the source.
///
/// # Errors
///
/// Returns an error if the kernel size is even, the sigma is not positive or
/// the shapes mismatch.
pub fn gaussian_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_size: usize,
    sigma: f32,
    padding_mode: PaddingMode,
) -> Result<(), ImgProcError> {
    let kernel = generate_filter(&FilterSpec::Gaussian {
        size: kernel_size,
        k: 1.0,
        sigma,
    })?;
    convolution_2d(src, dst, &kernel, padding_mode, NormalizationMethod::Unchanged)
}

/// Compute the Laplacian (second derivative) response of an image.
///
/// The raw response is returned unbounded; it carries both signs and is
/// typically followed by an absolute value and a threshold, as in
/// isolated-point detection.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `padding_mode` - The border policy used to extend the source.
/// * `include_diagonal_terms` - Use the 8-neighbor kernel instead of the
///   4-connected one.
///
/// # Errors
///
/// Returns an error if the shapes mismatch.
pub fn laplacian<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    padding_mode: PaddingMode,
    include_diagonal_terms: bool,
) -> Result<(), ImgProcError> {
    let kernel = if include_diagonal_terms {
        Kernel::from_matrix(&LAPLACIAN_FULL)?
    } else {
        Kernel::from_matrix(&LAPLACIAN_CROSS)?
    };
    convolution_2d(src, dst, &kernel, padding_mode, NormalizationMethod::Unchanged)
}
