use konvo_image::{Image, ImageError, ImageSize};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::error::ImgProcError;
use crate::filter::kernels::Kernel;
use crate::normalize::{self, NormalizationMethod};
use crate::padding::{pad_image, PaddingMode};

/// Convolve an image with a square kernel.
///
/// Pads the source by the kernel half-width under `padding_mode`, computes
/// the elementwise product-sum of the kernel with every pixel neighborhood
/// (independently per channel), and routes the raw result through the
/// requested normalization before returning. The output shape equals the
/// input shape.
///
/// The kernel squareness and odd-size contract is enforced by [`Kernel`]
/// at construction time.
///
/// This is the dominant cost center of the toolkit, O(H * W * K^2) per
/// channel; the output rows are computed in parallel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The convolution kernel.
/// * `padding_mode` - The border policy used to extend the source.
/// * `normalization` - The normalization applied to the raw result.
///
/// # Errors
///
/// Returns an error if `dst` does not match the shape of `src`, or if the
/// requested normalization fails (stretching a constant result).
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::filter::{convolution_2d, generate_filter, FilterSpec};
/// use konvo_imgproc::normalize::NormalizationMethod;
/// use konvo_imgproc::padding::PaddingMode;
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 3, height: 3 },
///     vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
/// ).unwrap();
/// let mut filtered = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// let kernel = generate_filter(&FilterSpec::Box { size: 3 }).unwrap();
/// convolution_2d(
///     &image,
///     &mut filtered,
///     &kernel,
///     PaddingMode::Zero,
///     NormalizationMethod::Unchanged,
/// ).unwrap();
///
/// assert!((filtered.get([1, 1, 0]).unwrap() - 1.0 / 9.0).abs() < 1e-6);
/// assert_eq!(filtered.get([0, 0, 0]), Some(&0.0));
/// ```
pub fn convolution_2d<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel: &Kernel,
    padding_mode: PaddingMode,
    normalization: NormalizationMethod,
) -> Result<(), ImgProcError> {
    if src.size() != dst.size() {
        return Err(ImgProcError::ImageError(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )));
    }

    let margin = kernel.half();
    let mut padded = Image::<f32, C>::from_size_val(
        ImageSize {
            width: src.width() + 2 * margin,
            height: src.height() + 2 * margin,
        },
        0.0,
    )?;
    pad_image(src, &mut padded, padding_mode, margin)?;

    let ksize = kernel.size();
    let kernel_data = kernel.as_slice();
    let padded_cols = padded.cols();
    let padded_data = padded.as_slice();
    let cols = src.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .enumerate()
        .for_each(|(r, dst_row)| {
            dst_row
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(c, dst_pixel)| {
                    // the window top-left in padded coordinates is (r, c)
                    let mut sum = [0.0f32; C];
                    for kr in 0..ksize {
                        for kc in 0..ksize {
                            let weight = kernel_data[kr * ksize + kc];
                            let offset = ((r + kr) * padded_cols + (c + kc)) * C;
                            for ch in 0..C {
                                sum[ch] += padded_data[offset + ch] * weight;
                            }
                        }
                    }
                    dst_pixel.copy_from_slice(&sum);
                });
        });

    normalize::normalize_in_place(dst, normalization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels::{generate_filter, FilterSpec};
    use konvo_image::ImageSize;

    #[test]
    fn test_convolution_shape_preserved() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 7,
                height: 4,
            },
            0.5,
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        for size in [1, 3, 5] {
            let kernel = generate_filter(&FilterSpec::Box { size })?;
            convolution_2d(
                &src,
                &mut dst,
                &kernel,
                PaddingMode::Zero,
                NormalizationMethod::Unchanged,
            )?;
            assert_eq!(dst.size(), src.size());
        }

        Ok(())
    }

    #[test]
    fn test_box_impulse_response() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        let kernel = generate_filter(&FilterSpec::Box { size: 3 })?;
        convolution_2d(
            &src,
            &mut dst,
            &kernel,
            PaddingMode::Zero,
            NormalizationMethod::Unchanged,
        )?;

        for &px in dst.as_slice() {
            assert!((px - 1.0 / 9.0).abs() < 1e-6);
        }

        Ok(())
    }

    #[test]
    fn test_constant_image_interior_unchanged() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 5,
                height: 5,
            },
            0.7,
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        let kernel = generate_filter(&FilterSpec::Gaussian {
            size: 3,
            k: 1.0,
            sigma: 1.0,
        })?;
        convolution_2d(
            &src,
            &mut dst,
            &kernel,
            PaddingMode::Zero,
            NormalizationMethod::Unchanged,
        )?;

        // interior pixels see the full unit-sum kernel; the border band is
        // darkened by the zero padding
        for r in 1..4 {
            for c in 1..4 {
                assert!((dst.get([r, c, 0]).unwrap() - 0.7).abs() < 1e-6);
            }
        }
        assert!(*dst.get([0, 0, 0]).unwrap() < 0.7);

        Ok(())
    }

    #[test]
    fn test_convolution_rgb_channels_independent() -> Result<(), ImgProcError> {
        let src = Image::<f32, 3>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![1.0, 0.0, 2.0, 1.0, 0.0, 2.0, 1.0, 0.0, 2.0],
        )?;
        let mut dst = Image::<f32, 3>::from_size_val(src.size(), 0.0)?;

        let kernel = Kernel::new(vec![1.0], 1)?;
        convolution_2d(
            &src,
            &mut dst,
            &kernel,
            PaddingMode::Zero,
            NormalizationMethod::Unchanged,
        )?;

        assert_eq!(dst.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn test_convolution_dst_size_mismatch() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0.0,
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 5,
                height: 4,
            },
            0.0,
        )?;

        let kernel = generate_filter(&FilterSpec::Box { size: 3 })?;
        let res = convolution_2d(
            &src,
            &mut dst,
            &kernel,
            PaddingMode::Zero,
            NormalizationMethod::Unchanged,
        );
        assert!(res.is_err());

        Ok(())
    }
}
