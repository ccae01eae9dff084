use std::str::FromStr;

use konvo_image::{Image, ImageError};

use crate::error::ImgProcError;

/// A border policy for spatial padding.
///
/// The padded buffer is zero-initialized before the source image is copied
/// into its centered region, so any mode that does not overwrite the border
/// leaves it at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaddingMode {
    /// Extend the border with zero-valued pixels.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    #[default]
    Zero,
}

impl FromStr for PaddingMode {
    type Err = std::convert::Infallible;

    /// Parse a padding mode name, falling back to [`PaddingMode::Zero`] with
    /// a warning when the name is not recognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" | "zero_padding" => Ok(PaddingMode::Zero),
            other => {
                log::warn!("unrecognized padding mode '{other}', falling back to zero padding");
                Ok(PaddingMode::Zero)
            }
        }
    }
}

/// Pad the borders of an image by `padding_size` pixels on all four sides.
///
/// The source image lands in the center of the destination; the border is
/// filled according to `mode`.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image with shape `(H + 2 * padding_size, W + 2 * padding_size, C)`.
/// * `mode` - The border policy defined in [`PaddingMode`].
/// * `padding_size` - The border width in pixels, usually the kernel half-width.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match the expected padded size.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::padding::{pad_image, PaddingMode};
///
/// let src = Image::<f32, 1>::new(
///     ImageSize { width: 2, height: 2 },
///     vec![1.0, 2.0, 3.0, 4.0],
/// ).unwrap();
///
/// let mut dst = Image::<f32, 1>::from_size_val(
///     ImageSize { width: 4, height: 4 }, 0.0,
/// ).unwrap();
///
/// pad_image(&src, &mut dst, PaddingMode::Zero, 1).unwrap();
///
/// assert_eq!(dst.get([0, 0, 0]), Some(&0.0));
/// assert_eq!(dst.get([1, 1, 0]), Some(&1.0));
/// ```
pub fn pad_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    mode: PaddingMode,
    padding_size: usize,
) -> Result<(), ImgProcError>
where
    T: Copy + Default + Send + Sync,
{
    if dst.width() != src.width() + 2 * padding_size
        || dst.height() != src.height() + 2 * padding_size
    {
        return Err(ImgProcError::ImageError(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            src.width() + 2 * padding_size,
            src.height() + 2 * padding_size,
        )));
    }

    let old_stride = src.width() * C;
    let new_stride = dst.width() * C;

    let old_data = src.as_slice();
    let new_data = dst.as_slice_mut();

    new_data.fill(T::default());

    // copy the source image into the center of the padded buffer
    let row_offset = padding_size * new_stride + padding_size * C;
    for (src_row, dst_row) in old_data
        .chunks_exact(old_stride)
        .zip(new_data[row_offset..].chunks_exact_mut(new_stride))
    {
        dst_row[..old_stride].copy_from_slice(src_row);
    }

    match mode {
        // the border is already zero by construction
        PaddingMode::Zero => {}
    }

    Ok(())
}
