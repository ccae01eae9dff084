use konvo_image::{Image, ImageSize};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::error::ImgProcError;

/// Extract the square neighborhood centered at a given pixel.
///
/// The unit of work consumed by neighborhood operations: returns the
/// `size x size` region whose center pixel is `center = (row, col)`.
///
/// No bounds-checking against the image edges is performed; callers are
/// responsible for only requesting neighborhoods that are fully in-bounds,
/// e.g. by operating on a padded image. An out-of-range request panics like
/// any slice index.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `center` - The `(row, col)` position of the neighborhood center.
/// * `size` - The neighborhood side length, must be odd.
///
/// # Errors
///
/// Returns an error if `size` is even (no unique center pixel).
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::crop::extract_sub_image;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0, 1, 2, 3,
///     4, 5, 6, 7,
///     8, 9, 10, 11,
///     12, 13, 14, 15,
/// ]).unwrap();
///
/// let sub = extract_sub_image(&image, (1, 1), 3).unwrap();
/// assert_eq!(sub.as_slice(), &[0, 1, 2, 4, 5, 6, 8, 9, 10]);
/// ```
pub fn extract_sub_image<T, const C: usize>(
    src: &Image<T, C>,
    center: (usize, usize),
    size: usize,
) -> Result<Image<T, C>, ImgProcError>
where
    T: Copy + Default + Send + Sync,
{
    if size % 2 == 0 {
        return Err(ImgProcError::EvenKernelSize(size));
    }

    let half = size / 2;
    let row_start = center.0 - half;
    let col_start = center.1 - half;

    let mut dst = Image::<T, C>::from_size_val(
        ImageSize {
            width: size,
            height: size,
        },
        T::default(),
    )?;

    let src_cols = src.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(size * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            let offset = ((row_start + i) * src_cols + col_start) * C;
            dst_row.copy_from_slice(&src.as_slice()[offset..offset + size * C]);
        });

    Ok(dst)
}
