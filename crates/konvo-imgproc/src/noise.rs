use konvo_image::{Image, ImageError};
use rand::Rng;

use crate::error::ImgProcError;

/// Add salt and pepper (white and black) pixels to an image at random.
///
/// Each pixel position is independently turned black with probability
/// `pepper`, white with probability `salt`, or copied unchanged. For color
/// images the decision applies to all channels of the pixel.
///
/// # Arguments
///
/// * `src` - The image to distort, intensities in `[0, 1]`.
/// * `dst` - The distorted output of identical shape.
/// * `pepper` - Probability of a pixel turning black (0.0).
/// * `salt` - Probability of a pixel turning white (1.0).
/// * `rng` - The random source; seed it for reproducible noise.
///
/// # Errors
///
/// Returns an error if the ratios are not probabilities summing to at most
/// one, or if the shapes mismatch.
///
/// # Example
///
/// ```
/// use konvo_image::{Image, ImageSize};
/// use konvo_imgproc::noise::salt_and_pepper;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let image = Image::<f32, 1>::from_size_val(
///     ImageSize { width: 16, height: 16 }, 0.5,
/// ).unwrap();
/// let mut noisy = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// salt_and_pepper(&image, &mut noisy, 0.05, 0.05, &mut rng).unwrap();
///
/// assert!(noisy.as_slice().iter().all(|&v| v == 0.0 || v == 0.5 || v == 1.0));
/// ```
pub fn salt_and_pepper<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    pepper: f32,
    salt: f32,
    rng: &mut impl Rng,
) -> Result<(), ImgProcError> {
    if !(0.0..=1.0).contains(&pepper) || !(0.0..=1.0).contains(&salt) || pepper + salt > 1.0 {
        return Err(ImgProcError::InvalidNoiseRatio(pepper, salt));
    }

    if src.size() != dst.size() {
        return Err(ImgProcError::ImageError(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )));
    }

    let mut pepper_pixels = 0usize;
    let mut salt_pixels = 0usize;

    for (src_pixel, dst_pixel) in src
        .as_slice()
        .chunks_exact(C)
        .zip(dst.as_slice_mut().chunks_exact_mut(C))
    {
        let draw: f32 = rng.random();
        if draw < pepper {
            dst_pixel.fill(0.0);
            pepper_pixels += 1;
        } else if draw < pepper + salt {
            dst_pixel.fill(1.0);
            salt_pixels += 1;
        } else {
            dst_pixel.copy_from_slice(src_pixel);
        }
    }

    let total = src.width() * src.height();
    log::info!(
        "salt and pepper noise: {salt_pixels} salt and {pepper_pixels} pepper pixels over {total}"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use konvo_image::{Image, ImageSize};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_salt_and_pepper_codomain() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 32,
                height: 32,
            },
            0.5,
        )?;
        let mut dst = Image::from_size_val(src.size(), 0.0)?;

        let mut rng = StdRng::seed_from_u64(7);
        salt_and_pepper(&src, &mut dst, 0.1, 0.1, &mut rng)?;

        assert!(dst
            .as_slice()
            .iter()
            .all(|&v| v == 0.0 || v == 0.5 || v == 1.0));

        // with a 10% rate each over 1024 pixels, both kinds appear
        assert!(dst.as_slice().iter().any(|&v| v == 0.0));
        assert!(dst.as_slice().iter().any(|&v| v == 1.0));

        Ok(())
    }

    #[test]
    fn test_salt_and_pepper_zero_rates_copies() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.1, 0.2, 0.3, 0.4],
        )?;
        let mut dst = Image::from_size_val(src.size(), 0.0)?;

        let mut rng = StdRng::seed_from_u64(0);
        salt_and_pepper(&src, &mut dst, 0.0, 0.0, &mut rng)?;

        assert_eq!(dst.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn test_salt_and_pepper_rgb_pixel_wise() -> Result<(), ImgProcError> {
        let src = Image::<f32, 3>::from_size_val(
            ImageSize {
                width: 16,
                height: 16,
            },
            0.5,
        )?;
        let mut dst = Image::from_size_val(src.size(), 0.0)?;

        let mut rng = StdRng::seed_from_u64(3);
        salt_and_pepper(&src, &mut dst, 0.2, 0.2, &mut rng)?;

        // the decision applies to whole pixels, so channels agree
        for px in dst.as_slice().chunks_exact(3) {
            assert!(px[0] == px[1] && px[1] == px[2]);
        }

        Ok(())
    }

    #[test]
    fn test_salt_and_pepper_invalid_ratio() -> Result<(), ImgProcError> {
        let src = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.5,
        )?;
        let mut dst = Image::from_size_val(src.size(), 0.0)?;

        let mut rng = StdRng::seed_from_u64(0);
        let res = salt_and_pepper(&src, &mut dst, 0.7, 0.6, &mut rng);
        assert!(matches!(res, Err(ImgProcError::InvalidNoiseRatio(_, _))));

        Ok(())
    }
}
