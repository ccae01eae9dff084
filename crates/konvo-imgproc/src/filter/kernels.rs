use crate::error::ImgProcError;

/// A square convolution kernel with an odd side length.
///
/// The odd-size and squareness invariants are enforced at construction so a
/// kernel always has a unique center cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f32>,
    size: usize,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is even, or if the data length does not
    /// form a `size x size` matrix.
    pub fn new(data: Vec<f32>, size: usize) -> Result<Self, ImgProcError> {
        if size % 2 == 0 {
            return Err(ImgProcError::EvenKernelSize(size));
        }
        if data.len() != size * size {
            return Err(ImgProcError::NonSquareKernel(data.len() / size.max(1), size));
        }
        Ok(Self { data, size })
    }

    /// Create a kernel from a fixed square matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if `K` is even.
    pub fn from_matrix<const K: usize>(matrix: &[[f32; K]; K]) -> Result<Self, ImgProcError> {
        let data = matrix.iter().flatten().copied().collect();
        Self::new(data, K)
    }

    /// The kernel side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The kernel half-width, i.e. the padding margin it requires.
    pub fn half(&self) -> usize {
        self.size / 2
    }

    /// The kernel weights as a row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The sum of all kernel weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

/// Parametric filter families for [`generate_filter`].
///
/// Each variant carries only the parameters relevant to it, so a Gaussian
/// kernel cannot be requested without its gain and spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterSpec {
    /// Uniform averaging filter: all-ones matrix divided by its sum.
    Box {
        /// The kernel side length, must be odd.
        size: usize,
    },
    /// Gaussian filter: `k * exp(-(dx^2 + dy^2) / (2 * sigma^2))` about the
    /// center cell, divided by the total sum.
    Gaussian {
        /// The kernel side length, must be odd.
        size: usize,
        /// The gain applied to every cell before normalization.
        k: f32,
        /// The spread of the Gaussian, must be positive.
        sigma: f32,
    },
}

/// Generate a normalized kernel for the requested filter family.
///
/// Box and Gaussian kernels are normalized so their weights sum to 1.
///
/// # Errors
///
/// Returns an error if the requested size is even, or if the Gaussian spread
/// is not positive.
///
/// # Example
///
/// ```
/// use konvo_imgproc::filter::{generate_filter, FilterSpec};
///
/// let kernel = generate_filter(&FilterSpec::Box { size: 3 }).unwrap();
/// assert_eq!(kernel.size(), 3);
/// assert!((kernel.sum() - 1.0).abs() < 1e-6);
/// ```
pub fn generate_filter(spec: &FilterSpec) -> Result<Kernel, ImgProcError> {
    match *spec {
        FilterSpec::Box { size } => {
            let count = size * size;
            Kernel::new(vec![1.0 / count as f32; count], size)
        }
        FilterSpec::Gaussian { size, k, sigma } => {
            if size % 2 == 0 {
                return Err(ImgProcError::EvenKernelSize(size));
            }
            if sigma <= 0.0 {
                return Err(ImgProcError::InvalidSigma(sigma));
            }

            let center = (size / 2) as f32;
            let sigma_sq = sigma * sigma;

            let mut data = Vec::with_capacity(size * size);
            for row in 0..size {
                for col in 0..size {
                    let dy = row as f32 - center;
                    let dx = col as f32 - center;
                    data.push(k * (-(dx * dx + dy * dy) / (2.0 * sigma_sq)).exp());
                }
            }

            let norm = data.iter().sum::<f32>();
            data.iter_mut().for_each(|w| *w /= norm);

            Kernel::new(data, size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_filter() -> Result<(), ImgProcError> {
        let kernel = generate_filter(&FilterSpec::Box { size: 3 })?;

        assert_eq!(kernel.size(), 3);
        assert_eq!(kernel.half(), 1);
        assert!(kernel.as_slice().iter().all(|&w| (w - 1.0 / 9.0).abs() < 1e-6));
        assert!((kernel.sum() - 1.0).abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn test_gaussian_filter() -> Result<(), ImgProcError> {
        let kernel = generate_filter(&FilterSpec::Gaussian {
            size: 5,
            k: 1.0,
            sigma: 1.0,
        })?;

        assert!((kernel.sum() - 1.0).abs() < 1e-5);

        // the center cell carries the largest weight
        let center = kernel.as_slice()[2 * 5 + 2];
        assert!(kernel.as_slice().iter().all(|&w| w <= center));

        // radially symmetric
        let s = kernel.as_slice();
        assert!((s[2 * 5 + 1] - s[2 * 5 + 3]).abs() < 1e-6);
        assert!((s[5 + 2] - s[3 * 5 + 2]).abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn test_even_size_rejected() {
        let res = generate_filter(&FilterSpec::Box { size: 4 });
        assert!(matches!(res, Err(ImgProcError::EvenKernelSize(4))));

        let res = generate_filter(&FilterSpec::Gaussian {
            size: 2,
            k: 1.0,
            sigma: 1.0,
        });
        assert!(matches!(res, Err(ImgProcError::EvenKernelSize(2))));
    }

    #[test]
    fn test_invalid_sigma_rejected() {
        let res = generate_filter(&FilterSpec::Gaussian {
            size: 3,
            k: 1.0,
            sigma: 0.0,
        });
        assert!(matches!(res, Err(ImgProcError::InvalidSigma(_))));
    }

    #[test]
    fn test_kernel_new_invalid_shape() {
        let res = Kernel::new(vec![0.0; 6], 3);
        assert!(matches!(res, Err(ImgProcError::NonSquareKernel(_, _))));
    }

    #[test]
    fn test_kernel_from_matrix() -> Result<(), ImgProcError> {
        let kernel = Kernel::from_matrix(&[[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]])?;
        assert_eq!(kernel.size(), 3);
        assert_eq!(kernel.sum(), 0.0);

        Ok(())
    }
}
