use konvo_image::ImageError;

/// Errors produced by the image processing operations.
#[derive(thiserror::Error, Debug)]
pub enum ImgProcError {
    /// Error coming from the image container.
    #[error(transparent)]
    ImageError(#[from] ImageError),

    /// A kernel, filter or sub-image size must be odd to have a center pixel.
    #[error("size must be an odd number to have a center pixel, got {0}")]
    EvenKernelSize(usize),

    /// A convolution kernel must be square.
    #[error("kernel must be square, got {0}x{1}")]
    NonSquareKernel(usize, usize),

    /// The Gaussian spread parameter must be positive.
    #[error("gaussian sigma must be positive, got {0}")]
    InvalidSigma(f32),

    /// Contrast stretching is undefined on a constant image.
    #[error("cannot stretch the contrast of a constant image (min == max == {0})")]
    UniformContrast(f32),

    /// The iterative global threshold search did not converge.
    #[error("global threshold did not converge after {0} iterations")]
    ThresholdNotConverged(usize),

    /// A threshold partition left one side without any pixels.
    #[error("partition at threshold {0} left an empty pixel group")]
    EmptyPartition(f32),

    /// Salt and pepper ratios must be probabilities summing to at most one.
    #[error("invalid noise ratios: pepper {0} + salt {1} must stay within [0, 1]")]
    InvalidNoiseRatio(f32, f32),
}
