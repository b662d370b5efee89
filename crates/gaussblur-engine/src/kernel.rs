use crate::error::FilterError;

/// A normalized 1D Gaussian kernel derived from an integer radius.
///
/// The kernel has `2 * radius + 1` weights, symmetric around the center tap,
/// summing to 1.0. The standard deviation is fixed at `radius / 3.0`; there is
/// no independent sigma parameter. Weights are stored in `f64` because the
/// convolution accumulates in double precision.
///
/// # Examples
///
/// ```
/// use gaussblur_engine::GaussianKernel;
///
/// let kernel = GaussianKernel::new(2).unwrap();
/// assert_eq!(kernel.len(), 5);
/// assert_eq!(kernel.radius(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    weights: Vec<f64>,
    radius: usize,
}

impl GaussianKernel {
    /// Build the kernel for a given radius.
    ///
    /// # Arguments
    ///
    /// * `radius` - Half-width of the kernel in samples, excluding the center.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidRadius`] if `radius` is zero, or
    /// [`FilterError::OutOfMemory`] if the weight storage cannot be allocated.
    pub fn new(radius: usize) -> Result<Self, FilterError> {
        if radius < 1 {
            return Err(FilterError::InvalidRadius(radius as i64));
        }

        let len = 2 * radius + 1;
        let mut weights: Vec<f64> = Vec::new();
        weights
            .try_reserve_exact(len)
            .map_err(|_| FilterError::OutOfMemory(len))?;

        let sigma = radius as f64 / 3.0;
        let denom = 2.0 * sigma * sigma;

        // compute the raw weights
        for i in -(radius as i64)..=(radius as i64) {
            let x = i as f64;
            weights.push((-(x * x) / denom).exp());
        }

        // normalize the kernel
        let sum = weights.iter().sum::<f64>();
        weights.iter_mut().for_each(|w| *w /= sum);

        Ok(Self { weights, radius })
    }

    /// Half-width of the kernel, excluding the center tap.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of taps, always `2 * radius + 1`.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the kernel has no taps; never true for a built kernel.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The normalized weights, center tap at index `radius`.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The weights narrowed to `f32` for the vectorized path.
    pub(crate) fn weights_f32(&self) -> Vec<f32> {
        self.weights.iter().map(|&w| w as f32).collect()
    }
}
