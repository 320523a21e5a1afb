//! Convolution kernels
//!
//! A [`Kernel`] is a small 2D weight mask. Symmetric kernels produced here
//! (box, Gaussian, LoG) always have odd side length, except [`Kernel::box_kernel`]
//! which honours any requested size. The kernel origin is its half-extent
//! `(width / 2, height / 2)`, which is also the zero padding applied on each
//! side by [`crate::convolve::correlate`].

use crate::{FilterError, FilterResult};

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
}

/// Round an even size up to the next odd one.
#[inline]
pub fn force_odd(size: u32) -> u32 {
    if size % 2 == 0 { size + 1 } else { size }
}

/// Largest number of entries a kernel may hold
pub const MAX_KERNEL_ELEMENTS: usize = 1 << 24;

/// Smallest odd integer strictly greater than `6 * sigma`.
///
/// Used to size Gaussian and LoG kernels from sigma alone.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `sigma` is not positive or
/// the size does not fit in `u32`.
pub fn size_for_sigma(sigma: f64) -> FilterResult<u32> {
    check_sigma(sigma)?;
    let too_large =
        || FilterError::InvalidParameters(format!("sigma {} gives an oversized kernel", sigma));
    let span = (6.0 * sigma).floor();
    if span >= u32::MAX as f64 {
        return Err(too_large());
    }
    let n = (span as u32).checked_add(1).ok_or_else(too_large)?;
    Ok(force_odd(n))
}

fn check_sigma(sigma: f64) -> FilterResult<()> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "sigma must be > 0, got {}",
            sigma
        )));
    }
    Ok(())
}

impl Kernel {
    /// Create a zero kernel with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` for a zero side or more than
    /// [`MAX_KERNEL_ELEMENTS`] entries.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| n <= MAX_KERNEL_ELEMENTS)
            .ok_or_else(|| {
                FilterError::InvalidKernel(format!(
                    "{}x{} kernel exceeds {} entries",
                    width, height, MAX_KERNEL_ELEMENTS
                ))
            })?;
        Ok(Kernel {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Create a kernel from row-major values.
    pub fn from_slice(width: u32, height: u32, data: &[f64]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values for {}x{} kernel, got {}",
                kernel.data.len(),
                width,
                height,
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a uniform `size x size` kernel with every entry `1 / size²`.
    ///
    /// The size is used as given, so even sizes are allowed.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size, size)?;
        let weight = 1.0 / (size as f64 * size as f64);
        kernel.data.fill(weight);
        Ok(kernel)
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// `size` is forced odd. Each entry at offset `(x, y)` from the center is
    /// `exp(-(x² + y²) / (2σ²))` before normalization to unit sum.
    pub fn gaussian(size: u32, sigma: f64) -> FilterResult<Self> {
        check_sigma(sigma)?;
        let size = force_odd(size);
        let mut kernel = Self::new(size, size)?;
        let center = (size / 2) as i64;
        let two_sigma2 = 2.0 * sigma * sigma;

        for y in 0..size {
            for x in 0..size {
                let dx = (x as i64 - center) as f64;
                let dy = (y as i64 - center) as f64;
                kernel.set(x, y, (-(dx * dx + dy * dy) / two_sigma2).exp());
            }
        }
        kernel.normalize();
        Ok(kernel)
    }

    /// Create a Laplacian-of-Gaussian kernel (not normalized).
    ///
    /// `size` is forced odd. Entry at offset `(x, y)`:
    /// `((x² + y² - 2σ²) / σ⁴) * exp(-(x² + y²) / (2σ²))`.
    pub fn laplacian_of_gaussian(size: u32, sigma: f64) -> FilterResult<Self> {
        check_sigma(sigma)?;
        let size = force_odd(size);
        let mut kernel = Self::new(size, size)?;
        let center = (size / 2) as i64;
        let sigma2 = sigma * sigma;
        let sigma4 = sigma2 * sigma2;

        for y in 0..size {
            for x in 0..size {
                let dx = (x as i64 - center) as f64;
                let dy = (y as i64 - center) as f64;
                let r2 = dx * dx + dy * dy;
                let value = ((r2 - 2.0 * sigma2) / sigma4) * (-r2 / (2.0 * sigma2)).exp();
                kernel.set(x, y, value);
            }
        }
        Ok(kernel)
    }

    fn fixed(width: u32, height: u32, data: &[f64]) -> Self {
        Kernel {
            width,
            height,
            data: data.to_vec(),
        }
    }

    /// Sobel kernel responding to horizontal intensity change (gx).
    pub fn sobel_x() -> Self {
        Self::fixed(3, 3, &[-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0])
    }

    /// Sobel kernel responding to vertical intensity change (gy).
    pub fn sobel_y() -> Self {
        Self::fixed(3, 3, &[-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
    }

    /// Prewitt kernel responding to horizontal intensity change (gx).
    pub fn prewitt_x() -> Self {
        Self::fixed(3, 3, &[-1.0, 0.0, 1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0])
    }

    /// Prewitt kernel responding to vertical intensity change (gy).
    pub fn prewitt_y() -> Self {
        Self::fixed(3, 3, &[-1.0, -1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0])
    }

    /// Roberts cross kernel along the main diagonal.
    pub fn roberts_x() -> Self {
        Self::fixed(2, 2, &[1.0, 0.0, 0.0, -1.0])
    }

    /// Roberts cross kernel along the anti-diagonal.
    pub fn roberts_y() -> Self {
        Self::fixed(2, 2, &[0.0, 1.0, -1.0, 0.0])
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Origin column, equal to the horizontal half-extent.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.width / 2
    }

    /// Origin row, equal to the vertical half-extent.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.height / 2
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y). Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Kernel rotated by 180 degrees (flipped along both axes).
    pub fn flipped(&self) -> Self {
        let mut data = self.data.clone();
        data.reverse();
        Kernel {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel summing to zero is left untouched.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
