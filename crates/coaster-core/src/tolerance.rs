/// Quantities with absolute values below this are treated as zero.
pub const EPSILON: f64 = 1.0e-12;

/// Tolerances for geometric comparisons.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (in model units)
    pub linear: f64,
    /// Angular tolerance (sine of the smallest accepted angle)
    pub angular: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = EPSILON;
    pub const DEFAULT_ANGULAR: f64 = 1e-6;

    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            angular: Self::DEFAULT_ANGULAR,
        }
    }

    /// Check if two values are equal within linear tolerance
    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check whether two directions are (anti-)parallel, given the length of
    /// their cross product and their lengths.
    pub fn is_parallel(self, cross_length: f64, len_a: f64, len_b: f64) -> bool {
        let scale = len_a * len_b;
        scale <= self.linear || cross_length / scale < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
