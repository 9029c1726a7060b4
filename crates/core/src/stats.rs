//! Streaming statistics (Welford's algorithm)
//!
//! Used by the whole-stack aggregate operators. Mean and variance are
//! updated incrementally so no large intermediate sums are formed.

#[derive(Debug, Clone, Default)]
pub struct Welford {
    count: u64,
    sum: f64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Welford {
    pub fn new() -> Self {
        Welford::default()
    }

    pub fn add(&mut self, x: f64) {
        if self.count == 0 {
            self.min = x;
            self.max = x;
        } else {
            self.min = self.min.min(x);
            self.max = self.max.max(x);
        }
        self.count += 1;
        self.sum += x;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of all values; 0 when empty
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Arithmetic mean; 0 when empty
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance (n - 1 denominator); 0 with fewer than two values
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.m2 / (self.count - 1) as f64
    }

    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Smallest value seen; 0 when empty
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest value seen; 0 when empty
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl FromIterator<f64> for Welford {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Welford::new();
        for x in iter {
            stats.add(x);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_to_five() -> Welford {
        (0..6).map(f64::from).collect()
    }

    #[test]
    fn test_mean_and_variance() {
        let stats = zero_to_five();
        assert_eq!(stats.count(), 6);
        assert_eq!(stats.sum(), 15.0);
        assert!((stats.mean() - 2.5).abs() < 1e-12);
        assert!((stats.variance() - 3.5).abs() < 1e-12);
        assert!((stats.stddev() - 1.8708286933869707).abs() < 1e-12);
    }

    #[test]
    fn test_min_max() {
        let stats: Welford = [3.0, -7.5, 12.0, 0.0].into_iter().collect();
        assert_eq!(stats.min(), -7.5);
        assert_eq!(stats.max(), 12.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = Welford::new();
        assert_eq!(empty.sum(), 0.0);
        assert_eq!(empty.mean(), 0.0);
        assert_eq!(empty.variance(), 0.0);
        assert_eq!(empty.min(), 0.0);
        assert_eq!(empty.max(), 0.0);

        let single: Welford = [42.0].into_iter().collect();
        assert_eq!(single.mean(), 42.0);
        assert_eq!(single.stddev(), 0.0);
    }
}
