//! Real functions not provided by `f64` itself
//!
//! Most wrap `libm`; the inverse error functions are computed here from a
//! rational starting estimate refined with Newton steps against `libm::erf`.

use std::f64::consts::PI;

pub fn gamma(x: f64) -> f64 {
    libm::tgamma(x)
}

pub fn erf(x: f64) -> f64 {
    libm::erf(x)
}

pub fn erfc(x: f64) -> f64 {
    libm::erfc(x)
}

/// Inverse of `erf` on `[-1, 1]`; NaN outside, infinite at the ends
pub fn erfinv(x: f64) -> f64 {
    if x.is_nan() || !(-1.0..=1.0).contains(&x) {
        return f64::NAN;
    }
    if x == 1.0 {
        return f64::INFINITY;
    }
    if x == -1.0 {
        return f64::NEG_INFINITY;
    }

    // Giles' single-precision approximation as the starting point
    let mut w = -((1.0 - x) * (1.0 + x)).ln();
    let p = if w < 5.0 {
        w -= 2.5;
        let mut p = 2.810_226_36e-08;
        p = 3.432_739_39e-07 + p * w;
        p = -3.523_387_7e-06 + p * w;
        p = -4.391_506_54e-06 + p * w;
        p = 0.000_218_580_87 + p * w;
        p = -0.001_253_725_03 + p * w;
        p = -0.004_177_681_64 + p * w;
        p = 0.246_640_727 + p * w;
        1.501_409_41 + p * w
    } else {
        w = w.sqrt() - 3.0;
        let mut p = -0.000_200_214_257;
        p = 0.000_100_950_558 + p * w;
        p = 0.001_349_343_22 + p * w;
        p = -0.003_673_428_44 + p * w;
        p = 0.005_739_507_73 + p * w;
        p = -0.007_622_461_3 + p * w;
        p = 0.009_438_870_47 + p * w;
        p = 1.001_674_06 + p * w;
        2.832_976_82 + p * w
    };

    let mut y = p * x;
    let two_over_sqrt_pi = 2.0 / PI.sqrt();
    for _ in 0..2 {
        let slope = two_over_sqrt_pi * (-y * y).exp();
        if slope == 0.0 {
            break;
        }
        y -= (libm::erf(y) - x) / slope;
    }
    y
}

/// Inverse of `erfc` on `[0, 2]`
pub fn erfcinv(x: f64) -> f64 {
    erfinv(1.0 - x)
}

pub fn j0(x: f64) -> f64 {
    libm::j0(x)
}

pub fn j1(x: f64) -> f64 {
    libm::j1(x)
}

/// Bessel function of the first kind; the order is truncated toward zero
pub fn jn(order: f64, x: f64) -> f64 {
    libm::jn(order as i32, x)
}

pub fn y0(x: f64) -> f64 {
    libm::y0(x)
}

pub fn y1(x: f64) -> f64 {
    libm::y1(x)
}

/// Bessel function of the second kind; the order is truncated toward zero
pub fn yn(order: f64, x: f64) -> f64 {
    libm::yn(order as i32, x)
}

/// Binary exponent of `x` as an integer
pub fn ilogb(x: f64) -> i32 {
    libm::ilogb(x)
}

/// Binary exponent of `x` as a float (-Inf for 0, +Inf for infinities)
pub fn logb(x: f64) -> f64 {
    if x == 0.0 {
        f64::NEG_INFINITY
    } else if x.is_infinite() {
        f64::INFINITY
    } else if x.is_nan() {
        x
    } else {
        f64::from(libm::ilogb(x))
    }
}

/// `10^int(x)`
pub fn pow10(x: f64) -> f64 {
    libm::pow(10.0, x.trunc())
}

/// Split into a fraction in `[0.5, 1)` and a power of two
pub fn frexp(x: f64) -> (f64, i32) {
    libm::frexp(x)
}

/// `max(x - y, 0)`
pub fn dim(x: f64, y: f64) -> f64 {
    libm::fdim(x, y)
}

pub fn nextafter(x: f64, y: f64) -> f64 {
    libm::nextafter(x, y)
}

/// IEEE 754 remainder (quotient rounded to nearest)
pub fn remainder(x: f64, y: f64) -> f64 {
    libm::remainder(x, y)
}

/// Truncated remainder with the sign of `x`
pub fn fmod(x: f64, y: f64) -> f64 {
    x % y
}

pub fn fma(x: f64, y: f64, z: f64) -> f64 {
    x.mul_add(y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(expected: f64, actual: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (expected - actual).abs() <= tolerance,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_erfinv_inverts_erf() {
        for &x in &[-0.999, -0.75, -0.1, 0.0, 0.2, 0.5, 0.9, 0.99999] {
            assert_close(x, erf(erfinv(x)));
        }
    }

    #[test]
    fn test_erfinv_edges() {
        assert_eq!(erfinv(1.0), f64::INFINITY);
        assert_eq!(erfinv(-1.0), f64::NEG_INFINITY);
        assert!(erfinv(1.5).is_nan());
        assert!(erfinv(f64::NAN).is_nan());
        assert_eq!(erfinv(0.0), 0.0);
    }

    #[test]
    fn test_erfcinv_inverts_erfc() {
        for &x in &[0.01, 0.5, 1.0, 1.5, 1.99] {
            assert_close(x, erfc(erfcinv(x)));
        }
    }

    #[test]
    fn test_bessel_order_truncates() {
        assert_close(0.5767248077568734, jn(1.0, 2.0));
        assert_close(jn(2.0, 1.0), jn(2.9, 1.0));
        assert_close(y0(1.0), yn(0.0, 1.0));
    }

    #[test]
    fn test_gamma_integers() {
        assert_close(24.0, gamma(5.0));
        assert_close(1.0, gamma(1.0));
    }

    #[test]
    fn test_exponents() {
        assert_eq!(ilogb(-10.0), 3);
        assert_eq!(logb(8.0), 3.0);
        assert_eq!(logb(0.0), f64::NEG_INFINITY);
        assert_eq!(pow10(10.0), 1e10);
        assert_eq!(pow10(2.7), 100.0);
        assert_eq!(frexp(8.0), (0.5, 4));
    }

    #[test]
    fn test_binary_helpers() {
        assert_eq!(dim(5.0, 3.0), 2.0);
        assert_eq!(dim(3.0, 5.0), 0.0);
        assert_eq!(fmod(7.0, 3.0), 1.0);
        assert_eq!(fmod(-7.0, 3.0), -1.0);
        assert_eq!(remainder(7.0, 4.0), -1.0);
        assert_eq!(fma(2.0, 3.0, 4.0), 10.0);
        assert!(nextafter(1.0, 2.0) > 1.0);
    }
}
