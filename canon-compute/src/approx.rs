//! Approximation of decimals as fractions.

/// The approximation is accepted once it is closer than this to the input.
pub const EPSILON: f64 = 1e-13;

/// The number of continued fraction terms computed before giving up on a closer approximation.
pub const MAX_REFINEMENTS: usize = 30;

/// Hard cap on the number of continued fraction iterations.
pub const MAX_ITERATIONS: usize = 10_000;

/// Values with a magnitude outside of this range are converted through their scientific
/// notation instead of a continued fraction.
const CONTINUED_RANGE: (f64, f64) = (1e-6, 1e20);

/// Approximates the given decimal as a `(numerator, denominator)` pair of whole numbers.
///
/// The denominator is always positive; the sign of the value is carried by the numerator.
/// Non-finite values are returned over a denominator of 1.
///
/// ```
/// use canon_compute::approx::to_fraction;
///
/// assert_eq!(to_fraction(0.5), (1.0, 2.0));
/// assert_eq!(to_fraction(-0.75), (-3.0, 4.0));
/// ```
pub fn to_fraction(value: f64) -> (f64, f64) {
    if value == 0.0 || !value.is_finite() {
        return (value, 1.0);
    }

    let magnitude = value.abs();
    let (numerator, denominator) = if magnitude < CONTINUED_RANGE.0 || magnitude > CONTINUED_RANGE.1 {
        quick_conversion(magnitude)
    } else {
        continued_fraction(magnitude)
    };

    (numerator.copysign(value), denominator)
}

/// Converts a very small or very large positive value using its scientific notation.
fn quick_conversion(value: f64) -> (f64, f64) {
    // every f64 above the continued range is already a whole number
    if value > CONTINUED_RANGE.1 {
        return (value, 1.0);
    }

    let notation = format!("{:e}", value);
    let (mantissa, exponent) = notation.split_once('e').unwrap_or((&notation, "0"));
    let places = mantissa.split_once('.').map_or(0, |(_, decimals)| decimals.len()) as i32;
    let exponent = exponent.parse::<i32>().unwrap_or(0);

    let digits = mantissa.replace('.', "").parse::<f64>().unwrap_or(value);
    let denominator = 10f64.powi(places - exponent);
    let divisor = gcd(digits, denominator);
    (digits / divisor, denominator / divisor)
}

/// Greatest common divisor of two whole numbers.
fn gcd(mut a: f64, mut b: f64) -> f64 {
    while b != 0.0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Approximates a positive value using its continued fraction expansion.
///
/// See [Decimal To Fraction Conversion](http://mathforum.org/library/drmath/view/61772.html).
fn continued_fraction(value: f64) -> (f64, f64) {
    let (mut prev_num, mut prev_den) = (0.0, 1.0);
    let (mut num, mut den) = (1.0, 0.0);
    let mut remainder = value;

    for step in 1..=MAX_ITERATIONS {
        let whole = remainder.trunc();
        (prev_num, num) = (num, prev_num + whole * num);
        (prev_den, den) = (den, prev_den + whole * den);

        let fractional = remainder - whole;
        if fractional < EPSILON
            || (num / den - value).abs() < EPSILON
            || step > MAX_REFINEMENTS
        {
            break;
        }
        remainder = 1.0 / fractional;
    }

    (num, den)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn simple_fractions() {
        assert_eq!(to_fraction(0.5), (1.0, 2.0));
        assert_eq!(to_fraction(0.75), (3.0, 4.0));
        assert_eq!(to_fraction(2.5), (5.0, 2.0));
        assert_eq!(to_fraction(1.0 / 3.0), (1.0, 3.0));
        assert_eq!(to_fraction(-0.25), (-1.0, 4.0));
    }

    #[test]
    fn whole_numbers() {
        assert_eq!(to_fraction(3.0), (3.0, 1.0));
        assert_eq!(to_fraction(-12.0), (-12.0, 1.0));
        assert_eq!(to_fraction(0.0), (0.0, 1.0));
    }

    #[test]
    fn tiny_values() {
        assert_eq!(to_fraction(1e-7), (1.0, 1e7));
        assert_eq!(to_fraction(1.5e-7), (3.0, 2e7));
        assert_eq!(to_fraction(-2e-8), (-1.0, 5e7));
    }

    #[test]
    fn huge_values() {
        assert_eq!(to_fraction(3e21), (3e21, 1.0));
    }

    #[test]
    fn irrational_values_terminate() {
        let (num, den) = to_fraction(std::f64::consts::PI);
        assert!((num / den - std::f64::consts::PI).abs() < 1e-9);
        assert_eq!(num.fract(), 0.0);
        assert_eq!(den.fract(), 0.0);
    }
}
