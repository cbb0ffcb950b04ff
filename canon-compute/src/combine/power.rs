use crate::{
    approx::to_fraction,
    consts::{MAX_EXPAND_POWER, MAX_EXPAND_TERMS, PI},
    eval_mode::EvalMode,
    symbol::{Group, Kind, Symbol},
};
use super::{add, multiply, multiply::distribute};

/// Returns true if the value is an even whole number.
pub fn is_even(value: f64) -> bool {
    value.is_finite() && value % 2.0 == 0.0
}

/// Returns true if raising to this power takes an even root, either because the power is an
/// even number or because its fractional part is the reciprocal of one.
pub fn is_even_root(exponent: f64) -> bool {
    if is_even(exponent) {
        return true;
    }

    let fract = exponent.fract();
    fract != 0.0 && {
        let root = 1.0 / fract;
        root.fract() == 0.0 && is_even(root)
    }
}

/// Returns the given integral power of the imaginary unit.
fn imaginary_power(exponent: f64) -> Symbol {
    match (exponent as i64).rem_euclid(4) {
        0 => Symbol::one(),
        1 => Symbol::imaginary(),
        2 => Symbol::number(-1.0),
        _ => Symbol::imaginary().negate(),
    }
}

/// Expands a positive integral power of a flat sum into a sum of terms.
fn expand(base: Symbol, times: usize) -> Symbol {
    let mut result = base.clone();
    for _ in 1..times {
        result = if result.is_flat_sum() {
            distribute(result, base.clone())
        } else {
            multiply(result, base.clone())
        };
    }
    result
}

/// Counts the terms of a flat sum, including those of the flat sums nested in it.
fn term_count(symbol: &Symbol) -> usize {
    match symbol.children() {
        Some(terms) if symbol.is_flat_sum() => terms.values().map(term_count).sum(),
        _ => 1,
    }
}

/// Returns the number of terms in the expansion of a sum of `terms` terms raised to `power`,
/// which is the binomial coefficient `C(power + terms - 1, terms - 1)`.
fn expansion_size(terms: usize, power: f64) -> f64 {
    (1..terms).fold(1.0, |size, i| size * (power + i as f64) / i as f64)
}

/// Returns true if the flat sum raised to `power` is expanded term by term.
fn expands(sum: &Symbol, power: f64) -> bool {
    sum.is_flat_sum()
        && power.fract() == 0.0
        && (2.0..=MAX_EXPAND_POWER).contains(&power)
        && expansion_size(term_count(sum), power) <= MAX_EXPAND_TERMS
}

/// Raises a base, as returned by [`Symbol::split`], to the given exponent.
///
/// A symbolic exponent produces an [`Kind::Exponential`]. A numeric exponent is applied
/// directly: numbers are computed, integral powers of `i` cycle, and powers of products
/// distribute over their factors. Powers of sums are kept whole, so that they still merge with
/// other powers of the same sum; [`expand_powers`] expands them once a result is complete.
pub fn raise(mut base: Symbol, exponent: Symbol) -> Symbol {
    if !exponent.is_number() {
        if base.is_number() && base.multiplier == 1.0 {
            return base;
        }
        return Symbol::new(Kind::Exponential(Box::new(base), Box::new(exponent)));
    }

    let exponent = exponent.multiplier;
    if exponent == 0.0 {
        return Symbol::one();
    }

    if base.is_number() {
        return Symbol::number(base.multiplier.powf(exponent));
    }

    if base.is_imaginary() && exponent.fract() == 0.0 {
        return imaginary_power(exponent);
    }

    if base.group() == Group::Product {
        return base.into_children()
            .into_values()
            .fold(Symbol::one(), |acc, factor| {
                let (factor_base, factor_exponent) = factor.split();
                let factor_exponent = multiply(factor_exponent, Symbol::number(exponent));
                multiply(acc, raise(factor_base, factor_exponent))
            });
    }

    base.power = exponent;
    base
}

/// Expands every small positive integral power of a sum in the symbol, rebuilding the composites
/// around it with the combinators so that the expanded terms collect with their neighbors.
///
/// Powers whose expansion would exceed [`MAX_EXPAND_TERMS`] terms are left whole.
pub fn expand_powers(symbol: Symbol, mode: EvalMode) -> Symbol {
    let Symbol { multiplier, power, kind } = symbol;
    let rebuilt = match kind {
        Kind::Number | Kind::Variable(_) => return Symbol { multiplier, power, kind },
        Kind::Function(name, args) => Symbol::function(
            name,
            args.into_iter().map(|arg| expand_powers(arg, mode)).collect(),
        ),
        Kind::PolySum(terms) | Kind::Sum(terms) => terms.into_values()
            .map(|term| expand_powers(term, mode))
            .fold(Symbol::zero(), add),
        Kind::Product(factors) => factors.into_values()
            .map(|factor| expand_powers(factor, mode))
            .fold(Symbol::one(), multiply),
        Kind::Exponential(base, exponent) => pow(
            expand_powers(*base, mode),
            expand_powers(*exponent, mode),
            mode,
        ),
    };

    let raised = if power == 1.0 {
        rebuilt
    } else if expands(&rebuilt, power) {
        tracing::trace!(power, terms = term_count(&rebuilt), "expanding power of sum");
        expand(rebuilt, power as usize)
    } else {
        pow(rebuilt, Symbol::number(power), mode)
    };
    multiply(raised, Symbol::number(multiplier))
}

/// Raises a number to a numeric power.
///
/// A negative base with a fractional exponent has no real result:
///
/// - If the denominator of the exponent is even, the result is an imaginary multiple of the
///   root of the magnitude.
/// - Otherwise, numeric mode computes the principal complex root, and symbolic mode takes the
///   real root, negated when the numerator is odd.
pub fn pow_number(value: f64, exponent: f64, mode: EvalMode) -> Symbol {
    if value >= 0.0 || exponent.fract() == 0.0 {
        return Symbol::number(value.powf(exponent));
    }

    let (numerator, denominator) = to_fraction(exponent);
    let magnitude = (-value).powf(exponent);
    if is_even(denominator) {
        return multiply(
            Symbol::number(magnitude),
            raise(Symbol::imaginary(), Symbol::number(numerator)),
        );
    }

    match mode {
        EvalMode::Numeric => {
            let angle = PI * exponent;
            add(
                Symbol::number(magnitude * angle.cos()),
                multiply(Symbol::number(magnitude * angle.sin()), Symbol::imaginary()),
            )
        },
        EvalMode::Symbolic => Symbol::number(if is_even(numerator) { magnitude } else { -magnitude }),
    }
}

/// Raises a non-numeric base to a numeric power.
fn pow_numeric(base: Symbol, exponent: f64, mode: EvalMode) -> Symbol {
    let multiplier = base.multiplier;
    let even_power = base.group() != Group::Exponential && is_even(base.power);

    let (inner, current) = base.split();
    let new_exponent = multiply(current, Symbol::number(exponent));
    let new_power = new_exponent.is_number().then_some(new_exponent.multiplier);

    let mut result = raise(inner, new_exponent);

    // an even root of an even power must stay non-negative, as in sqrt(x^2) = abs(x)
    if let Some(power) = new_power {
        if even_power && is_even_root(exponent) && is_even((power + 1.0).trunc()) {
            result = absolute(result);
        }
    }

    multiply(result, pow_number(multiplier, exponent, mode))
}

/// Raises `base` to the power of `exponent`.
pub fn pow(base: Symbol, exponent: Symbol, mode: EvalMode) -> Symbol {
    if exponent.is_number() {
        let exponent = exponent.multiplier;
        if exponent == 1.0 {
            return base;
        }
        if base.is_number() {
            return pow_number(base.multiplier, exponent, mode);
        }
        return pow_numeric(base, exponent, mode);
    }

    if base.is_number() {
        let value = base.multiplier;
        if value == 0.0 || value == 1.0 {
            return base;
        }
        let magnitude = raise(Symbol::number(value.abs()), exponent);
        return if value < 0.0 { magnitude.negate() } else { magnitude };
    }

    let multiplier = base.multiplier;
    let (inner, current) = base.split();
    let mut result = raise(inner, multiply(current, exponent.clone()));
    if multiplier.abs() != 1.0 {
        result = multiply(result, raise(Symbol::number(multiplier.abs()), exponent));
    }

    if multiplier < 0.0 {
        result.negate()
    } else {
        result
    }
}

/// Returns the absolute value of a symbol.
///
/// Numbers are evaluated. A symbol raised to an even power (or an even root) is already
/// non-negative and only loses the sign of its multiplier; anything else is wrapped in an `abs`
/// call with a non-negative multiplier.
pub fn absolute(mut symbol: Symbol) -> Symbol {
    let multiplier = symbol.multiplier.abs();
    if symbol.is_number() || symbol.is_function("abs") {
        symbol.multiplier = multiplier;
        return symbol;
    }

    let power = if symbol.power != 0.0 && symbol.power.abs() < 1.0 {
        1.0 / symbol.power
    } else {
        symbol.power
    };
    if symbol.group() != Group::Exponential && is_even(power) {
        symbol.multiplier = multiplier;
        return symbol;
    }

    symbol.multiplier = 1.0;
    Symbol { multiplier, ..Symbol::function("abs", vec![symbol]) }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn x_pow(power: f64) -> Symbol {
        Symbol { power, ..Symbol::variable("x") }
    }

    #[test]
    fn number_powers() {
        assert_eq!(pow(Symbol::number(2.0), Symbol::number(10.0), EvalMode::Symbolic), Symbol::number(1024.0));
        assert_eq!(pow(Symbol::number(-2.0), Symbol::number(3.0), EvalMode::Symbolic), Symbol::number(-8.0));
    }

    #[test]
    fn symbolic_odd_root_of_negative() {
        let root = pow(Symbol::number(-8.0), Symbol::number(1.0 / 3.0), EvalMode::Symbolic);
        assert!(root.is_number());
        assert_float_relative_eq!(root.multiplier, -2.0);
    }

    #[test]
    fn numeric_odd_root_of_negative_is_complex() {
        let root = pow(Symbol::number(-8.0), Symbol::number(1.0 / 3.0), EvalMode::Numeric);
        let terms = root.children().expect("complex root is a sum");
        let real = terms.values().find(|t| t.is_number()).expect("real part");
        let imag = terms.values().find(|t| t.is_imaginary()).expect("imaginary part");
        assert_float_relative_eq!(real.multiplier, 1.0);
        assert_float_relative_eq!(imag.multiplier, 3f64.sqrt());
    }

    #[test]
    fn even_root_of_negative_is_imaginary() {
        let root = pow(Symbol::number(-4.0), Symbol::number(0.5), EvalMode::Symbolic);
        assert_eq!(root, Symbol { multiplier: 2.0, ..Symbol::imaginary() });
        let root = pow(Symbol::number(-4.0), Symbol::number(1.5), EvalMode::Symbolic);
        assert_eq!(root, Symbol { multiplier: -8.0, ..Symbol::imaginary() });
    }

    #[test]
    fn powers_multiply() {
        assert_eq!(pow(x_pow(2.0), Symbol::number(3.0), EvalMode::Symbolic), x_pow(6.0));
        let scaled = Symbol { multiplier: 3.0, ..x_pow(1.0) };
        assert_eq!(pow(scaled, Symbol::number(2.0), EvalMode::Symbolic), Symbol { multiplier: 9.0, ..x_pow(2.0) });
    }

    #[test]
    fn zero_power_is_one() {
        assert_eq!(pow(x_pow(3.0), Symbol::zero(), EvalMode::Symbolic), Symbol::one());
    }

    #[test]
    fn imaginary_cycle() {
        let i = Symbol::imaginary();
        assert_eq!(pow(i.clone(), Symbol::number(2.0), EvalMode::Symbolic), Symbol::number(-1.0));
        assert_eq!(pow(i.clone(), Symbol::number(3.0), EvalMode::Symbolic), Symbol::imaginary().negate());
        assert_eq!(pow(i, Symbol::number(4.0), EvalMode::Symbolic), Symbol::one());
    }

    #[test]
    fn even_root_of_even_power_is_absolute() {
        let root = pow(x_pow(2.0), Symbol::number(0.5), EvalMode::Symbolic);
        assert_eq!(root, Symbol::function("abs", vec![Symbol::variable("x")]));

        // x^4 under a square root is x^2, which is already non-negative
        let root = pow(x_pow(4.0), Symbol::number(0.5), EvalMode::Symbolic);
        assert_eq!(root, x_pow(2.0));
    }

    #[test]
    fn symbolic_exponent_promotes_and_demotes() {
        let y = Symbol::variable("y");
        let promoted = pow(Symbol::variable("x"), y.clone(), EvalMode::Symbolic);
        assert!(matches!(promoted.kind, Kind::Exponential(..)));

        let demoted = pow(promoted, y.invert(), EvalMode::Symbolic);
        assert_eq!(demoted, Symbol::variable("x"));
    }

    #[test]
    fn symbolic_exponent_keeps_multiplier_sign() {
        let base = Symbol { multiplier: -1.0, ..Symbol::variable("x") };
        let result = pow(base, Symbol::variable("n"), EvalMode::Symbolic);
        assert_eq!(result.multiplier, -1.0);
        assert!(matches!(result.kind, Kind::Exponential(..)));
    }

    #[test]
    fn expands_integral_powers_of_sums() {
        let sum = add(Symbol::variable("x"), Symbol::one());
        let squared = pow(sum.clone(), Symbol::number(2.0), EvalMode::Symbolic);
        assert_eq!(squared, Symbol { power: 2.0, ..sum });

        let expected = add(
            add(x_pow(2.0), Symbol { multiplier: 2.0, ..x_pow(1.0) }),
            Symbol::one(),
        );
        assert_eq!(expand_powers(squared, EvalMode::Symbolic), expected);
    }

    #[test]
    fn expansion_collects_with_neighbors() {
        let sum = add(Symbol::variable("x"), Symbol::one());
        let squared = pow(sum, Symbol::number(2.0), EvalMode::Symbolic);
        let rest = add(x_pow(2.0).negate(), Symbol { multiplier: -2.0, ..x_pow(1.0) });
        let total = add(squared, rest);
        assert_eq!(expand_powers(total, EvalMode::Symbolic), Symbol::one());

        let scaled = multiply(Symbol::variable("y"), pow(x_pow(1.0), Symbol::number(2.0), EvalMode::Symbolic));
        assert_eq!(expand_powers(scaled.clone(), EvalMode::Symbolic), scaled);
    }

    #[test]
    fn expansion_size_is_bounded() {
        assert_eq!(expansion_size(2, 2.0), 3.0);
        assert_eq!(expansion_size(6, 4.0), 126.0);

        let sum = ["a", "b", "c", "d", "e", "f"].into_iter()
            .map(Symbol::variable)
            .fold(Symbol::zero(), add);
        let small = expand_powers(pow(sum.clone(), Symbol::number(4.0), EvalMode::Symbolic), EvalMode::Symbolic);
        assert_eq!(term_count(&small), 126);

        let large = pow(sum.clone(), Symbol::number(64.0), EvalMode::Symbolic);
        assert_eq!(expand_powers(large, EvalMode::Symbolic), Symbol { power: 64.0, ..sum });
    }

    #[test]
    fn powers_of_the_same_sum_merge() {
        let sum = add(Symbol::variable("x"), Symbol::one());
        let squared = pow(sum.clone(), Symbol::number(2.0), EvalMode::Symbolic);
        let cubed = pow(sum.clone(), Symbol::number(3.0), EvalMode::Symbolic);
        assert_eq!(multiply(squared.clone(), sum.clone().invert()), sum);
        assert_eq!(multiply(squared, cubed.invert()), Symbol { power: -1.0, ..sum });
    }

    #[test]
    fn absolute_values() {
        assert_eq!(absolute(Symbol::number(-3.0)), Symbol::number(3.0));
        assert_eq!(absolute(Symbol { multiplier: -2.0, ..x_pow(2.0) }), Symbol { multiplier: 2.0, ..x_pow(2.0) });
        let wrapped = absolute(Symbol { multiplier: -2.0, ..x_pow(1.0) });
        assert_eq!(wrapped, Symbol { multiplier: 2.0, ..Symbol::function("abs", vec![x_pow(1.0)]) });
    }

    #[test]
    fn even_roots() {
        assert!(is_even_root(0.5));
        assert!(is_even_root(-0.25));
        assert!(is_even_root(2.0));
        assert!(!is_even_root(1.0 / 3.0));
        assert!(!is_even_root(3.0));
    }
}
