use crate::{error::DivisionByZero, symbol::{Group, Kind, Symbol, Terms}};
use super::{
    add,
    insert::{insert_term, product_from, sum_from},
    power::raise,
};

/// Multiplies two symbols.
///
/// The operands are ordered so that the one with the higher group comes first. Factors that
/// share a base are merged by adding their exponents; flat sums are distributed over the other
/// operand; everything else is folded into a product.
pub fn multiply(a: Symbol, b: Symbol) -> Symbol {
    if a.is_zero() || b.is_zero() {
        return Symbol::zero();
    }

    let (mut a, mut b) = if a.group() >= b.group() { (a, b) } else { (b, a) };
    if b.is_number() {
        a.multiplier *= b.multiplier;
        return a;
    }

    let multiplier = a.multiplier * b.multiplier;
    a.multiplier = 1.0;
    b.multiplier = 1.0;

    let mut result = if a.factor_key() == b.factor_key() {
        merge_powers(a, b)
    } else if a.is_flat_sum() {
        distribute(a, b)
    } else if b.is_flat_sum() {
        distribute(b, a)
    } else if a.group() == Group::Product {
        fold_factor(a.into_children(), b)
    } else if b.group() == Group::Product {
        fold_factor(b.into_children(), a)
    } else {
        let mut factors = Terms::new();
        factors.insert(a.factor_key(), a);
        factors.insert(b.factor_key(), b);
        product_from(1.0, factors)
    };

    result.multiplier *= multiplier;
    result
}

/// Divides `dividend` by `divisor`, by multiplying with the reciprocal of the divisor.
pub fn divide(dividend: Symbol, divisor: Symbol) -> Result<Symbol, DivisionByZero> {
    if divisor.is_zero() {
        return Err(DivisionByZero);
    }
    Ok(multiply(dividend, divisor.invert()))
}

/// Multiplies two factors that share a base by adding their exponents.
fn merge_powers(a: Symbol, b: Symbol) -> Symbol {
    let (base, a_exponent) = a.split();
    let (_, b_exponent) = b.split();
    raise(base, add(a_exponent, b_exponent))
}

/// Multiplies every term of a flat sum by the other operand.
pub fn distribute(sum: Symbol, other: Symbol) -> Symbol {
    let mut terms = Terms::new();
    for term in sum.into_terms() {
        insert_term(&mut terms, multiply(term, other.clone()));
    }
    sum_from(terms)
}

/// Multiplies the factors of a product by another factor.
///
/// A factor with the same base as an existing one is merged with it, and the merged result is
/// multiplied back into the remaining factors, since it may no longer be a plain factor (for
/// example, `i * i` is `-1`).
fn fold_factor(mut factors: Terms, factor: Symbol) -> Symbol {
    if let Kind::Product(_) = factor.kind {
        return factor.into_children()
            .into_values()
            .fold(product_from(1.0, factors), multiply);
    }

    let key = factor.factor_key();
    match factors.remove(&key) {
        Some(existing) => {
            let merged = multiply(existing, factor);
            multiply(product_from(1.0, factors), merged)
        },
        None => {
            factors.insert(key, factor);
            product_from(1.0, factors)
        },
    }
}
