use crate::symbol::{Group, Symbol};
use super::insert::{poly_of, sum_of};

/// Adds two symbols.
///
/// - Terms with the same base and power sum their multipliers.
/// - Terms with the same base and different powers form a polynomial sum.
/// - Anything else forms a sum.
///
/// Flat sums and polynomial sums merge with the other operand term by term.
pub fn add(a: Symbol, b: Symbol) -> Symbol {
    if a.is_zero() {
        return b;
    }
    if b.is_zero() {
        return a;
    }

    if a.is_flat(Group::Sum) || b.is_flat(Group::Sum) || a.sum_key() != b.sum_key() {
        return sum_of(a, b);
    }

    if a.is_flat(Group::PolySum) || b.is_flat(Group::PolySum) || !a.same_power(&b) {
        return poly_of(a, b);
    }

    let multiplier = a.multiplier + b.multiplier;
    if multiplier == 0.0 {
        return Symbol::zero();
    }

    Symbol { multiplier, ..a }
}

/// Subtracts `b` from `a`.
pub fn subtract(a: Symbol, b: Symbol) -> Symbol {
    add(a, b.negate())
}
