//! Conversion between a flat map of terms and a single symbol.

use crate::{combine::{insert_term, sum_from}, symbol::{Symbol, Terms}};

/// Packs a map of terms into a single symbol.
///
/// An empty map is zero, a single term is returned as is, and anything else becomes a sum. A
/// lone powered sum is not wrapped again, since [`unpack`] never spreads it.
pub fn pack(terms: Terms) -> Symbol {
    sum_from(terms)
}

/// Unpacks a symbol into a map of terms.
///
/// A sum with a power of 1 spreads its terms into the map, with its multiplier distributed
/// into each of them. Anything else is inserted as a single term.
pub fn unpack(symbol: Symbol, terms: &mut Terms) {
    insert_term(terms, symbol);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::combine::add;
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(pack(Terms::new()), Symbol::zero());
    }

    #[test]
    fn roundtrip_keeps_single_term() {
        let mut terms = Terms::new();
        unpack(Symbol::variable("x"), &mut terms);
        assert_eq!(pack(terms), Symbol::variable("x"));
    }

    #[test]
    fn unpack_spreads_sums() {
        let sum = Symbol { multiplier: -1.0, ..add(Symbol::variable("a"), Symbol::variable("b")) };
        let mut terms = Terms::new();
        unpack(sum, &mut terms);
        assert_eq!(terms.len(), 2);
        assert!(terms.values().all(|t| t.multiplier == -1.0));
    }

    #[test]
    fn unpack_keeps_powered_sums_whole() {
        let sum = Symbol { power: -1.0, ..add(Symbol::variable("a"), Symbol::variable("b")) };
        let mut terms = Terms::new();
        unpack(sum, &mut terms);
        assert_eq!(terms.len(), 1);
    }

    #[test]
    fn single_powered_sum_is_not_wrapped() {
        let square = Symbol { power: 2.0, ..add(Symbol::variable("x"), Symbol::one()) };
        let mut terms = Terms::new();
        unpack(square.clone(), &mut terms);
        let packed = pack(terms);
        assert_eq!(packed, square);

        // packing and unpacking again is stable
        let mut again = Terms::new();
        unpack(packed, &mut again);
        assert_eq!(again.len(), 1);
        assert_eq!(pack(again), square);
    }
}
