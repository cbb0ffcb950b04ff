//! Insertion of children into the term maps of composite symbols, and the constructors that
//! collapse those maps back into a single symbol.

use crate::symbol::{Group, Kind, Symbol, Terms};
use super::add;

/// Inserts a term into the children of a sum.
///
/// Zero terms are dropped and flat sums are spread into their terms. A term that collides with
/// an existing child is added to it, and the result is inserted again, since it can end up
/// under a different key.
pub fn insert_term(terms: &mut Terms, term: Symbol) {
    if term.is_zero() {
        return;
    }

    if term.is_flat(Group::Sum) {
        for term in term.into_terms() {
            insert_term(terms, term);
        }
        return;
    }

    let key = term.sum_key();
    match terms.remove(&key) {
        Some(existing) => insert_term(terms, add(existing, term)),
        None => {
            terms.insert(key, term);
        },
    }
}

/// Inserts a term into the children of a polynomial sum, keyed by its power.
///
/// Flat polynomial sums are spread into their terms. Colliding terms are added together, and
/// a term that cancels out is dropped.
pub fn insert_power_term(terms: &mut Terms, term: Symbol) {
    if term.is_zero() {
        return;
    }

    if term.is_flat(Group::PolySum) {
        for term in term.into_terms() {
            insert_power_term(terms, term);
        }
        return;
    }

    let key = term.power_key();
    match terms.remove(&key) {
        Some(existing) => insert_power_term(terms, add(existing, term)),
        None => {
            terms.insert(key, term);
        },
    }
}

/// Collapses the terms of a sum into a single symbol. An empty map is zero, and a map with one
/// term is that term.
pub fn sum_from(terms: Terms) -> Symbol {
    collapse(terms, Kind::Sum)
}

/// Collapses the terms of a polynomial sum into a single symbol. An empty map is zero, and a
/// map with one term is that term.
pub fn poly_from(terms: Terms) -> Symbol {
    collapse(terms, Kind::PolySum)
}

fn collapse(mut terms: Terms, kind: fn(Terms) -> Kind) -> Symbol {
    match terms.len() {
        0 => Symbol::zero(),
        1 => terms.pop_first().map_or_else(Symbol::zero, |(_, term)| term),
        _ => Symbol::new(kind(terms)),
    }
}

/// Builds a product with the given multiplier from factors that each have a multiplier of 1.
pub fn product_from(multiplier: f64, mut factors: Terms) -> Symbol {
    match factors.len() {
        0 => Symbol::number(multiplier),
        1 => match factors.pop_first() {
            Some((_, mut factor)) => {
                factor.multiplier *= multiplier;
                factor
            },
            None => Symbol::number(multiplier),
        },
        _ => Symbol { multiplier, power: 1.0, kind: Kind::Product(factors) },
    }
}

/// Combines two terms into a sum.
pub fn sum_of(a: Symbol, b: Symbol) -> Symbol {
    let mut terms = Terms::new();
    insert_term(&mut terms, a);
    insert_term(&mut terms, b);
    sum_from(terms)
}

/// Combines two terms that share a base into a polynomial sum.
pub fn poly_of(a: Symbol, b: Symbol) -> Symbol {
    let mut terms = Terms::new();
    insert_power_term(&mut terms, a);
    insert_power_term(&mut terms, b);
    poly_from(terms)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn zero_terms_are_dropped() {
        let mut terms = Terms::new();
        insert_term(&mut terms, Symbol::zero());
        insert_term(&mut terms, Symbol { multiplier: 0.0, ..Symbol::variable("x") });
        assert!(terms.is_empty());
        assert_eq!(sum_from(terms), Symbol::zero());
    }

    #[test]
    fn like_terms_merge() {
        let mut terms = Terms::new();
        insert_term(&mut terms, Symbol::variable("x"));
        insert_term(&mut terms, Symbol { multiplier: 2.0, ..Symbol::variable("x") });
        assert_eq!(terms.len(), 1);
        assert_eq!(sum_from(terms), Symbol { multiplier: 3.0, ..Symbol::variable("x") });
    }

    #[test]
    fn cancelled_term_is_deleted() {
        let mut terms = Terms::new();
        insert_term(&mut terms, Symbol::variable("x"));
        insert_term(&mut terms, Symbol::variable("y"));
        insert_term(&mut terms, Symbol::variable("x").negate());
        assert_eq!(sum_from(terms), Symbol::variable("y"));
    }

    #[test]
    fn flat_sums_are_spread() {
        let inner = sum_of(Symbol::variable("x"), Symbol::one());
        let mut terms = Terms::new();
        insert_term(&mut terms, Symbol { multiplier: 2.0, ..inner });
        insert_term(&mut terms, Symbol::number(-2.0));
        assert_eq!(sum_from(terms), Symbol { multiplier: 2.0, ..Symbol::variable("x") });
    }

    #[test]
    fn single_factor_takes_multiplier() {
        let mut factors = Terms::new();
        let x = Symbol::variable("x");
        factors.insert(x.factor_key(), x);
        assert_eq!(product_from(-1.0, factors), Symbol::variable("x").negate());
    }
}
