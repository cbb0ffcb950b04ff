//! Uncategorized functions.

use canon_error::Error;
use crate::{combine::absolute, parser::Parser, symbol::Symbol};
use super::{helper::only_arg, Builtin};

/// Returns the absolute value.
///
/// Numbers are evaluated in both modes. Symbols raised to an even power are already
/// non-negative and only lose the sign of their multiplier.
#[derive(Debug)]
pub struct Abs;

impl Abs {
    pub fn eval_static(v: f64) -> f64 {
        v.abs()
    }
}

impl Builtin for Abs {
    fn name(&self) -> &'static str {
        "abs"
    }

    fn arity(&self) -> usize {
        1
    }

    fn apply(&self, args: Vec<Symbol>, _: &Parser) -> Result<Symbol, Error> {
        Ok(absolute(only_arg(args)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::ctxt::Ctxt;
    use super::*;

    #[test]
    fn numbers() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        assert_eq!(Abs.apply(vec![Symbol::number(-2.5)], &parser).unwrap(), Symbol::number(2.5));
    }

    #[test]
    fn even_power_is_identity() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        let squared = Symbol { power: 2.0, ..Symbol::variable("x") };
        assert_eq!(Abs.apply(vec![squared.clone()], &parser).unwrap(), squared);
    }

    #[test]
    fn odd_power_is_wrapped() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        let negated = Symbol::variable("x").negate();
        let result = Abs.apply(vec![negated], &parser).unwrap();
        assert_eq!(result, Symbol::function("abs", vec![Symbol::variable("x")]));
    }
}
