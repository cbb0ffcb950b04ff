//! Functions over sequences of terms.

use canon_error::Error;
use canon_parser::tokenize;
use crate::{
    consts::MAX_SUM_TERMS,
    fmt::{render_text, TextMode},
    pack::{pack, unpack},
    parser::{Parser, Replacement, Substitutions},
    symbol::{Kind, Symbol, Terms},
};
use super::Builtin;

/// The summation `sum(body, index, from, to)`, which adds up `body` for each integer value of
/// `index` from `from` to `to`, inclusive.
///
/// When the bounds are integers and the index is a plain variable, the sum is expanded by
/// substituting each value of the index into the body. Otherwise, a `sum` call node is kept.
#[derive(Debug)]
pub struct Sum;

/// Returns the integer value of the symbol, if it is an integral number.
fn integer(symbol: &Symbol) -> Option<f64> {
    (symbol.is_number() && symbol.multiplier.fract() == 0.0).then_some(symbol.multiplier)
}

impl Sum {
    /// Expands the sum by substitution.
    fn expand(body: &Symbol, index: &str, from: f64, to: f64, parser: &Parser) -> Result<Symbol, Error> {
        let tokens = tokenize(&render_text(body, TextMode::Canonical))?;
        let mut terms = Terms::new();
        let mut value = from;
        while value <= to {
            let subs = Substitutions::from([(index.to_string(), Replacement::Number(value))]);
            unpack(parser.parse_with(&tokens, &subs)?, &mut terms);
            value += 1.0;
        }
        Ok(pack(terms))
    }
}

impl Builtin for Sum {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn arity(&self) -> usize {
        4
    }

    fn apply(&self, args: Vec<Symbol>, parser: &Parser) -> Result<Symbol, Error> {
        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_else(Symbol::zero);
        let (body, index, from, to) = (next(), next(), next(), next());

        if let (Kind::Variable(name), Some(start), Some(end)) = (&index.kind, integer(&from), integer(&to)) {
            let count = end - start + 1.0;
            if index.multiplier == 1.0 && index.power == 1.0 && count <= MAX_SUM_TERMS as f64 {
                tracing::debug!(index = name.as_str(), start, end, "expanding sum");
                return Self::expand(&body, name, start, end, parser);
            }
        }

        Ok(Symbol::function("sum", vec![body, index, from, to]))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{ctxt::Ctxt, eval_mode::EvalMode};
    use super::*;

    #[test]
    fn integer_bounds_expand() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        let body = Symbol { power: 2.0, ..Symbol::variable("k") };
        let result = Sum.apply(vec![
            body,
            Symbol::variable("k"),
            Symbol::number(1.0),
            Symbol::number(3.0),
        ], &parser).unwrap();
        assert_eq!(result, Symbol::number(14.0));
    }

    #[test]
    fn expansion_keeps_other_variables() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        let body = parser.parse_str("k*x").unwrap();
        let result = Sum.apply(vec![
            body,
            Symbol::variable("k"),
            Symbol::number(1.0),
            Symbol::number(4.0),
        ], &parser).unwrap();
        assert_eq!(result, Symbol { multiplier: 10.0, ..Symbol::variable("x") });
    }

    #[test]
    fn empty_range_is_zero() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt).with_mode(EvalMode::Numeric);
        let result = Sum.apply(vec![
            Symbol::variable("k"),
            Symbol::variable("k"),
            Symbol::number(3.0),
            Symbol::number(1.0),
        ], &parser).unwrap();
        assert_eq!(result, Symbol::zero());
    }

    #[test]
    fn symbolic_bounds_are_kept() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        let result = Sum.apply(vec![
            Symbol::variable("k"),
            Symbol::variable("k"),
            Symbol::number(1.0),
            Symbol::variable("n"),
        ], &parser).unwrap();
        assert!(result.is_function("sum"));
    }
}
