//! Parsing of infix mathematical expressions into simplified symbols, and rendering of those
//! symbols as text, LaTeX, and numeric functions.
//!
//! Simplification is not a separate pass: the [`Parser`] combines operands with the algebraic
//! combinators in [`combine`] as it reduces them, so like terms are collected, exponents are
//! merged, and small integral powers of sums are expanded by the time parsing is done.
//!
//! # Example
//!
//! ```
//! use canon_compute::{ctxt::Ctxt, evaluate, parse};
//! use canon_compute::parser::Substitutions;
//!
//! let ctxt = Ctxt::default();
//! let symbol = parse("2*x + 3*x", &ctxt).unwrap();
//! assert_eq!(symbol.to_string(), "5*x");
//!
//! let value = evaluate("sin(0) + 2/4", &ctxt, &Substitutions::new()).unwrap();
//! assert_eq!(value.to_string(), "0.5");
//! ```

pub mod approx;
pub mod combine;
pub mod compile;
pub mod consts;
pub mod ctxt;
pub mod error;
pub mod eval_mode;
pub mod fmt;
pub mod funcs;
pub mod pack;
pub mod parser;
pub mod symbol;

use canon_error::Error;
use ctxt::Ctxt;
use eval_mode::EvalMode;
use parser::{Parser, Substitutions};
use symbol::Symbol;

pub use fmt::{render_latex, render_text, TextMode};

/// Parses an expression symbolically. Constants are kept as variables, and functions of numbers
/// are kept as calls.
pub fn parse(expr: &str, ctxt: &Ctxt) -> Result<Symbol, Error> {
    let _span = tracing::debug_span!("parse", expr, mode = %EvalMode::Symbolic).entered();
    Parser::new(ctxt).parse_str(expr)
}

/// Parses an expression numerically, with the given substitutions. Constants are replaced with
/// their values, and functions of numbers are evaluated.
pub fn evaluate(expr: &str, ctxt: &Ctxt, subs: &Substitutions) -> Result<Symbol, Error> {
    let _span = tracing::debug_span!("parse", expr, mode = %EvalMode::Numeric).entered();
    Parser::new(ctxt)
        .with_mode(EvalMode::Numeric)
        .with_substitutions(subs)
        .parse_str(expr)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use crate::{error::ReservedNameViolation, symbol::Kind};
    use super::*;

    fn text(expr: &str) -> String {
        parse(expr, &Ctxt::default()).unwrap().to_string()
    }

    fn numeric(expr: &str) -> Symbol {
        evaluate(expr, &Ctxt::default(), &Substitutions::new()).unwrap()
    }

    #[test]
    fn collects_like_terms() {
        assert_eq!(text("2*x+3*x"), "5*x");
        assert_eq!(text("x+x"), "2*x");
        assert_eq!(text("x*y-y*x"), "0");
    }

    #[test]
    fn merges_exponents() {
        assert_eq!(text("x^2*x^3"), text("x^5"));
        assert_eq!(text("x^a*x^b"), text("x^(a+b)"));
    }

    #[test]
    fn render_is_idempotent() {
        let ctxt = Ctxt::default();
        for expr in ["(x+1)^2", "a/b+c", "2^x*2^y", "sin(x)^2/3", "-(a-b)*c", "x^(1/2)*y"] {
            let once = parse(expr, &ctxt).unwrap();
            let twice = parse(&once.to_string(), &ctxt).unwrap();
            assert_eq!(twice, once, "{}", expr);
        }
    }

    #[test]
    fn addition_and_multiplication_commute() {
        assert_eq!(text("a+b*c+d"), text("d+c*b+a"));
        assert_eq!(text("x*y*z"), text("z*x*y"));
        assert_eq!(text("(a+1)*(b+2)"), text("(b+2)*(a+1)"));
    }

    #[test]
    fn expands_squared_sums() {
        let ctxt = Ctxt::default();
        let symbol = parse("(x+1)^2", &ctxt).unwrap();
        assert_eq!(symbol.to_string(), "1+2*x+x^(2)");

        let terms = symbol.children().unwrap();
        assert_eq!(terms.len(), 2);
        assert!(terms.values().any(|term| matches!(term.kind, Kind::PolySum(_))));
    }

    #[test]
    fn numeric_evaluation() {
        assert_eq!(numeric("2/4"), Symbol::number(0.5));
        assert_eq!(numeric("sin(0)"), Symbol::zero());
        assert_float_relative_eq!(numeric("cos(PI)").multiplier, -1.0);
        assert_float_relative_eq!(numeric("log(E^2)").multiplier, 2.0);
    }

    #[test]
    fn numeric_cube_root_of_negative_is_complex() {
        let root = numeric("(-8)^(1/3)");
        let terms = root.children().unwrap();
        assert!(terms.values().any(Symbol::is_imaginary));
    }

    #[test]
    fn numeric_substitutions() {
        let subs = Substitutions::from([("x".to_string(), 3.0.into())]);
        let value = evaluate("x^2+1", &Ctxt::default(), &subs).unwrap();
        assert_eq!(value, Symbol::number(10.0));
    }

    #[test]
    fn constants_stay_symbolic() {
        assert_eq!(text("2*PI"), "2*PI");
    }

    #[test]
    fn user_functions_cannot_shadow_builtins() {
        let mut ctxt = Ctxt::default();
        let err = ctxt.set_function("sin", &["x"], "x").unwrap_err();
        assert!(err.is::<ReservedNameViolation>());
    }
}
