//! Trigonometric functions and their inverses. Angles are in radians.

use canon_error::Error;
use crate::{parser::Parser, symbol::Symbol};
use super::{helper::{only_arg, unary}, Builtin};

/// Build a trigonometric function that takes a single argument.
macro_rules! build_trig {
    ($($name:literal $upname:ident; $func:expr),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(n: f64) -> f64 {
                    // NOTE: the closure call is contained within the macro, so we allow
                    // the clippy::redundant_closure_call lint
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(n)
                }
            }

            impl Builtin for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn arity(&self) -> usize {
                    1
                }

                fn apply(&self, args: Vec<Symbol>, parser: &Parser) -> Result<Symbol, Error> {
                    Ok(unary($name, only_arg(args), parser.mode(), Self::eval_static))
                }
            }
        )*
    };
}

build_trig! {
    "sin" Sin; f64::sin,
    "cos" Cos; f64::cos,
    "tan" Tan; f64::tan,
    "sec" Sec; |n: f64| n.cos().recip(),
    "csc" Csc; |n: f64| n.sin().recip(),
    "cot" Cot; |n: f64| n.tan().recip(),
    "asin" Asin; f64::asin,
    "acos" Acos; f64::acos,
    "atan" Atan; f64::atan,
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use crate::{ctxt::Ctxt, eval_mode::EvalMode};
    use super::*;

    #[test]
    fn numeric_evaluates_numbers() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt).with_mode(EvalMode::Numeric);
        let result = Cos.apply(vec![Symbol::zero()], &parser).unwrap();
        assert_eq!(result, Symbol::one());
    }

    #[test]
    fn symbolic_keeps_calls() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        let result = Sin.apply(vec![Symbol::zero()], &parser).unwrap();
        assert_eq!(result, Symbol::function("sin", vec![Symbol::zero()]));
    }

    #[test]
    fn variables_stay_symbolic() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt).with_mode(EvalMode::Numeric);
        let result = Tan.apply(vec![Symbol::variable("x")], &parser).unwrap();
        assert!(result.is_function("tan"));
    }

    #[test]
    fn reciprocals() {
        assert_float_relative_eq!(Sec::eval_static(1.0), 1.0 / 1f64.cos());
        assert_float_relative_eq!(Cot::eval_static(0.5), 1.0 / 0.5f64.tan());
        assert_float_relative_eq!(Atan::eval_static(1.0), std::f64::consts::FRAC_PI_4);
    }
}
