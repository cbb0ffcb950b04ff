//! Functions related to powers, exponentiation, and roots.

use canon_error::Error;
use crate::{
    combine::{add, multiply, pow},
    consts::{E, PI},
    eval_mode::EvalMode,
    parser::Parser,
    symbol::{Kind, Symbol},
};
use super::{helper::{only_arg, unary}, Builtin};

/// The exponential function, `exp(x) = E^x`.
#[derive(Debug)]
pub struct Exp;

impl Exp {
    pub fn eval_static(n: f64) -> f64 {
        n.exp()
    }
}

impl Builtin for Exp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn arity(&self) -> usize {
        1
    }

    fn apply(&self, args: Vec<Symbol>, parser: &Parser) -> Result<Symbol, Error> {
        Ok(unary("exp", only_arg(args), parser.mode(), Self::eval_static))
    }
}

/// The natural logarithm, `log(x)`.
///
/// Logarithms of powers of `E` are simplified to their exponents, whether the power is written
/// as `E^x` or `exp(x)`. In numeric mode, the logarithm of a negative number is complex:
/// `log(-v) = log(v) + PI*i`.
#[derive(Debug)]
pub struct Log;

/// Returns true if the symbol is Euler's number, either as the constant name or its value.
fn is_euler(symbol: &Symbol) -> bool {
    match &symbol.kind {
        Kind::Variable(name) => name == "E" && symbol.multiplier == 1.0 && symbol.power == 1.0,
        Kind::Number => symbol.multiplier == E,
        _ => false,
    }
}

impl Log {
    pub fn eval_static(n: f64) -> f64 {
        n.ln()
    }

    /// Simplifies the logarithm of the given symbol, returning `None` if it cannot be.
    fn simplify(arg: &Symbol) -> Option<Symbol> {
        if arg.multiplier != 1.0 {
            return None;
        }

        match &arg.kind {
            Kind::Number => Some(Symbol::zero()),
            Kind::Variable(name) if name == "E" => Some(Symbol::number(arg.power)),
            Kind::Exponential(base, exponent) if is_euler(base) => Some((**exponent).clone()),
            Kind::Function(name, args) if name == "exp" && args.len() == 1 => {
                Some(multiply(Symbol::number(arg.power), args[0].clone()))
            },
            _ => None,
        }
    }
}

impl Builtin for Log {
    fn name(&self) -> &'static str {
        "log"
    }

    fn arity(&self) -> usize {
        1
    }

    fn apply(&self, args: Vec<Symbol>, parser: &Parser) -> Result<Symbol, Error> {
        let arg = only_arg(args);
        if parser.mode() == EvalMode::Numeric && arg.is_number() {
            let value = arg.multiplier;
            if value < 0.0 {
                return Ok(add(
                    Symbol::number(Self::eval_static(-value)),
                    multiply(Symbol::number(PI), Symbol::imaginary()),
                ));
            }
            return Ok(Symbol::number(Self::eval_static(value)));
        }

        Ok(Self::simplify(&arg).unwrap_or_else(|| Symbol::function("log", vec![arg])))
    }
}

/// The square root function, `sqrt(x) = x^(1/2)`.
#[derive(Debug)]
pub struct Sqrt;

impl Builtin for Sqrt {
    fn name(&self) -> &'static str {
        "sqrt"
    }

    fn arity(&self) -> usize {
        1
    }

    fn apply(&self, args: Vec<Symbol>, parser: &Parser) -> Result<Symbol, Error> {
        Ok(pow(only_arg(args), Symbol::number(0.5), parser.mode()))
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use crate::ctxt::Ctxt;
    use super::*;

    #[test]
    fn log_of_exp() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        let x = Symbol::variable("x");
        let exp = Exp.apply(vec![x.clone()], &parser).unwrap();
        assert_eq!(Log.apply(vec![exp], &parser).unwrap(), x);
    }

    #[test]
    fn log_of_power_of_e() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        let x = Symbol::variable("x");
        let power = pow(Symbol::variable("E"), x.clone(), EvalMode::Symbolic);
        assert_eq!(Log.apply(vec![power], &parser).unwrap(), x);

        let cubed = Symbol { power: 3.0, ..Symbol::variable("E") };
        assert_eq!(Log.apply(vec![cubed], &parser).unwrap(), Symbol::number(3.0));
    }

    #[test]
    fn log_keeps_other_arguments() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        let scaled = Symbol { multiplier: 2.0, ..Symbol::variable("E") };
        assert!(Log.apply(vec![scaled], &parser).unwrap().is_function("log"));
    }

    #[test]
    fn log_of_negative_number() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt).with_mode(EvalMode::Numeric);
        let result = Log.apply(vec![Symbol::number(-1.0)], &parser).unwrap();
        assert_eq!(result, Symbol { multiplier: PI, ..Symbol::imaginary() });
    }

    #[test]
    fn numeric_exp() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt).with_mode(EvalMode::Numeric);
        let result = Exp.apply(vec![Symbol::one()], &parser).unwrap();
        assert_float_relative_eq!(result.multiplier, E);
    }

    #[test]
    fn sqrt_is_half_power() {
        let ctxt = Ctxt::default();
        let parser = Parser::new(&ctxt);
        assert_eq!(Sqrt.apply(vec![Symbol::number(9.0)], &parser).unwrap(), Symbol::number(3.0));
        let root = Sqrt.apply(vec![Symbol::variable("x")], &parser).unwrap();
        assert_eq!(root, Symbol { power: 0.5, ..Symbol::variable("x") });
    }
}
