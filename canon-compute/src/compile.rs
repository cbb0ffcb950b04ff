//! Compilation of symbols into numeric functions of their free variables.
//!
//! ```
//! use canon_compute::{compile::build, ctxt::Ctxt, parse};
//!
//! let ctxt = Ctxt::default();
//! let symbol = parse("x^2+y", &ctxt).unwrap();
//! let f = build(&symbol, None).unwrap();
//! assert_eq!(f.params(), ["x", "y"]);
//! assert_eq!(f.call(&[3.0, 1.0]), 10.0);
//! ```

use canon_error::Error;
use crate::{
    consts::CONSTS,
    error::{ReservedNameViolation, UndefinedFunction, UndefinedVariable},
    funcs::{
        miscellaneous::Abs,
        power::{Exp, Log},
        trigonometry::*,
    },
    symbol::{Kind, Symbol, IMAGINARY},
};
use std::collections::{BTreeSet, HashMap};

/// A symbol compiled into a function of its free variables.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFn {
    /// The names of the parameters, in the order their values are passed to [`CompiledFn::call`].
    params: Vec<String>,

    /// The symbol that is evaluated.
    body: Symbol,
}

/// Collects the free variables of a symbol. Default constants are not free.
fn free_variables<'a>(symbol: &'a Symbol, names: &mut BTreeSet<&'a str>) {
    match &symbol.kind {
        Kind::Number => {},
        Kind::Variable(name) => {
            if !CONSTS.contains_key(name.as_str()) {
                names.insert(name);
            }
        },
        Kind::Function(name, args) if name == "sum" => {
            if let Some(body) = args.first() {
                let mut inner = BTreeSet::new();
                free_variables(body, &mut inner);
                if let Some(Kind::Variable(index)) = args.get(1).map(|index| &index.kind) {
                    inner.remove(index.as_str());
                }
                names.extend(inner);
            }
            args.iter().skip(2).for_each(|arg| free_variables(arg, names));
        },
        Kind::Function(_, args) => args.iter().for_each(|arg| free_variables(arg, names)),
        Kind::PolySum(terms) | Kind::Product(terms) | Kind::Sum(terms) => {
            terms.values().for_each(|term| free_variables(term, names));
        },
        Kind::Exponential(base, exponent) => {
            free_variables(base, names);
            free_variables(exponent, names);
        },
    }
}

/// Checks that every function called in the symbol can be evaluated numerically.
fn check_functions(symbol: &Symbol) -> Result<(), Error> {
    match &symbol.kind {
        Kind::Function(name, args) => {
            if evaluator(name).is_none() && name != "sum" {
                return Err(Error::new(vec![0..0], UndefinedFunction {
                    name: name.clone(),
                    suggestions: Vec::new(),
                }));
            }
            args.iter().try_for_each(check_functions)
        },
        Kind::PolySum(terms) | Kind::Product(terms) | Kind::Sum(terms) => {
            terms.values().try_for_each(check_functions)
        },
        Kind::Exponential(base, exponent) => {
            check_functions(base)?;
            check_functions(exponent)
        },
        Kind::Number | Kind::Variable(_) => Ok(()),
    }
}

/// Returns the numeric counterpart of a unary builtin.
fn evaluator(name: &str) -> Option<fn(f64) -> f64> {
    let eval: fn(f64) -> f64 = match name {
        "sin" => Sin::eval_static,
        "cos" => Cos::eval_static,
        "tan" => Tan::eval_static,
        "sec" => Sec::eval_static,
        "csc" => Csc::eval_static,
        "cot" => Cot::eval_static,
        "asin" => Asin::eval_static,
        "acos" => Acos::eval_static,
        "atan" => Atan::eval_static,
        "exp" => Exp::eval_static,
        "log" => Log::eval_static,
        "abs" => Abs::eval_static,
        _ => return None,
    };
    Some(eval)
}

/// Compiles a symbol into a function of its free variables.
///
/// If `params` is `None`, the parameters are the free variables of the symbol in alphabetical
/// order. Otherwise, every free variable must be listed in `params`, which also sets the order
/// of the arguments.
///
/// Symbols with an imaginary part cannot be compiled, since the function returns a real value.
pub fn build(symbol: &Symbol, params: Option<&[&str]>) -> Result<CompiledFn, Error> {
    let mut names = BTreeSet::new();
    free_variables(symbol, &mut names);

    if names.contains(IMAGINARY) {
        return Err(Error::new(vec![0..0], ReservedNameViolation { name: IMAGINARY.to_string() }));
    }

    let params = match params {
        Some(params) => {
            if let Some(name) = names.iter().find(|name| !params.contains(name)) {
                return Err(Error::new(vec![0..0], UndefinedVariable { name: name.to_string() }));
            }
            params.iter().map(|p| p.to_string()).collect()
        },
        None => names.into_iter().map(String::from).collect(),
    };

    check_functions(symbol)?;
    tracing::debug!(?params, "compiled function");
    Ok(CompiledFn { params, body: symbol.clone() })
}

impl CompiledFn {
    /// Returns the names of the parameters.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Evaluates the function. Missing arguments are treated as zero.
    pub fn call(&self, args: &[f64]) -> f64 {
        let mut values = self.params.iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), args.get(i).copied().unwrap_or(0.0)))
            .collect::<HashMap<_, _>>();
        eval(&self.body, &mut values)
    }
}

/// Evaluates a symbol with the given variable values.
fn eval<'a>(symbol: &'a Symbol, values: &mut HashMap<&'a str, f64>) -> f64 {
    let body = match &symbol.kind {
        Kind::Number => 1.0,
        Kind::Variable(name) => values.get(name.as_str())
            .or_else(|| CONSTS.get(name.as_str()))
            .copied()
            .unwrap_or(f64::NAN),
        Kind::Function(name, args) if name == "sum" => sum(args, values),
        Kind::Function(name, args) => match (evaluator(name), args.first()) {
            (Some(f), Some(arg)) => f(eval(arg, values)),
            _ => f64::NAN,
        },
        Kind::PolySum(terms) | Kind::Sum(terms) => terms.values().map(|term| eval(term, values)).sum(),
        Kind::Product(factors) => factors.values().map(|factor| eval(factor, values)).product(),
        Kind::Exponential(base, exponent) => eval(base, values).powf(eval(exponent, values)),
    };

    let body = if symbol.power == 1.0 { body } else { body.powf(symbol.power) };
    symbol.multiplier * body
}

/// Evaluates a `sum(body, index, from, to)` call by looping over its bounds.
fn sum<'a>(args: &'a [Symbol], values: &mut HashMap<&'a str, f64>) -> f64 {
    let [body, index, from, to] = args else {
        return f64::NAN;
    };
    let Kind::Variable(index) = &index.kind else {
        return f64::NAN;
    };

    let from = eval(from, values).round();
    let to = eval(to, values).round();
    let shadowed = values.get(index.as_str()).copied();

    let mut total = 0.0;
    let mut k = from;
    while k <= to {
        values.insert(index, k);
        total += eval(body, values);
        k += 1.0;
    }

    match shadowed {
        Some(value) => values.insert(index, value),
        None => values.remove(index.as_str()),
    };
    total
}
