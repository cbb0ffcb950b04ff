use crate::symbol::{Kind, Symbol, Terms};
use std::fmt::{Display, Formatter, Result};
use super::sorted_children;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The flavor of text to render a symbol as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextMode {
    /// The canonical infix form, which parses back into the same symbol.
    #[default]
    Canonical,

    /// A Rust expression over `f64` values, such as `(x).sin()*(y).powf(2.0)`.
    Function,
}

/// Renders a symbol as text.
pub fn render_text(symbol: &Symbol, mode: TextMode) -> String {
    match mode {
        TextMode::Canonical => canonical(symbol),
        TextMode::Function => function(symbol),
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", canonical(self))
    }
}

/// Formats a number, without a negative zero.
fn number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Joins the terms of a sum, writing `a+-b` as `a-b`.
fn join_terms(terms: &Terms, render: fn(&Symbol) -> String) -> String {
    sorted_children(terms, render)
        .join("+")
        .replace("+-", "-")
}

/// Renders a symbol in canonical form.
pub(crate) fn canonical(symbol: &Symbol) -> String {
    let body = match &symbol.kind {
        Kind::Number => return number(symbol.multiplier),
        Kind::Variable(name) => name.clone(),
        Kind::Function(name, args) => format!(
            "{}({})",
            name,
            args.iter().map(canonical).collect::<Vec<_>>().join(","),
        ),
        Kind::PolySum(terms) | Kind::Sum(terms) => {
            let sum = join_terms(terms, canonical);
            if symbol.multiplier != 1.0 || symbol.power != 1.0 {
                format!("({})", sum)
            } else {
                sum
            }
        },
        Kind::Product(factors) => sorted_children(factors, canonical).join("*"),
        Kind::Exponential(base, exponent) => {
            let base_text = match base.kind {
                Kind::Number | Kind::Variable(_) | Kind::Function(..) => canonical(base),
                _ => format!("({})", canonical(base)),
            };
            format!("{}^({})", base_text, canonical(exponent))
        },
    };

    let body = if symbol.power != 1.0 {
        format!("{}^({})", body, number(symbol.power))
    } else {
        body
    };

    match symbol.multiplier {
        m if m == 1.0 => body,
        m if m == -1.0 => format!("-{}", body),
        m => format!("{}*{}", number(m), body),
    }
}

/// Renders a call to a builtin as a method call on `f64`.
fn call(name: &str, args: &[Symbol]) -> String {
    let arg = |n: usize| args.get(n).map(function).unwrap_or_default();
    match name {
        "sin" | "cos" | "tan" | "asin" | "acos" | "atan" | "exp" | "abs" => {
            format!("({}).{}()", arg(0), name)
        },
        "log" => format!("({}).ln()", arg(0)),
        "sec" => format!("(1.0/({}).cos())", arg(0)),
        "csc" => format!("(1.0/({}).sin())", arg(0)),
        "cot" => format!("(1.0/({}).tan())", arg(0)),
        "sum" => {
            let index = args.get(1).map(canonical).unwrap_or_default();
            format!(
                "(({from}) as i64..=({to}) as i64).map(|{index}| {index} as f64).map(|{index}| {body}).sum::<f64>()",
                from = arg(2),
                to = arg(3),
                index = index,
                body = arg(0),
            )
        },
        _ => format!("{}({})", name, args.iter().map(function).collect::<Vec<_>>().join(", ")),
    }
}

/// Renders a symbol as a Rust `f64` expression.
fn function(symbol: &Symbol) -> String {
    let body = match &symbol.kind {
        Kind::Number => return format!("{:?}", symbol.multiplier),
        Kind::Variable(name) => match name.as_str() {
            "PI" => "std::f64::consts::PI".to_string(),
            "E" => "std::f64::consts::E".to_string(),
            _ => name.clone(),
        },
        Kind::Function(name, args) => call(name, args),
        Kind::PolySum(terms) | Kind::Sum(terms) => format!("({})", join_terms(terms, function)),
        Kind::Product(factors) => sorted_children(factors, function).join("*"),
        Kind::Exponential(base, exponent) => {
            format!("({}).powf({})", function(base), function(exponent))
        },
    };

    let body = if symbol.power != 1.0 {
        format!("({}).powf({:?})", body, symbol.power)
    } else {
        body
    };

    match symbol.multiplier {
        m if m == 1.0 => body,
        m if m == -1.0 => format!("-{}", body),
        m => format!("{:?}*{}", m, body),
    }
}
