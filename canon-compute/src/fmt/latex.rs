use crate::{approx::to_fraction, symbol::{Kind, Symbol}};
use std::fmt::{Display, Formatter, Result};
use super::sorted_children;

/// Decimals whose reduced denominator exceeds this are written as decimals rather than as
/// fractions.
const MAX_DENOMINATOR: f64 = 1e6;

/// Identifiers that are written as Greek letters.
const GREEK: [&str; 35] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
    "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi",
    "Omega", "varphi",
];

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

impl Latex for Symbol {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", latex(self))
    }
}

/// Renders a symbol as LaTeX.
pub fn render_latex(symbol: &Symbol) -> String {
    symbol.as_display().to_string()
}

/// Formats a non-negative value as an integer, a fraction, or a decimal.
fn value(value: f64) -> (String, String) {
    if value.fract() == 0.0 || !value.is_finite() {
        return (value.to_string(), "1".to_string());
    }

    let (numerator, denominator) = to_fraction(value);
    if denominator > MAX_DENOMINATOR {
        return (value.to_string(), "1".to_string());
    }
    (numerator.to_string(), denominator.to_string())
}

/// Formats a real exponent.
fn exponent(power: f64) -> String {
    let sign = if power < 0.0 { "-" } else { "" };
    match value(power.abs()) {
        (numerator, denominator) if denominator == "1" => format!("{}{}", sign, numerator),
        (numerator, denominator) => format!("{}\\frac{{{}}}{{{}}}", sign, numerator, denominator),
    }
}

/// Formats the name of a variable.
fn name(name: &str) -> String {
    match name {
        "PI" => "\\pi".to_string(),
        "E" => "e".to_string(),
        _ => {
            let (head, subscript) = match name.split_once('_') {
                Some((head, subscript)) => (head, Some(subscript)),
                None => (name, None),
            };
            let head = if GREEK.contains(&head) { format!("\\{}", head) } else { head.to_string() };
            match subscript {
                Some(subscript) => format!("{}_{{{}}}", head, subscript),
                None => head,
            }
        },
    }
}

/// Formats a function call.
fn call(function: &str, args: &[Symbol]) -> String {
    let arg = |n: usize| args.get(n).map(latex).unwrap_or_default();
    match function {
        "abs" => format!("\\left|{}\\right|", arg(0)),
        "sum" => format!("\\sum_{{{}={}}}^{{{}}} {}", arg(1), arg(2), arg(3), arg(0)),
        "exp" => format!("e^{{{}}}", arg(0)),
        "sin" | "cos" | "tan" | "sec" | "csc" | "cot" | "log" => {
            format!("\\{}\\left({}\\right)", function, arg(0))
        },
        "asin" | "acos" | "atan" => format!("\\arc{}\\left({}\\right)", &function[1..], arg(0)),
        _ => format!(
            "\\mathrm{{{}}}\\left({}\\right)",
            function,
            args.iter().map(latex).collect::<Vec<_>>().join(", "),
        ),
    }
}

/// Returns true if the symbol is a sum, which needs brackets when it is not alone.
fn is_sum(symbol: &Symbol) -> bool {
    matches!(symbol.kind, Kind::PolySum(_) | Kind::Sum(_))
}

/// Formats a factor with a multiplier of 1 and a non-negative power.
fn factor(symbol: &Symbol) -> String {
    let base = match &symbol.kind {
        Kind::Number => value(symbol.multiplier).0,
        Kind::Variable(n) => name(n),
        Kind::Function(n, args) => call(n, args),
        Kind::PolySum(terms) | Kind::Sum(terms) => sorted_children(terms, latex)
            .into_iter()
            .enumerate()
            .map(|(i, term)| if i == 0 || term.starts_with('-') { term } else { format!("+{}", term) })
            .collect(),
        Kind::Product(_) => latex(symbol),
        Kind::Exponential(base, power) => {
            let bare = match base.kind {
                Kind::Number => base.multiplier.fract() == 0.0,
                Kind::Variable(_) => true,
                _ => false,
            };
            let base = if bare {
                latex(base)
            } else {
                format!("\\left({}\\right)", latex(base))
            };
            return format!("{}^{{{}}}", base, latex(power));
        },
    };

    if symbol.power == 1.0 {
        base
    } else if symbol.power == 0.5 {
        format!("\\sqrt{{{}}}", base)
    } else if is_sum(symbol) {
        format!("\\left({}\\right)^{{{}}}", base, exponent(symbol.power))
    } else {
        format!("{}^{{{}}}", base, exponent(symbol.power))
    }
}

/// Splits a factor into the side of a fraction it belongs to, flipping the sign of its power
/// when it belongs to the denominator.
fn place(mut symbol: Symbol, numerator: &mut Vec<Symbol>, denominator: &mut Vec<Symbol>) {
    symbol.multiplier = 1.0;
    let inverted = match &mut symbol.kind {
        Kind::Exponential(_, power) if power.multiplier < 0.0 => {
            power.multiplier = -power.multiplier;
            true
        },
        Kind::Exponential(..) => false,
        _ if symbol.power < 0.0 => {
            symbol.power = -symbol.power;
            true
        },
        _ => false,
    };

    if inverted {
        denominator.push(symbol);
    } else {
        numerator.push(symbol);
    }
}

/// Joins a coefficient and factors into one side of a fraction.
fn side(coefficient: String, factors: &[Symbol], bracket_alone: bool) -> String {
    let crowded = bracket_alone || factors.len() > 1 || coefficient != "1";
    factors.iter().fold(coefficient, |acc, symbol| {
        let text = factor(symbol);
        let text = if crowded && is_sum(symbol) && symbol.power == 1.0 {
            format!("\\left({}\\right)", text)
        } else {
            text
        };

        if acc == "1" {
            text
        } else if text.starts_with(|c: char| c.is_ascii_digit()) {
            format!("{} \\cdot {}", acc, text)
        } else {
            format!("{} {}", acc, text)
        }
    })
}

/// Renders a symbol as LaTeX.
fn latex(symbol: &Symbol) -> String {
    let sign = if symbol.multiplier < 0.0 { "-" } else { "" };
    let (num_coefficient, den_coefficient) = value(symbol.multiplier.abs());

    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    match &symbol.kind {
        Kind::Number => return format!("{}{}", sign, match den_coefficient.as_str() {
            "1" => num_coefficient,
            _ => format!("\\frac{{{}}}{{{}}}", num_coefficient, den_coefficient),
        }),
        Kind::Product(factors) => factors.values()
            .for_each(|f| place(f.clone(), &mut numerator, &mut denominator)),
        _ => place(symbol.clone(), &mut numerator, &mut denominator),
    }

    let alone_with_sign = !sign.is_empty() && denominator.is_empty() && den_coefficient == "1";
    let top = side(num_coefficient, &numerator, alone_with_sign);
    let bottom = side(den_coefficient, &denominator, false);
    if bottom == "1" {
        format!("{}{}", sign, top)
    } else {
        format!("{}\\frac{{{}}}{{{}}}", sign, top, bottom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{ctxt::Ctxt, parser::Parser};
    use super::*;

    fn latex_of(expr: &str) -> String {
        let ctxt = Ctxt::default();
        render_latex(&Parser::new(&ctxt).parse_str(expr).unwrap())
    }

    #[test]
    fn numbers() {
        assert_eq!(latex_of("2"), "2");
        assert_eq!(latex_of("1/2"), "\\frac{1}{2}");
        assert_eq!(latex_of("-3/4"), "-\\frac{3}{4}");
    }

    #[test]
    fn fractions() {
        assert_eq!(latex_of("1/x"), "\\frac{1}{x}");
        assert_eq!(latex_of("x/2"), "\\frac{x}{2}");
        assert_eq!(latex_of("3*x/y^2"), "\\frac{3 x}{y^{2}}");
        assert_eq!(latex_of("1/(x+1)"), "\\frac{1}{1+x}");
    }

    #[test]
    fn powers() {
        assert_eq!(latex_of("x^2"), "x^{2}");
        assert_eq!(latex_of("x^(1/3)"), "x^{\\frac{1}{3}}");
        assert_eq!(latex_of("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(latex_of("x^(-1/2)"), "\\frac{1}{\\sqrt{x}}");
        assert_eq!(latex_of("2^x"), "2^{x}");
        assert_eq!(latex_of("2^(-x)"), "\\frac{1}{2^{x}}");
    }

    #[test]
    fn sums() {
        assert_eq!(latex_of("x-1"), "-1+x");
        assert_eq!(latex_of("2*(x+1)^(-1)"), "\\frac{2}{1+x}");
        assert_eq!(latex_of("(x+1)^(-2)"), "\\frac{1}{\\left(1+x\\right)^{2}}");
        assert_eq!(latex_of("y*(x+1)^3"), latex_of("y*(1+x)^3"));
    }

    #[test]
    fn names() {
        assert_eq!(latex_of("alpha*beta"), "\\alpha \\beta");
        assert_eq!(latex_of("PI"), "\\pi");
        assert_eq!(latex_of("x_1"), "x_{1}");
    }

    #[test]
    fn calls() {
        assert_eq!(latex_of("sin(x)"), "\\sin\\left(x\\right)");
        assert_eq!(latex_of("atan(x)"), "\\arctan\\left(x\\right)");
        assert_eq!(latex_of("abs(x)"), "\\left|x\\right|");
        assert_eq!(latex_of("sum(k, k, 1, n)"), "\\sum_{k=1}^{n} k");
    }
}
