//! The term representation shared by the parser, the combinators, and the renderers.
//!
//! Every expression is a single [`Symbol`]: a [`Kind`] describing its shape, a real
//! `multiplier` (coefficient), and a real `power`. Composite kinds own their children in a
//! [`Terms`] map keyed by a structural [`Key`], so like terms always land on the same entry.

pub mod key;

use std::cmp::Ordering;
use std::collections::BTreeMap;
pub use key::{Key, Real};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The children of a composite symbol, keyed by their structural key.
pub type Terms = BTreeMap<Key, Symbol>;

/// The name of the imaginary unit.
pub const IMAGINARY: &str = "i";

/// Classification of a symbol, ordered from the simplest group to the most complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Group {
    Number = 1,
    Variable,
    Function,
    PolySum,
    Product,
    Sum,
    Exponential,
}

/// The shape of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind {
    /// A real number. Its value is the multiplier of the symbol.
    Number,

    /// A named variable, such as `x`. The variable `i` is the imaginary unit.
    Variable(String),

    /// A function call. The first argument is the main argument; `sum` carries four.
    Function(String, Vec<Symbol>),

    /// A sum of powers of the same base, such as `x + x^2`, keyed by power.
    PolySum(Terms),

    /// A product of factors with distinct bases, keyed by base.
    Product(Terms),

    /// A sum of unlike terms, keyed by base.
    Sum(Terms),

    /// A base raised to a symbolic exponent.
    ///
    /// The base always has a multiplier and power of 1, except for a numeric base, whose value
    /// is stored in its multiplier.
    Exponential(Box<Symbol>, Box<Symbol>),
}

/// A single term: `multiplier * shape ^ power`.
///
/// The power of a [`Kind::Number`], [`Kind::Product`] or [`Kind::Exponential`] is always 1.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbol {
    pub multiplier: f64,
    pub power: f64,
    pub kind: Kind,
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind.cmp(&other.kind)
            .then_with(|| Real(self.power).cmp(&Real(other.power)))
            .then_with(|| Real(self.multiplier).cmp(&Real(other.multiplier)))
    }
}

impl From<f64> for Symbol {
    fn from(value: f64) -> Self {
        Symbol::number(value)
    }
}

impl Symbol {
    /// Creates a symbol of the given kind with a multiplier and power of 1.
    pub fn new(kind: Kind) -> Self {
        Self { multiplier: 1.0, power: 1.0, kind }
    }

    /// Creates a number.
    pub fn number(value: f64) -> Self {
        Self { multiplier: value, power: 1.0, kind: Kind::Number }
    }

    pub fn zero() -> Self {
        Self::number(0.0)
    }

    pub fn one() -> Self {
        Self::number(1.0)
    }

    /// Creates a variable with the given name.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(Kind::Variable(name.into()))
    }

    /// Creates the imaginary unit.
    pub fn imaginary() -> Self {
        Self::variable(IMAGINARY)
    }

    /// Creates a function call node.
    pub fn function(name: impl Into<String>, args: Vec<Symbol>) -> Self {
        Self::new(Kind::Function(name.into(), args))
    }

    /// Returns the group of this symbol.
    pub fn group(&self) -> Group {
        match self.kind {
            Kind::Number => Group::Number,
            Kind::Variable(_) => Group::Variable,
            Kind::Function(..) => Group::Function,
            Kind::PolySum(_) => Group::PolySum,
            Kind::Product(_) => Group::Product,
            Kind::Sum(_) => Group::Sum,
            Kind::Exponential(..) => Group::Exponential,
        }
    }

    /// Returns true if the multiplier of this symbol is zero, making the whole term zero.
    pub fn is_zero(&self) -> bool {
        self.multiplier == 0.0
    }

    /// Returns true if this symbol is a number.
    pub fn is_number(&self) -> bool {
        matches!(self.kind, Kind::Number)
    }

    /// Returns true if this symbol is the imaginary unit, with any multiplier or power.
    pub fn is_imaginary(&self) -> bool {
        matches!(&self.kind, Kind::Variable(name) if name == IMAGINARY)
    }

    /// Returns true if this symbol is a function call with the given name.
    pub fn is_function(&self, name: &str) -> bool {
        matches!(&self.kind, Kind::Function(n, _) if n == name)
    }

    /// Returns true if this symbol belongs to the given group and has a power of 1.
    pub fn is_flat(&self, group: Group) -> bool {
        self.group() == group && self.power == 1.0
    }

    /// Returns true if this symbol is a sum or polynomial sum with a power of 1, meaning its
    /// terms can be distributed.
    pub fn is_flat_sum(&self) -> bool {
        self.is_flat(Group::Sum) || self.is_flat(Group::PolySum)
    }

    /// Returns the children of a composite symbol, or `None` for other kinds.
    pub fn children(&self) -> Option<&Terms> {
        match &self.kind {
            Kind::PolySum(terms) | Kind::Product(terms) | Kind::Sum(terms) => Some(terms),
            _ => None,
        }
    }

    /// Consumes this symbol and returns its children, without touching their multipliers.
    pub fn into_children(self) -> Terms {
        match self.kind {
            Kind::PolySum(terms) | Kind::Product(terms) | Kind::Sum(terms) => terms,
            _ => Terms::new(),
        }
    }

    /// Consumes a sum and returns its terms with the multiplier of the sum distributed into
    /// each of them.
    pub fn into_terms(self) -> Vec<Symbol> {
        let multiplier = self.multiplier;
        self.into_children()
            .into_values()
            .map(|mut term| {
                term.multiplier *= multiplier;
                term
            })
            .collect()
    }

    /// Returns a copy of this symbol with its multiplier and power set to 1.
    pub fn shape(&self) -> Symbol {
        Symbol { multiplier: 1.0, power: 1.0, kind: self.kind.clone() }
    }

    /// The key under which this symbol is stored in a product. Factors with equal keys share a
    /// base and combine by adding their exponents.
    pub fn factor_key(&self) -> Key {
        match &self.kind {
            Kind::Number => Key::Number,
            Kind::Variable(name) => Key::Name(name.clone()),
            Kind::Exponential(base, _) => match base.kind {
                Kind::Number => Key::Constant(Real(base.multiplier)),
                _ => base.factor_key(),
            },
            Kind::Function(..) | Kind::PolySum(_) | Kind::Product(_) | Kind::Sum(_) => {
                Key::Shape(Box::new(self.shape()))
            },
        }
    }

    /// The key under which this symbol is stored in a sum. Terms with equal keys share a base
    /// and combine into a single term or polynomial sum.
    pub fn sum_key(&self) -> Key {
        match &self.kind {
            Kind::PolySum(terms) if self.power == 1.0 => terms.values()
                .next()
                .map(Symbol::sum_key)
                .unwrap_or_else(|| self.factor_key()),
            _ => self.factor_key(),
        }
    }

    /// The key under which this symbol is stored in a polynomial sum.
    pub fn power_key(&self) -> Key {
        match &self.kind {
            Kind::Exponential(_, exponent) => Key::Exponent(exponent.clone()),
            _ => Key::Power(Real(self.power)),
        }
    }

    /// Returns true if both symbols are raised to the same exponent.
    pub fn same_power(&self, other: &Symbol) -> bool {
        match (&self.kind, &other.kind) {
            (Kind::Exponential(_, a), Kind::Exponential(_, b)) => a == b,
            (Kind::Exponential(..), _) | (_, Kind::Exponential(..)) => false,
            _ => Real(self.power) == Real(other.power),
        }
    }

    /// Negates this symbol.
    pub fn negate(mut self) -> Symbol {
        self.multiplier = -self.multiplier;
        self
    }

    /// Returns the reciprocal of this symbol.
    ///
    /// The result of inverting a zero symbol has an infinite multiplier; callers that divide
    /// check for zero first.
    pub fn invert(mut self) -> Symbol {
        self.multiplier = 1.0 / self.multiplier;
        self.kind = match self.kind {
            Kind::Number => Kind::Number,
            Kind::Exponential(base, exponent) => Kind::Exponential(base, Box::new(exponent.negate())),
            Kind::Product(factors) => Kind::Product(
                factors.into_iter()
                    .map(|(key, factor)| (key, factor.invert()))
                    .collect()
            ),
            kind => {
                self.power = -self.power;
                kind
            },
        };
        self
    }

    /// Splits this symbol into its base and its exponent. The multiplier is not carried over.
    ///
    /// For `x^3` this is `(x, 3)`; for `x^y` it is `(x, y)`; for `2^x` it is `(2, x)`.
    pub fn split(self) -> (Symbol, Symbol) {
        match self.kind {
            Kind::Exponential(base, exponent) => (*base, *exponent),
            Kind::Number => (Symbol::number(self.multiplier), Symbol::one()),
            kind => (Symbol::new(kind), Symbol::number(self.power)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn squared(name: &str) -> Symbol {
        Symbol { power: 2.0, ..Symbol::variable(name) }
    }

    #[test]
    fn group_order() {
        assert!(Group::Number < Group::Variable);
        assert!(Group::Product < Group::Sum);
        assert!(Group::Sum < Group::Exponential);
    }

    #[test]
    fn variable_keys() {
        let x = Symbol::variable("x");
        assert_eq!(x.factor_key(), Key::Name("x".to_string()));
        assert_eq!(squared("x").factor_key(), x.factor_key());
        assert_ne!(squared("x").power_key(), x.power_key());
    }

    #[test]
    fn shape_key_ignores_multiplier_and_power() {
        let a = Symbol { multiplier: 3.0, power: 2.0, ..Symbol::function("sin", vec![Symbol::variable("x")]) };
        let b = Symbol::function("sin", vec![Symbol::variable("x")]);
        assert_eq!(a.factor_key(), b.factor_key());
    }

    #[test]
    fn exponential_keys() {
        let two_x = Symbol::new(Kind::Exponential(
            Box::new(Symbol::number(2.0)),
            Box::new(Symbol::variable("x")),
        ));
        assert_eq!(two_x.factor_key(), Key::Constant(Real(2.0)));
        assert_eq!(two_x.power_key(), Key::Exponent(Box::new(Symbol::variable("x"))));
    }

    #[test]
    fn invert_flips_power() {
        let inverted = Symbol { multiplier: 4.0, ..squared("x") }.invert();
        assert_eq!(inverted.multiplier, 0.25);
        assert_eq!(inverted.power, -2.0);
        assert_eq!(Symbol::number(4.0).invert(), Symbol::number(0.25));
    }

    #[test]
    fn into_terms_distributes_multiplier() {
        let mut terms = Terms::new();
        terms.insert(Key::Number, Symbol::number(1.0));
        terms.insert(Key::Name("x".to_string()), Symbol::variable("x"));
        let sum = Symbol { multiplier: 3.0, ..Symbol::new(Kind::Sum(terms)) };
        let multipliers = sum.into_terms().iter().map(|t| t.multiplier).collect::<Vec<_>>();
        assert_eq!(multipliers, vec![3.0, 3.0]);
    }

    #[test]
    fn split_variable() {
        let (base, exponent) = squared("y").split();
        assert_eq!(base, Symbol::variable("y"));
        assert_eq!(exponent, Symbol::number(2.0));
    }
}
