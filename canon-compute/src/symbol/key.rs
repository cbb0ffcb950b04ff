use std::cmp::Ordering;
use super::Symbol;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A totally ordered wrapper around [`f64`], used wherever a float takes part in a key.
///
/// `-0.0` and `0.0` compare equal. NaN, whatever its sign, sorts after every other value.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Real(pub f64);

impl Real {
    fn normalized(self) -> f64 {
        if self.0 == 0.0 {
            0.0
        } else if self.0.is_nan() {
            f64::NAN.copysign(1.0)
        } else {
            self.0
        }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().total_cmp(&other.normalized())
    }
}

/// The structural key a child is stored under in its parent.
///
/// Two terms that should be combined by their owner always produce equal keys, so collisions in
/// a [`Terms`](super::Terms) map are exactly the places where simplification happens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Key {
    /// Plain numbers.
    Number,

    /// A numeric base raised to a symbolic exponent, such as `2^x`.
    Constant(Real),

    /// A variable, or anything whose base is a variable.
    Name(String),

    /// A composite or function with its multiplier and power set to 1.
    Shape(Box<Symbol>),

    /// The numeric power of a term inside a polynomial sum.
    Power(Real),

    /// The symbolic exponent of a term inside a polynomial sum.
    Exponent(Box<Symbol>),
}
