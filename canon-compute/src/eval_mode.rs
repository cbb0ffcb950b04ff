#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How eagerly an expression is evaluated. This affects the resolution of constants, calls to
/// transcendental functions, and roots of negative numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvalMode {
    /// Keep constants and transcendental functions symbolic.
    #[default]
    Symbolic,

    /// Replace constants with their values and evaluate functions of numbers to floats.
    Numeric,
}

impl std::fmt::Display for EvalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalMode::Symbolic => write!(f, "symbolic"),
            EvalMode::Numeric => write!(f, "numeric"),
        }
    }
}
