//! Constants and limits used throughout the library.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The ratio of a circle's circumference to its diameter.
pub const PI: f64 = std::f64::consts::PI;

/// Euler's number.
pub const E: f64 = std::f64::consts::E;

/// The constants every context starts with. Their names are reserved.
pub static CONSTS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("PI", PI),
        ("E", E),
    ])
});

/// Integer powers of a sum up to this value are expanded term by term.
pub const MAX_EXPAND_POWER: f64 = 64.0;

/// A power of a sum is only expanded if the expansion has at most this many terms.
pub const MAX_EXPAND_TERMS: f64 = 1024.0;

/// The maximum number of terms a `sum` call expands to.
pub const MAX_SUM_TERMS: usize = 1 << 12;

/// The maximum nesting depth of user-defined function calls.
pub const MAX_CALL_DEPTH: usize = 1 << 8;
