//! The algebraic combinators: addition, multiplication, division, and exponentiation of
//! [`Symbol`](crate::symbol::Symbol)s.
//!
//! Each combinator takes ownership of its operands and returns the combined symbol, already in
//! canonical form: like terms are merged, zero terms are dropped, and composites left with a
//! single child collapse into that child.
//!
//! ```
//! use canon_compute::combine::{add, multiply};
//! use canon_compute::symbol::Symbol;
//!
//! let x = Symbol::variable("x");
//! let two_x = add(x.clone(), x.clone());
//! assert_eq!(two_x, multiply(Symbol::number(2.0), x));
//! ```

mod add;
pub mod insert;
mod multiply;
mod power;

pub use add::{add, subtract};
pub use insert::{insert_power_term, insert_term, poly_from, product_from, sum_from};
pub use multiply::{distribute, divide, multiply};
pub use power::{absolute, expand_powers, is_even, is_even_root, pow, pow_number, raise};
