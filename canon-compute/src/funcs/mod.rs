//! All built-in functions available to expressions.
//!
//! Each function is implemented as a unit `struct` implementing the [`Builtin`] trait. Functions
//! that have a plain numeric counterpart also provide an `eval_static` method, which evaluates
//! the function on a float and is used when a number is passed in numeric mode.
//!
//! # Example
//!
//! ```
//! use canon_compute::ctxt::Ctxt;
//! use canon_compute::eval_mode::EvalMode;
//! use canon_compute::funcs::trigonometry::Sin;
//! use canon_compute::parser::Parser;
//! use canon_compute::symbol::Symbol;
//!
//! // evaluate sin(0) using `eval_static`
//! assert_eq!(Sin::eval_static(0.0), 0.0);
//!
//! // evaluate sin(0) through a parser
//! let ctxt = Ctxt::default();
//! let parser = Parser::new(&ctxt).with_mode(EvalMode::Numeric);
//! let result = parser.apply_function("sin", Symbol::zero(), vec![]).unwrap();
//! assert_eq!(result, Symbol::zero());
//! ```

mod helper;
pub mod miscellaneous;
pub mod power;
pub mod sequence;
pub mod trigonometry;

use canon_error::Error;
use crate::{parser::Parser, symbol::Symbol};
use std::{collections::HashMap, fmt::Debug, sync::Arc};

/// A function that is implemented natively and cannot be redefined.
pub trait Builtin: Debug + Send + Sync {
    /// The name of the function.
    fn name(&self) -> &'static str;

    /// The number of arguments the function takes.
    fn arity(&self) -> usize;

    /// Applies the function to the given arguments.
    ///
    /// The number of arguments has already been checked against [`Builtin::arity`]. The parser
    /// carries the evaluation mode, and is used by functions that need to parse or substitute
    /// into their arguments.
    fn apply(&self, args: Vec<Symbol>, parser: &Parser) -> Result<Symbol, Error>;
}

/// Returns all builtin functions, keyed by name.
pub fn all() -> HashMap<&'static str, Arc<dyn Builtin>> {
    use miscellaneous::*;
    use power::*;
    use sequence::*;
    use trigonometry::*;

    macro_rules! build {
        ($($upname:ident),* $(,)?) => {
            [
                $(
                    Arc::new($upname) as Arc<dyn Builtin>,
                )*
            ]
                .into_iter()
                .map(|builtin| (builtin.name(), builtin))
                .collect()
        };
    }

    build! {
        Sin, Cos, Tan, Sec, Csc, Cot,
        Asin, Acos, Atan,
        Exp, Log, Sqrt,
        Abs,
        Sum,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn names_match_keys() {
        for (name, builtin) in all() {
            assert_eq!(name, builtin.name());
        }
    }

    #[test]
    fn arities() {
        let funcs = all();
        assert_eq!(funcs["sin"].arity(), 1);
        assert_eq!(funcs["sum"].arity(), 4);
        assert_eq!(funcs.len(), 14);
    }
}
