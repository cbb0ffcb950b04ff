//! Tokenizer for infix mathematical expressions.
//!
//! The entry point is [`tokenize`], which turns an expression such as `2*(x+1)^2` into a
//! sequence of [`TokenTree`]s. Parenthesized content becomes a nested [`TokenTree::Group`]
//! rather than a flat stream, so consumers can recurse into groups directly.
//!
//! ```
//! use canon_parser::{tokenize, Op, TokenTree};
//!
//! let tokens = tokenize("a * (b)").unwrap();
//! assert!(matches!(tokens[1], TokenTree::Op { op: Op::Mul, .. }));
//! assert!(matches!(tokens[2], TokenTree::Group { .. }));
//! ```

pub mod error;
pub mod op;
pub mod tokenizer;

pub use error::{InvalidIdentifier, MalformedExpression};
pub use op::{Associativity, Op, Precedence};
pub use tokenizer::{is_identifier, tokenize, validate_identifier, TokenTree};
