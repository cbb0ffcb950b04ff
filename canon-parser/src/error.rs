use ariadne::Fmt;
use canon_attrs::ErrorKind;
use canon_error::EXPR;

/// The brackets in the expression are unbalanced.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced brackets",
    labels = [if *opening {
        "this parenthesis is never closed"
    } else {
        "this parenthesis has no matching opening parenthesis"
    }],
    help = format!("every {} must be paired with a {}", "(".fg(EXPR), ")".fg(EXPR)),
)]
pub struct MalformedExpression {
    /// The unmatched bracket is an opening bracket. (Otherwise, it is a closing bracket.)
    pub opening: bool,
}

/// A word is neither a valid number nor a valid identifier.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid identifier: `{}`", name),
    labels = ["this word"],
    help = format!(
        "identifiers start with a letter, followed by {}",
        "letters, digits, or underscores".fg(EXPR),
    ),
)]
pub struct InvalidIdentifier {
    /// The offending word.
    pub name: String,
}
