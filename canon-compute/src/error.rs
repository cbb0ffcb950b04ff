use ariadne::Fmt;
use canon_attrs::ErrorKind;
use canon_error::EXPR;
use canon_parser::Op;

/// A reserved name was used where a user-defined name is expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is a reserved name", name),
    labels = ["this name"],
    help = format!(
        "`{}` already names a builtin function or constant; {}",
        name.fg(EXPR),
        "choose another name".fg(EXPR),
    ),
)]
pub struct ReservedNameViolation {
    /// The reserved name.
    pub name: String,
}

/// Attempted to divide by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this division"],
    help = "the divisor simplified to zero",
)]
pub struct DivisionByZero;

/// An operator was used where it has no meaning.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` operator cannot be used here", op),
    labels = ["this operator"],
    help = format!("`{}` only separates the arguments of a function call", op.fg(EXPR)),
)]
pub struct UnsupportedOperator {
    /// The operator that was used.
    pub op: Op,
}

/// An operator is missing one of its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing operand for the `{}` operator", op),
    labels = [format!("you might need to add an {} here", "expression".fg(EXPR))],
)]
pub struct MissingOperand {
    /// The operator that is missing an operand.
    pub op: Op,
}

/// Two operands are next to each other with no operator between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator between these operands",
    labels = ["this operand", "and this operand"],
    help = format!("multiplication must be written explicitly, as in {}", "2*x".fg(EXPR)),
)]
pub struct MissingOperator;

/// The function is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        "see the documentation for a list of available functions".to_string()
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
)]
pub struct UndefinedFunction {
    /// The name of the function that was undefined.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// Too many arguments were given to a function call.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("too many arguments were given to the `{}` function", name),
    labels = ["this function call"],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given
    )
)]
pub struct TooManyArguments {
    /// The name of the function that was called.
    pub name: String,

    /// The number of arguments that were expected.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// An argument to a function call is missing.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument #{} for the `{}` function", given + 1, name),
    labels = ["this function call"],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given
    )
)]
pub struct MissingArgument {
    /// The name of the function that was called.
    pub name: String,

    /// The number of arguments that were expected.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A compiled function refers to a variable that is not one of its parameters.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", name),
    labels = ["this expression"],
    help = format!("add `{}` to the parameter list", name.fg(EXPR)),
)]
pub struct UndefinedVariable {
    /// The name of the variable that was undefined.
    pub name: String,
}

/// User-defined functions called each other too deeply.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "maximum call depth exceeded",
    labels = [format!("the `{}` function called itself too many times", name)],
    help = format!("the maximum call depth is {}", depth),
)]
pub struct StackOverflow {
    /// The function that was being expanded.
    pub name: String,

    /// The maximum call depth.
    pub depth: usize,
}

#[cfg(test)]
mod tests {
    use canon_error::Error;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn messages() {
        let err = Error::new(vec![9..10], MissingOperand { op: Op::Comma });
        assert_eq!(err.to_string(), "missing operand for the `,` operator");

        let err = Error::new(vec![0..1], UndefinedVariable { name: "i".to_string() });
        assert_eq!(err.to_string(), "`i` is not defined");
    }
}
