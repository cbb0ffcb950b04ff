use crate::error::Error;

/// A line of REPL input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    /// Parse an expression symbolically and store it as a new equation.
    Parse(&'a str),

    /// Evaluate an expression numerically and store it as a new equation.
    Eval(&'a str),

    /// Print an equation as LaTeX. Defaults to the latest equation.
    Latex(Option<usize>),

    /// Print an equation as a Rust function of its free variables. Defaults to the latest
    /// equation.
    Fn(Option<usize>),

    /// Define a constant.
    Const {
        name: &'a str,
        value: f64,
    },

    /// Define a function, as in `f(x, y) = x^2 + y`.
    Def {
        name: &'a str,
        params: Vec<&'a str>,
        body: &'a str,
    },

    /// Print every stored equation.
    List,

    /// Forget every stored equation.
    Clear,
}

/// Parses an optional 1-based equation number.
fn equation_number(arg: &str) -> Result<Option<usize>, Error> {
    if arg.is_empty() {
        return Ok(None);
    }
    arg.parse()
        .map(Some)
        .map_err(|_| Error::Usage(format!("`{}` is not an equation number", arg)))
}

/// Parses the arguments of `:def`, in the form `name(params) = body`.
fn definition(arg: &str) -> Result<Command<'_>, Error> {
    let usage = || Error::Usage("expected a definition like `f(x, y) = x^2 + y`".to_string());

    let (head, body) = arg.split_once('=').ok_or_else(usage)?;
    let (name, params) = head.trim().split_once('(').ok_or_else(usage)?;
    let params = params.strip_suffix(')').ok_or_else(usage)?;
    let params = if params.trim().is_empty() {
        Vec::new()
    } else {
        params.split(',').map(str::trim).collect()
    };

    Ok(Command::Def { name: name.trim(), params, body: body.trim() })
}

impl<'a> Command<'a> {
    /// Parses a non-empty line of input.
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Command::Parse(line));
        };

        let (name, arg) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
        let arg = arg.trim();
        match name {
            "eval" if !arg.is_empty() => Ok(Command::Eval(arg)),
            "eval" => Err(Error::Usage("`:eval` expects an expression".to_string())),
            "latex" => Ok(Command::Latex(equation_number(arg)?)),
            "fn" => Ok(Command::Fn(equation_number(arg)?)),
            "const" => {
                let (name, value) = arg.split_once(char::is_whitespace)
                    .ok_or_else(|| Error::Usage("expected `:const name value`".to_string()))?;
                let value = value.trim().parse()
                    .map_err(|_| Error::Usage(format!("`{}` is not a number", value.trim())))?;
                Ok(Command::Const { name, value })
            },
            "def" => definition(arg),
            "list" => Ok(Command::List),
            "clear" => Ok(Command::Clear),
            _ => Err(Error::Usage(format!("unknown command `:{}`", name))),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn plain_input() {
        assert_eq!(Command::parse("  x + 1 ").unwrap(), Command::Parse("x + 1"));
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(Command::parse(":eval sin(PI/2)").unwrap(), Command::Eval("sin(PI/2)"));
        assert_eq!(Command::parse(":latex").unwrap(), Command::Latex(None));
        assert_eq!(Command::parse(":latex 2").unwrap(), Command::Latex(Some(2)));
        assert_eq!(Command::parse(":fn 1").unwrap(), Command::Fn(Some(1)));
        assert_eq!(Command::parse(":const g 9.81").unwrap(), Command::Const { name: "g", value: 9.81 });
        assert_eq!(Command::parse(":list").unwrap(), Command::List);
        assert_eq!(Command::parse(":clear").unwrap(), Command::Clear);
    }

    #[test]
    fn definitions() {
        assert_eq!(Command::parse(":def f(x, y) = x^2 + y").unwrap(), Command::Def {
            name: "f",
            params: vec!["x", "y"],
            body: "x^2 + y",
        });
        assert_eq!(Command::parse(":def c() = 3").unwrap(), Command::Def {
            name: "c",
            params: vec![],
            body: "3",
        });
    }

    #[test]
    fn malformed_commands() {
        assert!(matches!(Command::parse(":eval"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse(":latex two"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse(":const g"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse(":const g fast"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse(":def f = x"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse(":plot x"), Err(Error::Usage(_))));
    }
}
