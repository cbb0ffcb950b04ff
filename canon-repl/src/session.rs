use canon_compute::{
    compile::build,
    ctxt::Ctxt,
    error::ReservedNameViolation,
    evaluate,
    fmt::{render_latex, render_text, TextMode},
    parse,
    parser::Substitutions,
    symbol::Symbol,
};
use canon_parser::InvalidIdentifier;
use crate::{command::Command, error::Error};

/// The state of a REPL session: the context that constants and functions are registered in, and
/// the numbered list of equations entered so far.
#[derive(Debug, Default)]
pub struct Session {
    ctxt: Ctxt,
    equations: Vec<Symbol>,
}

impl Session {
    /// Creates a session with the default context and no equations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a command, returning the text to print, if any.
    pub fn run(&mut self, command: Command) -> Result<Option<String>, Error> {
        tracing::debug!(?command, "running command");
        match command {
            Command::Parse(expr) => {
                let symbol = parse(expr, &self.ctxt).map_err(|err| Error::compute(err, expr))?;
                Ok(Some(self.store(symbol)))
            },
            Command::Eval(expr) => {
                let symbol = evaluate(expr, &self.ctxt, &Substitutions::new())
                    .map_err(|err| Error::compute(err, expr))?;
                Ok(Some(self.store(symbol)))
            },
            Command::Latex(n) => Ok(Some(render_latex(self.equation(n)?))),
            Command::Fn(n) => {
                let symbol = self.equation(n)?;
                let compiled = build(symbol, None)
                    .map_err(|err| Error::compute(err, &symbol.to_string()))?;
                Ok(Some(format!(
                    "|{}| {}",
                    compiled.params().join(", "),
                    render_text(symbol, TextMode::Function),
                )))
            },
            Command::Const { name, value } => {
                self.ctxt.set_constant(name, value).map_err(|err| Error::compute(err, name))?;
                Ok(None)
            },
            Command::Def { name, params, body } => {
                self.ctxt.set_function(name, &params, body).map_err(|err| {
                    // name errors point into the offending name, everything else into the body
                    let source = err.downcast_ref::<ReservedNameViolation>()
                        .map(|kind| kind.name.as_str())
                        .or_else(|| err.downcast_ref::<InvalidIdentifier>().map(|kind| kind.name.as_str()))
                        .unwrap_or(body)
                        .to_string();
                    Error::compute(err, &source)
                })?;
                Ok(None)
            },
            Command::List => Ok(Some(
                self.equations.iter()
                    .enumerate()
                    .map(|(i, symbol)| format!("[{}] {}", i + 1, symbol))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )),
            Command::Clear => {
                self.equations.clear();
                Ok(None)
            },
        }
    }

    /// Stores a new equation, returning its numbered canonical form.
    fn store(&mut self, symbol: Symbol) -> String {
        self.equations.push(symbol);
        format!("[{}] {}", self.equations.len(), self.equations[self.equations.len() - 1])
    }

    /// Returns the equation with the given 1-based number, or the latest one.
    fn equation(&self, n: Option<usize>) -> Result<&Symbol, Error> {
        let equation = match n {
            Some(n) => n.checked_sub(1).and_then(|i| self.equations.get(i)),
            None => self.equations.last(),
        };
        equation.ok_or_else(|| match n {
            Some(n) => Error::Usage(format!("there is no equation {}", n)),
            None => Error::Usage("there are no equations yet".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(session: &mut Session, line: &str) -> Option<String> {
        session.run(Command::parse(line).unwrap()).unwrap()
    }

    #[test]
    fn numbers_equations() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "2*x+3*x"), Some("[1] 5*x".to_string()));
        assert_eq!(run(&mut session, ":eval 2/4"), Some("[2] 0.5".to_string()));
        assert_eq!(run(&mut session, ":list"), Some("[1] 5*x\n[2] 0.5".to_string()));

        assert_eq!(run(&mut session, ":clear"), None);
        assert_eq!(run(&mut session, ":list"), Some(String::new()));
        assert_eq!(run(&mut session, "y"), Some("[1] y".to_string()));
    }

    #[test]
    fn renders_equations() {
        let mut session = Session::new();
        run(&mut session, "x^2/2");
        run(&mut session, "sin(y)");
        assert_eq!(run(&mut session, ":latex 1"), Some("\\frac{x^{2}}{2}".to_string()));
        assert_eq!(run(&mut session, ":latex"), Some("\\sin\\left(y\\right)".to_string()));
        assert_eq!(run(&mut session, ":fn"), Some("|y| (y).sin()".to_string()));
    }

    #[test]
    fn missing_equations() {
        let mut session = Session::new();
        assert!(matches!(session.run(Command::Latex(None)), Err(Error::Usage(_))));
        run(&mut session, "x");
        assert!(matches!(session.run(Command::Fn(Some(0))), Err(Error::Usage(_))));
        assert!(matches!(session.run(Command::Fn(Some(2))), Err(Error::Usage(_))));
    }

    #[test]
    fn registers_constants_and_functions() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, ":const g 9.81"), None);
        assert_eq!(run(&mut session, ":eval 2*g"), Some("[1] 19.62".to_string()));

        assert_eq!(run(&mut session, ":def f(x, y) = x^2 + y"), None);
        assert_eq!(run(&mut session, "f(a, 1)"), Some("[2] 1+a^(2)".to_string()));
    }

    #[test]
    fn reports_errors_against_their_source() {
        let mut session = Session::new();
        match session.run(Command::parse(":def sin(x) = x").unwrap()) {
            Err(Error::Compute { error, source }) => {
                assert!(error.is::<ReservedNameViolation>());
                assert_eq!(source, "sin");
            },
            other => panic!("expected a compute error, got {:?}", other),
        }

        match session.run(Command::parse("1 +").unwrap()) {
            Err(Error::Compute { source, .. }) => assert_eq!(source, "1 +"),
            other => panic!("expected a compute error, got {:?}", other),
        }
    }
}
