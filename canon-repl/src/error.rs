use ariadne::Source;
use canon_error::Error as ComputeError;

/// Utility enum to package errors that can occur while running a REPL command.
#[derive(Debug)]
pub enum Error {
    /// An error from parsing, evaluating, or registering an expression. The source is the text
    /// the error's spans point into.
    Compute {
        error: ComputeError,
        source: String,
    },

    /// The command itself was malformed.
    Usage(String),
}

impl Error {
    /// Wraps a compute error together with the text its spans point into.
    pub fn compute(error: ComputeError, source: &str) -> Self {
        Self::Compute { error, source: source.to_string() }
    }

    /// Report this [`Error`] to stderr.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self) {
        match self {
            Self::Compute { error, source } => {
                let report = error.build_report("input");
                if let Err(err) = report.eprint(("input", Source::from(source.as_str()))) {
                    eprintln!("{}", err);
                }
            },
            Self::Usage(message) => eprintln!("error: {}", message),
        }
    }
}
