//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs a kind with the source spans it points at.
//!
//! Error kinds are usually unit or named-field structs that derive [`ErrorKind`] through
//! `canon-attrs`:
//!
//! ```ignore
//! use canon_attrs::ErrorKind;
//!
//! #[derive(Debug, Clone, ErrorKind, PartialEq)]
//! #[error(message = "division by zero", labels = ["this division"])]
//! pub struct DivisionByZero;
//! ```

#[cfg(test)]
extern crate self as canon_error;

use ariadne::{Color, Report};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;

    /// The one-line message describing this error, without any source context.
    fn message(&self) -> String;

    /// Returns `self` as [`Any`], so callers can recover the concrete kind.
    fn as_any(&self) -> &dyn Any;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Returns the concrete kind of this error if it is a `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if this error is of kind `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<K>().is_some()
    }

    /// Replaces every span of this error with the given span.
    ///
    /// Used when an error raised while parsing one source (such as the body of a user function)
    /// has to be reported against another.
    pub fn relocate(mut self, span: Range<usize>) -> Self {
        self.spans.iter_mut().for_each(|s| *s = span.clone());
        self
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use canon_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` is not a number", name),
        labels = ["this word"],
        help = "numbers are written with digits",
    )]
    struct NotANumber {
        name: String,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "something went wrong", labels = ["here", "and here"])]
    struct TwoPlaces;

    fn render(err: &Error, src: &str) -> String {
        let mut buf = Vec::new();
        err.build_report("input").write(("input", Source::from(src)), &mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn report_contains_message_label_and_help() {
        let err = Error::new(vec![4..7], NotANumber { name: "abc".to_string() });
        let out = render(&err, "1 + abc");
        assert!(out.contains("`abc` is not a number"));
        assert!(out.contains("this word"));
        assert!(out.contains("numbers are written with digits"));
    }

    #[test]
    fn display_uses_message() {
        let err = Error::new(vec![0..1], TwoPlaces);
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn downcast_to_concrete_kind() {
        let err = Error::new(vec![0..3], NotANumber { name: "foo".to_string() });
        assert!(err.is::<NotANumber>());
        assert!(!err.is::<TwoPlaces>());
        assert_eq!(err.downcast_ref::<NotANumber>().map(|k| k.name.as_str()), Some("foo"));
    }

    #[test]
    fn relocate_all_spans() {
        let err = Error::new(vec![0..1, 3..4], TwoPlaces).relocate(10..12);
        assert_eq!(err.spans, vec![10..12, 10..12]);
        let out = render(&err, "0123456789ab");
        assert!(out.contains("and here"));
    }
}
