//! Rendering of symbols as text and LaTeX.
//!
//! ```
//! use canon_compute::{ctxt::Ctxt, parse};
//! use canon_compute::fmt::{render_latex, render_text, TextMode};
//!
//! let ctxt = Ctxt::default();
//! let symbol = parse("x^2/2", &ctxt).unwrap();
//! assert_eq!(render_text(&symbol, TextMode::Canonical), "0.5*x^(2)");
//! assert_eq!(render_text(&symbol, TextMode::Function), "0.5*(x).powf(2.0)");
//! assert_eq!(render_latex(&symbol), "\\frac{x^{2}}{2}");
//! ```

pub mod latex;
pub mod text;

use crate::symbol::{Key, Kind, Symbol, Terms, IMAGINARY};

pub use latex::{render_latex, Latex, LatexFormatter};
pub use text::{render_text, TextMode};

/// Returns true if the term is imaginary, either as the unit itself or as a product with it.
fn has_imaginary(symbol: &Symbol) -> bool {
    match &symbol.kind {
        Kind::Product(factors) => factors.contains_key(&Key::Name(IMAGINARY.to_string())),
        _ => symbol.is_imaginary(),
    }
}

/// Renders the children of a composite, ordered lexicographically by their canonical text, with
/// imaginary terms last.
fn sorted_children(terms: &Terms, render: impl Fn(&Symbol) -> String) -> Vec<String> {
    let mut rendered = terms.values()
        .map(|term| ((has_imaginary(term), text::canonical(term)), render(term)))
        .collect::<Vec<_>>();
    rendered.sort_by(|(a, _), (b, _)| a.cmp(b));
    rendered.into_iter().map(|(_, text)| text).collect()
}
