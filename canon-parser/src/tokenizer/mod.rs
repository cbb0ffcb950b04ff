pub mod token;

use canon_error::Error;
use crate::{error::{InvalidIdentifier, MalformedExpression}, op::Op};
use logos::{Lexer, Logos};
use std::ops::Range;
pub use token::{Token, TokenKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returns an iterator over the token kinds produced by the lexer.
pub fn lex(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the lexer.
///
/// Input the lexer cannot match is kept as a [`TokenKind::Word`], so that it is reported as an
/// invalid identifier later instead of silently dropped.
pub fn lex_complete(input: &str) -> Box<[Token]> {
    let mut lexer = lex(input);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: kind.unwrap_or(TokenKind::Word),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

/// A number, name, operator, or parenthesized group of tokens.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenTree {
    /// A numeric literal, such as `2`, `0.5`, or `1e-3`.
    Number {
        value: f64,
        span: Range<usize>,
    },

    /// An identifier, such as `x` or `sin`.
    Name {
        name: String,
        span: Range<usize>,
    },

    /// An infix operator.
    Op {
        op: Op,
        span: Range<usize>,
    },

    /// The tokens between a pair of matching parentheses. The span includes both parentheses.
    Group {
        tokens: Vec<TokenTree>,
        span: Range<usize>,
    },
}

impl TokenTree {
    /// Returns the region of the source code that this tree was parsed from.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Number { span, .. }
                | Self::Name { span, .. }
                | Self::Op { span, .. }
                | Self::Group { span, .. } => span.clone(),
        }
    }
}

/// Returns true if the given name is a valid identifier: an ASCII letter, followed by any number
/// of ASCII letters, digits, or underscores.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().map_or(false, |c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Checks that the given name is a valid identifier.
pub fn validate_identifier(name: &str) -> Result<(), InvalidIdentifier> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(InvalidIdentifier { name: name.to_string() })
    }
}

/// Classifies a word as a number or an identifier.
fn classify(word: &str, span: Range<usize>) -> Result<TokenTree, Error> {
    if word.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return word.parse::<f64>()
            .map(|value| TokenTree::Number { value, span: span.clone() })
            .map_err(|_| Error::new(vec![span], InvalidIdentifier { name: word.to_string() }));
    }

    validate_identifier(word).map_err(|kind| Error::new(vec![span.clone()], kind))?;
    Ok(TokenTree::Name { name: word.to_string(), span })
}

/// A token with the whitespace around it removed. Words that were only separated by whitespace
/// are joined, so `1 2` reads as `12`.
#[derive(Debug, Clone, PartialEq)]
struct Piece {
    kind: TokenKind,
    text: String,
    span: Range<usize>,
}

/// Drops whitespace from the lexed tokens, joining the words on either side of it.
fn strip_whitespace(tokens: &[Token]) -> Vec<Piece> {
    let mut pieces = Vec::<Piece>::with_capacity(tokens.len());
    for token in tokens.iter() {
        match (token.kind, pieces.last_mut()) {
            (TokenKind::Whitespace, _) => {},
            (TokenKind::Word, Some(last)) if last.kind == TokenKind::Word => {
                last.text.push_str(token.lexeme);
                last.span.end = token.span.end;
            },
            (kind, _) => pieces.push(Piece {
                kind,
                text: token.lexeme.to_string(),
                span: token.span.clone(),
            }),
        }
    }
    pieces
}

/// Returns true if the piece is a word that starts like a number.
fn is_numeric_word(piece: &Piece) -> bool {
    piece.kind == TokenKind::Word && piece.text.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// If the pieces starting at `i` spell a number in scientific notation with a signed exponent
/// (such as `1e` `-` `5`), returns the joined number and the span covering all three pieces.
fn signed_exponent(pieces: &[Piece], i: usize) -> Option<(String, Range<usize>)> {
    let [mantissa, sign, exponent] = pieces.get(i..i + 3)? else {
        return None;
    };

    let matches = is_numeric_word(mantissa)
        && mantissa.text.ends_with(['e', 'E'])
        && matches!(sign.kind, TokenKind::Add | TokenKind::Sub)
        && exponent.kind == TokenKind::Word
        && exponent.text.starts_with(|c: char| c.is_ascii_digit());

    matches.then(|| (
        format!("{}{}{}", mantissa.text, sign.text, exponent.text),
        mantissa.span.start..exponent.span.end,
    ))
}

/// Tokenizes the given expression into a sequence of [`TokenTree`]s.
///
/// Whitespace is stripped before words are classified, signed exponents in scientific notation
/// are kept inside their number, and a multiplication is inserted between adjacent
/// parenthesized groups, so `(a)(b)` reads as `(a)*(b)`. Spans always point into `input`.
pub fn tokenize(input: &str) -> Result<Vec<TokenTree>, Error> {
    let pieces = strip_whitespace(&lex_complete(input));
    let mut open = Vec::<(Range<usize>, Vec<TokenTree>)>::new();
    let mut current = Vec::new();
    let mut i = 0;

    while let Some(piece) = pieces.get(i) {
        i += 1;
        match piece.kind {
            TokenKind::OpenParen => {
                if matches!(current.last(), Some(TokenTree::Group { .. })) {
                    current.push(TokenTree::Op { op: Op::Mul, span: piece.span.clone() });
                }
                open.push((piece.span.clone(), std::mem::take(&mut current)));
            },
            TokenKind::CloseParen => {
                let (opening, outer) = open.pop().ok_or_else(|| {
                    Error::new(vec![piece.span.clone()], MalformedExpression { opening: false })
                })?;
                let inner = std::mem::replace(&mut current, outer);
                current.push(TokenTree::Group { tokens: inner, span: opening.start..piece.span.end });
            },
            TokenKind::Word => {
                let tree = match signed_exponent(&pieces, i - 1) {
                    Some((word, span)) => {
                        i += 2;
                        classify(&word, span)?
                    },
                    None => classify(&piece.text, piece.span.clone())?,
                };
                current.push(tree);
            },
            kind => {
                if let Some(op) = kind.as_op() {
                    current.push(TokenTree::Op { op, span: piece.span.clone() });
                }
            },
        }
    }

    if let Some((opening, _)) = open.pop() {
        return Err(Error::new(vec![opening], MalformedExpression { opening: true }));
    }

    Ok(current)
}
