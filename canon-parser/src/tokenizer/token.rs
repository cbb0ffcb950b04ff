use crate::op::Op;
use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the lexer.
///
/// Everything that is not whitespace, an operator, a comma, or a parenthesis is lexed as a
/// [`TokenKind::Word`]. Words are classified into numbers and identifiers afterwards, which
/// keeps malformed input like `1x` or `ab$` in one piece for error reporting.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[token(",")]
    Comma,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[^ \t\r\n\f,+\-*/^()]+")]
    Word,
}

impl TokenKind {
    /// Returns the operator this token kind stands for, if any.
    pub fn as_op(self) -> Option<Op> {
        match self {
            Self::Comma => Some(Op::Comma),
            Self::Add => Some(Op::Add),
            Self::Sub => Some(Op::Sub),
            Self::Mul => Some(Op::Mul),
            Self::Div => Some(Op::Div),
            Self::Exp => Some(Op::Exp),
            _ => None,
        }
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}
