//! Reduction of token trees into simplified symbols.
//!
//! The [`Parser`] scans a sequence of [`TokenTree`]s from left to right, tracking the precedence
//! of the last operator it has seen. When it finds an operator that binds no tighter than that
//! one (or reaches the end of the input), the range scanned since the previous boundary is
//! reduced from right to left with the algebraic combinators:
//!
//! - Results at the level of addition and subtraction are folded into a map of terms.
//! - Results at the level of multiplication and division are queued back at the front of the
//!   input, and scanning restarts from the beginning.
//!
//! Parenthesized groups and the arguments of function calls are reduced recursively before they
//! take part in the scan, so every operand the scan sees is already a simplified [`Symbol`].

use canon_error::Error;
use canon_parser::{tokenize, Associativity, Op, TokenTree};
use crate::{
    combine::{divide, expand_powers, multiply, pow},
    consts::MAX_CALL_DEPTH,
    ctxt::{Ctxt, Func},
    error::{
        MissingArgument,
        MissingOperand,
        MissingOperator,
        ReservedNameViolation,
        StackOverflow,
        TooManyArguments,
        UndefinedFunction,
        UnsupportedOperator,
    },
    eval_mode::EvalMode,
    pack::{pack, unpack},
    symbol::{Key, Symbol, Terms},
};
use once_cell::sync::Lazy;
use std::{collections::{HashMap, VecDeque}, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The value an identifier is replaced with while parsing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Replacement {
    /// A number.
    Number(f64),

    /// An expression, which is parsed in place of the identifier.
    Text(String),

    /// An already parsed symbol.
    Symbol(Symbol),
}

impl From<f64> for Replacement {
    fn from(value: f64) -> Self {
        Replacement::Number(value)
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Replacement::Text(text.to_string())
    }
}

impl From<String> for Replacement {
    fn from(text: String) -> Self {
        Replacement::Text(text)
    }
}

impl From<Symbol> for Replacement {
    fn from(symbol: Symbol) -> Self {
        Replacement::Symbol(symbol)
    }
}

/// A mapping from identifiers to the values they are replaced with.
pub type Substitutions = HashMap<String, Replacement>;

static NO_SUBSTITUTIONS: Lazy<Substitutions> = Lazy::new(HashMap::new);

/// An element of the scan: either a reduced operand, or an operator waiting to be applied.
#[derive(Debug, Clone)]
enum Item {
    Operand(Symbol, Range<usize>),
    Operator(Op, Range<usize>),
}

/// A reduced operand and the region of the source it came from.
type Spanned = (Symbol, Range<usize>);

/// Returns true if the token is a comma, which separates the arguments of a call.
fn is_comma(token: &TokenTree) -> bool {
    matches!(token, TokenTree::Op { op: Op::Comma, .. })
}

/// Parses expressions against a [`Ctxt`].
///
/// A parser is cheap to copy. It carries the evaluation mode and the substitutions that apply
/// to a single parse; nothing is shared between parses.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    /// The constants and functions available to the expression.
    ctxt: &'a Ctxt,

    /// Whether constants and functions of numbers are evaluated.
    mode: EvalMode,

    /// Identifiers to replace while parsing.
    subs: &'a Substitutions,

    /// The number of user-defined functions currently being expanded.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a symbolic parser with no substitutions.
    pub fn new(ctxt: &'a Ctxt) -> Self {
        Self {
            ctxt,
            mode: EvalMode::default(),
            subs: &NO_SUBSTITUTIONS,
            depth: 0,
        }
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the substitutions applied to identifiers.
    pub fn with_substitutions(mut self, subs: &'a Substitutions) -> Self {
        self.subs = subs;
        self
    }

    /// Returns the evaluation mode.
    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// Returns the context expressions are parsed against.
    pub fn ctxt(&self) -> &'a Ctxt {
        self.ctxt
    }

    /// Tokenizes and parses an expression into a single symbol, with small integral powers of
    /// sums expanded.
    pub fn parse_str(&self, expr: &str) -> Result<Symbol, Error> {
        if let Some(name) = self.subs.keys().find(|name| self.ctxt.is_reserved(name)) {
            return Err(Error::new(vec![0..expr.len()], ReservedNameViolation { name: name.clone() }));
        }

        let tokens = tokenize(expr)?;
        self.parse_tokens(&tokens).map(|terms| self.finish(pack(terms)))
    }

    /// Parses a sequence of tokens into a map of terms. The map always holds at least one term;
    /// an empty expression is zero.
    ///
    /// Powers of sums are left whole in the terms, so that they can still merge with other
    /// powers of the same sum.
    pub fn parse_tokens(&self, tokens: &[TokenTree]) -> Result<Terms, Error> {
        let items = self.resolve(tokens)?;
        let mut terms = self.reduce(items)?;
        if terms.is_empty() {
            terms.insert(Key::Number, Symbol::zero());
        }
        Ok(terms)
    }

    /// Parses a sequence of tokens with a different set of substitutions.
    pub fn parse_with(&self, tokens: &[TokenTree], subs: &Substitutions) -> Result<Symbol, Error> {
        Parser { subs, ..*self }.parse_tokens(tokens).map(|terms| self.finish(pack(terms)))
    }

    /// Applies the function with the given name to `argument`, followed by the extra
    /// arguments.
    pub fn apply_function(&self, name: &str, argument: Symbol, extra: Vec<Symbol>) -> Result<Symbol, Error> {
        let func = self.lookup(name, 0..0)?;
        let mut args = Vec::with_capacity(extra.len() + 1);
        args.push(argument);
        args.extend(extra);
        self.apply(name, func, args, 0..0).map(|symbol| self.finish(symbol))
    }

    /// Expands the powers of sums left in a complete result.
    fn finish(&self, symbol: Symbol) -> Symbol {
        expand_powers(symbol, self.mode)
    }

    /// Converts tokens into operands and operators. Groups and function calls are parsed here.
    fn resolve(&self, tokens: &[TokenTree]) -> Result<VecDeque<Item>, Error> {
        let mut items = VecDeque::with_capacity(tokens.len());
        let mut tokens = tokens.iter().peekable();

        while let Some(token) = tokens.next() {
            let item = match token {
                TokenTree::Number { value, span } => Item::Operand(Symbol::number(*value), span.clone()),
                TokenTree::Name { name, span } => {
                    if let Some(TokenTree::Group { tokens: args, span: args_span }) = tokens.peek() {
                        let span = span.start..args_span.end;
                        let call = self.call(name, args, span.clone())?;
                        tokens.next();
                        Item::Operand(call, span)
                    } else {
                        Item::Operand(self.leaf(name, span.clone())?, span.clone())
                    }
                },
                TokenTree::Op { op, span } => Item::Operator(*op, span.clone()),
                TokenTree::Group { tokens: inner, span } => {
                    Item::Operand(pack(self.parse_tokens(inner)?), span.clone())
                },
            };
            items.push_back(item);
        }

        Ok(items)
    }

    /// Resolves an identifier that is not called.
    fn leaf(&self, name: &str, span: Range<usize>) -> Result<Symbol, Error> {
        if let Some(replacement) = self.subs.get(name) {
            if self.ctxt.is_reserved(name) {
                return Err(Error::new(vec![span], ReservedNameViolation { name: name.to_string() }));
            }

            return match replacement {
                Replacement::Number(value) => Ok(Symbol::number(*value)),
                Replacement::Symbol(symbol) => Ok(symbol.clone()),
                Replacement::Text(text) => tokenize(text)
                    .and_then(|tokens| self.parse_with(&tokens, &NO_SUBSTITUTIONS))
                    .map_err(|err| err.relocate(span)),
            };
        }

        if let Some(Func::Native(_)) = self.ctxt.get_func(name) {
            return Err(Error::new(vec![span], ReservedNameViolation { name: name.to_string() }));
        }

        if self.mode == EvalMode::Numeric {
            if let Some(value) = self.ctxt.get_constant(name) {
                tracing::debug!(name, value, "resolved constant");
                return Ok(Symbol::number(value));
            }
        }

        Ok(Symbol::variable(name))
    }

    /// Finds the function with the given name.
    fn lookup(&self, name: &str, span: Range<usize>) -> Result<&'a Func, Error> {
        self.ctxt.get_func(name).ok_or_else(|| Error::new(vec![span], UndefinedFunction {
            name: name.to_string(),
            suggestions: self.ctxt.get_similar_funcs(name)
                .into_iter()
                .map(String::from)
                .collect(),
        }))
    }

    /// Parses the arguments of a function call and applies the function to them.
    fn call(&self, name: &str, args: &[TokenTree], span: Range<usize>) -> Result<Symbol, Error> {
        let func = self.lookup(name, span.clone())?;
        let args = if args.is_empty() {
            Vec::new()
        } else {
            let commas = args.iter()
                .filter(|token| is_comma(token))
                .map(TokenTree::span)
                .collect::<Vec<_>>();
            args.split(is_comma)
                .enumerate()
                .map(|(i, arg)| {
                    if arg.is_empty() {
                        // blame the comma after the argument, or the one before the last
                        let comma = commas.get(i).or_else(|| commas.last()).cloned().unwrap_or(span.clone());
                        return Err(Error::new(vec![comma], MissingOperand { op: Op::Comma }));
                    }
                    self.parse_tokens(arg).map(pack)
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        self.apply(name, func, args, span)
    }

    /// Applies a function to already parsed arguments.
    fn apply(&self, name: &str, func: &Func, args: Vec<Symbol>, span: Range<usize>) -> Result<Symbol, Error> {
        let expected = func.arity();
        let given = args.len();
        if given < expected {
            return Err(Error::new(vec![span], MissingArgument { name: name.to_string(), expected, given }));
        }
        if given > expected {
            return Err(Error::new(vec![span], TooManyArguments { name: name.to_string(), expected, given }));
        }

        match func {
            Func::Native(builtin) => builtin.apply(args, self).map_err(|err| err.relocate(span)),
            Func::Composite { params, body } => {
                if self.depth >= MAX_CALL_DEPTH {
                    return Err(Error::new(vec![span], StackOverflow {
                        name: name.to_string(),
                        depth: MAX_CALL_DEPTH,
                    }));
                }

                tracing::debug!(name, depth = self.depth + 1, "expanding user function");
                let subs = params.iter()
                    .cloned()
                    .zip(args.into_iter().map(Replacement::Symbol))
                    .collect::<Substitutions>();
                Parser { subs: &subs, depth: self.depth + 1, ..*self }
                    .parse_tokens(body)
                    .map(pack)
                    .map_err(|err| err.relocate(span))
            },
        }
    }

    /// Scans the items, reducing each range between boundaries.
    fn reduce(&self, mut items: VecDeque<Item>) -> Result<Terms, Error> {
        let mut terms = Terms::new();
        let mut pos = 0;
        let mut last: Option<Op> = None;

        loop {
            let at_end = match items.get(pos) {
                None => true,
                Some(Item::Operand(..)) => {
                    pos += 1;
                    continue;
                },
                Some(Item::Operator(op, _)) => {
                    let op = *op;

                    // a sign at the start, or directly after another operator, is unary
                    let unary = matches!(op, Op::Add | Op::Sub)
                        && (pos == 0 || matches!(items[pos - 1], Item::Operator(..)));
                    let closes = !unary && last.map_or(false, |prev| {
                        op.precedence() < prev.precedence()
                            || (op.precedence() == prev.precedence()
                                && op.associativity() == Associativity::Left)
                    });

                    if !closes {
                        if !unary {
                            last = Some(op);
                        }
                        pos += 1;
                        continue;
                    }
                    false
                },
            };

            let section = items.drain(..pos).collect::<VecDeque<_>>();
            let tail_open = matches!(items.front(), Some(Item::Operator(Op::Mul | Op::Div | Op::Exp, _)));
            tracing::trace!(len = section.len(), at_end, tail_open, "reducing section");

            if let Some((value, span)) = self.reduce_section(section, tail_open, &mut terms)? {
                items.push_front(Item::Operand(value, span));
            }

            if at_end {
                break;
            }
            pos = 0;
            last = None;
        }

        Ok(terms)
    }

    /// Reduces a range of items from right to left.
    ///
    /// Terms at the additive level are unpacked into `terms`. If `tail_open` is set, the range
    /// is followed by a multiplicative operator, and its rightmost term is returned instead, so
    /// that it can be queued as that operator's left operand.
    fn reduce_section(
        &self,
        mut section: VecDeque<Item>,
        tail_open: bool,
        terms: &mut Terms,
    ) -> Result<Option<Spanned>, Error> {
        let mut rhs: Option<Spanned> = None;
        let mut requeue: Option<Spanned> = None;
        let mut rightmost = true;

        while let Some(item) = section.pop_back() {
            let (op, op_span) = match item {
                Item::Operand(symbol, span) => {
                    if let Some((_, rhs_span)) = rhs {
                        return Err(Error::new(vec![span, rhs_span], MissingOperator));
                    }
                    rhs = Some((symbol, span));
                    continue;
                },
                Item::Operator(op, span) => (op, span),
            };

            let Some((value, span)) = rhs.take() else {
                return Err(Error::new(vec![op_span], MissingOperand { op }));
            };

            match op {
                Op::Add | Op::Sub => {
                    let value = if op == Op::Sub { value.negate() } else { value };
                    let span = op_span.start..span.end;
                    if matches!(section.back(), None | Some(Item::Operator(..))) {
                        rhs = Some((value, span));
                        continue;
                    }

                    if rightmost && tail_open {
                        requeue = Some((value, span));
                    } else {
                        unpack(value, terms);
                    }
                    rightmost = false;
                },
                Op::Mul | Op::Div | Op::Exp => {
                    let Some(Item::Operand(lhs, lhs_span)) = section.pop_back() else {
                        return Err(Error::new(vec![op_span], MissingOperand { op }));
                    };

                    let value = match op {
                        Op::Mul => multiply(lhs, value),
                        Op::Div => divide(lhs, value)
                            .map_err(|kind| Error::new(vec![op_span.clone()], kind))?,
                        _ => pow(lhs, value, self.mode),
                    };
                    rhs = Some((value, lhs_span.start..span.end));
                },
                Op::Comma => return Err(Error::new(vec![op_span], UnsupportedOperator { op })),
            }
        }

        if let Some((value, span)) = rhs {
            if rightmost && tail_open {
                return Ok(Some((value, span)));
            }
            unpack(value, terms);
        }

        Ok(requeue)
    }
}
