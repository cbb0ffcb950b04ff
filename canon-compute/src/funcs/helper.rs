use crate::{eval_mode::EvalMode, symbol::Symbol};

/// Takes the only argument of a unary function.
///
/// The parser checks arities before applying a builtin, so an empty argument list only occurs
/// through misuse, and is treated as zero.
pub(crate) fn only_arg(args: Vec<Symbol>) -> Symbol {
    args.into_iter().next().unwrap_or_else(Symbol::zero)
}

/// Applies a unary function that has a numeric counterpart.
///
/// In numeric mode, a number is evaluated with `eval`; anything else becomes a call node.
pub(crate) fn unary(name: &str, arg: Symbol, mode: EvalMode, eval: fn(f64) -> f64) -> Symbol {
    if mode == EvalMode::Numeric && arg.is_number() {
        return Symbol::number(eval(arg.multiplier));
    }
    Symbol::function(name, vec![arg])
}
