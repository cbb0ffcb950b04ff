use canon_error::Error;
use canon_parser::{tokenize, validate_identifier, TokenTree};
use crate::{consts::CONSTS, error::ReservedNameViolation, funcs::Builtin};
use levenshtein::levenshtein;
use std::{collections::HashMap, ops::Range, sync::Arc};

/// A function available for use in a context.
#[derive(Debug, Clone)]
pub enum Func {
    /// A builtin function.
    Native(Arc<dyn Builtin>),

    /// A user-defined function, expanded by substituting its arguments into its body.
    Composite {
        /// The names of the parameters, in order.
        params: Vec<String>,

        /// The tokenized body of the function.
        body: Vec<TokenTree>,
    },
}

impl Func {
    /// Returns the number of arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Func::Native(builtin) => builtin.arity(),
            Func::Composite { params, .. } => params.len(),
        }
    }
}

impl From<Arc<dyn Builtin>> for Func {
    fn from(builtin: Arc<dyn Builtin>) -> Self {
        Func::Native(builtin)
    }
}

/// The constants and functions that expressions are parsed against.
#[derive(Debug, Clone)]
pub struct Ctxt {
    /// The constants in the context, substituted in numeric mode.
    consts: HashMap<String, f64>,

    /// The functions in the context.
    funcs: HashMap<String, Func>,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            consts: CONSTS.iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            funcs: crate::funcs::all()
                .into_iter()
                .map(|(name, func)| (name.to_string(), func.into()))
                .collect(),
        }
    }
}

/// Checks that `name` is a valid identifier that is not reserved.
fn validate_name(ctxt: &Ctxt, name: &str, span: Range<usize>) -> Result<(), Error> {
    validate_identifier(name).map_err(|kind| Error::new(vec![span.clone()], kind))?;
    if ctxt.is_reserved(name) {
        return Err(Error::new(vec![span], ReservedNameViolation { name: name.to_string() }));
    }
    Ok(())
}

impl Ctxt {
    /// Creates a new context with the default constants and builtin functions.
    pub fn new() -> Ctxt {
        Ctxt::default()
    }

    /// Returns true if the name belongs to a builtin function or a default constant.
    pub fn is_reserved(&self, name: &str) -> bool {
        CONSTS.contains_key(name) || matches!(self.funcs.get(name), Some(Func::Native(_)))
    }

    /// Adds or replaces a constant.
    ///
    /// Fails if the name is not a valid identifier, or is reserved.
    pub fn set_constant(&mut self, name: &str, value: f64) -> Result<(), Error> {
        validate_name(self, name, 0..name.len())?;
        tracing::debug!(name, value, "setting constant");
        self.consts.insert(name.to_string(), value);
        Ok(())
    }

    /// Removes a user-defined constant, returning its value.
    ///
    /// Fails if the name belongs to a default constant.
    pub fn remove_constant(&mut self, name: &str) -> Result<Option<f64>, Error> {
        if CONSTS.contains_key(name) {
            return Err(Error::new(vec![0..name.len()], ReservedNameViolation { name: name.to_string() }));
        }
        Ok(self.consts.remove(name))
    }

    /// Returns the value of a constant.
    pub fn get_constant(&self, name: &str) -> Option<f64> {
        self.consts.get(name).copied()
    }

    /// Returns the constants in the context.
    pub fn get_consts(&self) -> &HashMap<String, f64> {
        &self.consts
    }

    /// Adds or replaces a user-defined function with the given parameters and body.
    ///
    /// The name and every parameter must be valid identifiers that are not reserved. The body
    /// is tokenized immediately, so malformed bodies are rejected here rather than when the
    /// function is called.
    pub fn set_function(&mut self, name: &str, params: &[&str], body: &str) -> Result<(), Error> {
        validate_name(self, name, 0..name.len())?;
        for param in params {
            validate_name(self, param, 0..param.len())?;
        }

        let body = tokenize(body)?;
        tracing::debug!(name, ?params, "setting function");
        self.funcs.insert(name.to_string(), Func::Composite {
            params: params.iter().map(|p| p.to_string()).collect(),
            body,
        });
        Ok(())
    }

    /// Removes a user-defined function. Builtin functions cannot be removed.
    pub fn remove_function(&mut self, name: &str) -> Option<Func> {
        match self.funcs.get(name) {
            Some(Func::Composite { .. }) => self.funcs.remove(name),
            _ => None,
        }
    }

    /// Returns the function with the given name.
    pub fn get_func(&self, name: &str) -> Option<&Func> {
        self.funcs.get(name)
    }

    /// Returns the functions in the context.
    pub fn get_funcs(&self) -> &HashMap<String, Func> {
        &self.funcs
    }

    /// Returns all functions in the context with a name similar to the given name, sorted by
    /// name.
    pub fn get_similar_funcs(&self, name: &str) -> Vec<&str> {
        let mut similar = self.funcs
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(|n| n.as_str())
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar
    }
}
