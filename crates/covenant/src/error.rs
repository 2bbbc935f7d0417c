use std::fmt::Write as _;

use thiserror::Error;

use crate::value::Value;

/// Umbrella error for every way a contract can be violated, so callers can
/// match broadly or on a specific kind.
#[derive(Debug, Clone, Error)]
pub enum ContractViolation {
    /// Structural misuse detected at decoration time.
    #[error(transparent)]
    Signature(#[from] SignatureViolation),

    /// A predicate returned `false` for an observed call.
    #[error(transparent)]
    Enforcement(#[from] EnforcementViolation),

    /// The call's arguments do not fit the declared signature.
    #[error(transparent)]
    Call(#[from] CallMismatch),
}

/// A structural misuse of the mechanism, detected before the wrapped
/// function is ever called. Decoration fails and the target function is
/// left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureViolation {
    #[error("all argument names passed to `enforce` must come before all predicates")]
    NamesAfterPredicates,

    #[error("`{function}` does not have argument: {argument}")]
    UnknownArgument { function: String, argument: String },

    #[error("parameter `{parameter}` is declared more than once")]
    DuplicateParameter { parameter: String },
}

/// A runtime contract failure: some predicate returned `false`.
#[derive(Debug, Clone, Error)]
#[error("contract violation: {predicate}({}) failed", fmt_binding(.arguments))]
pub struct EnforcementViolation {
    /// Name of the predicate that returned `false`.
    pub predicate: String,
    /// The name→value mapping the predicate was evaluated against, in
    /// declared order.
    pub arguments: Vec<(String, Value)>,
}

/// A call whose positional/keyword arguments cannot be bound to the
/// declared parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallMismatch {
    #[error("`{function}` takes {declared} positional argument(s) but {supplied} were given")]
    TooManyPositional {
        function: String,
        declared: usize,
        supplied: usize,
    },

    #[error("`{function}` got an unexpected keyword argument: {keyword}")]
    UnexpectedKeyword { function: String, keyword: String },

    #[error("`{function}` got multiple values for argument: {argument}")]
    MultipleValues { function: String, argument: String },

    #[error("`{function}` is missing a required argument: {argument}")]
    MissingArgument { function: String, argument: String },
}

fn fmt_binding(arguments: &[(String, Value)]) -> String {
    let mut out = String::from("{");
    for (i, (name, value)) in arguments.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{name}: {value:?}");
    }
    out.push('}');
    out
}
