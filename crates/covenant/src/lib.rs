//! Design-by-contract enforcement of named argument predicates.
//!
#![doc = include_str!("../README.md")]

mod binder;
mod error;
mod signature;
mod spec;
mod value;

pub mod predicates;

pub use binder::{Body, Enforcer, Function, RETURN, enforce};
pub use error::{CallMismatch, ContractViolation, EnforcementViolation, SignatureViolation};
pub use signature::{CallArgs, CallBinding, Signature, SignatureBuilder};
pub use spec::{Predicate, SpecItem};
pub use value::{AnyValue, Value};

/// Attaches named predicates to the arguments (or `"return"`) of an
/// ordinary Rust function, checked on every call.
pub use covenant_macros::enforce;

#[cfg(test)]
mod test_bind;
