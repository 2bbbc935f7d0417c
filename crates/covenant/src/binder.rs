use std::sync::Arc;

use crate::error::{ContractViolation, EnforcementViolation, SignatureViolation};
use crate::signature::{CallArgs, CallBinding, Signature};
use crate::spec::{Predicate, SpecItem, partition};
use crate::value::Value;

/// The sentinel argument name that refers to a function's return value.
pub const RETURN: &str = "return";

/// The body of a registered function: it receives the resolved call binding
/// and produces the return value.
pub type Body = dyn Fn(&CallBinding) -> Value + Send + Sync;

/// One applied specification: the argument names it inspects and the
/// predicates it evaluates against them.
#[derive(Clone)]
struct Layer {
    names: Vec<String>,
    /// Position of the `"return"` sentinel within `names`, if present.
    return_index: Option<usize>,
    predicates: Vec<Predicate>,
}

impl Layer {
    fn evaluate(
        &self,
        binding: &CallBinding,
        result: Option<&Value>,
    ) -> Result<(), EnforcementViolation> {
        let mut values: Vec<Value> = self
            .names
            .iter()
            .filter(|name| name.as_str() != RETURN)
            .map(|name| {
                binding
                    .value(name)
                    .cloned()
                    .expect("argument names are resolved against the signature at decoration time")
            })
            .collect();
        if let (Some(index), Some(output)) = (self.return_index, result) {
            values.insert(index, output.clone());
        }

        for predicate in &self.predicates {
            if !predicate.eval(&values) {
                return Err(EnforcementViolation {
                    predicate: predicate.name().to_owned(),
                    arguments: self.names.iter().cloned().zip(values).collect(),
                });
            }
        }
        Ok(())
    }
}

/// A function registered for contract enforcement: a name, the declared
/// parameter table, a body, and the enforcement layers applied so far.
///
/// Cloning is cheap; the signature and body are shared. The signature is
/// always the original function's, no matter how many layers wrap it, so
/// stacked applications keep full binding fidelity.
#[derive(Clone)]
pub struct Function {
    name: String,
    signature: Arc<Signature>,
    body: Arc<Body>,
    /// Innermost (first applied) layer first.
    layers: Vec<Layer>,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("layers", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        signature: Signature,
        body: impl Fn(&CallBinding) -> Value + Send + Sync + 'static,
    ) -> Self {
        Function {
            name: name.into(),
            signature: Arc::new(signature),
            body: Arc::new(body),
            layers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter table of the original function, unchanged by
    /// any number of `enforce` layers.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invokes the function, enforcing every applied layer.
    ///
    /// Layers form a single evaluation pipeline over one call binding with
    /// a single body invocation point. Outer layers run their argument
    /// checks first; layers that inspect the return value are deferred
    /// until the body has produced it. A violation at any layer propagates
    /// immediately, before deeper layers or the body run.
    pub fn call(&self, args: CallArgs) -> Result<Value, ContractViolation> {
        let binding = self.signature.bind(&self.name, args)?;

        let mut deferred: Vec<&Layer> = Vec::new();
        for layer in self.layers.iter().rev() {
            if layer.return_index.is_some() {
                deferred.push(layer);
            } else {
                layer.evaluate(&binding, None)?;
            }
        }

        // The body runs exactly once per call, no matter how many layers
        // inspect the return value.
        let output = (self.body)(&binding);

        for layer in deferred.into_iter().rev() {
            layer.evaluate(&binding, Some(&output))?;
        }
        Ok(output)
    }
}

/// A parsed specification, ready to be applied to a [`Function`].
#[derive(Clone, Debug)]
pub struct Enforcer {
    names: Vec<String>,
    predicates: Vec<Predicate>,
}

/// Parses a specification into an [`Enforcer`].
///
/// The names-before-predicates ordering is validated here, at definition
/// time; a malformed specification never wraps anything.
pub fn enforce<I>(items: I) -> Result<Enforcer, SignatureViolation>
where
    I: IntoIterator<Item = SpecItem>,
{
    let (names, predicates) = partition(items.into_iter().collect())?;
    Ok(Enforcer { names, predicates })
}

impl Enforcer {
    /// Wraps `function` with this specification's predicates as a new
    /// enforcement layer.
    ///
    /// Every name other than [`RETURN`] must refer to a declared parameter
    /// of the target. With no explicit names, the specification defaults to
    /// the target's positional parameter names in order. On failure the
    /// original function is untouched.
    pub fn apply(&self, function: &Function) -> Result<Function, SignatureViolation> {
        let names = if self.names.is_empty() {
            function.signature.positional_names()
        } else {
            self.names.clone()
        };

        for name in &names {
            if name != RETURN && !function.signature.declares(name) {
                return Err(SignatureViolation::UnknownArgument {
                    function: function.name.clone(),
                    argument: name.clone(),
                });
            }
        }

        let return_index = names.iter().position(|name| name == RETURN);
        let mut wrapped = function.clone();
        wrapped.layers.push(Layer {
            names,
            return_index,
            predicates: self.predicates.clone(),
        });
        Ok(wrapped)
    }
}
