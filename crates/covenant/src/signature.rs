use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CallMismatch, SignatureViolation};
use crate::value::Value;

/// A declared parameter: a name plus an optional default value.
#[derive(Clone, Debug)]
struct Param {
    name: String,
    default: Option<Value>,
}

/// The declared parameter table of a function: ordered positional
/// parameters, an optional variadic-positional collector, ordered
/// keyword-only parameters, and an optional variadic-keyword collector.
///
/// Built once at registration via [`Signature::builder`] and read-only
/// thereafter.
#[derive(Clone, Debug, Default)]
pub struct Signature {
    positional: Vec<Param>,
    varargs: Option<String>,
    keyword_only: Vec<Param>,
    varkw: Option<String>,
}

impl Signature {
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// Whether `name` refers to any declared parameter, including the
    /// variadic collectors.
    pub(crate) fn declares(&self, name: &str) -> bool {
        self.positional.iter().any(|p| p.name == name)
            || self.keyword_only.iter().any(|p| p.name == name)
            || self.varargs.as_deref() == Some(name)
            || self.varkw.as_deref() == Some(name)
    }

    /// Names of the positional parameters, in declaration order.
    pub(crate) fn positional_names(&self) -> Vec<String> {
        self.positional.iter().map(|p| p.name.clone()).collect()
    }

    /// Resolves one call's arguments into the per-call binding: every
    /// declared parameter name mapped to its effective value, with defaults
    /// applied and excess positional/keyword arguments collected under the
    /// variadic names.
    pub(crate) fn bind(&self, function: &str, args: CallArgs) -> Result<CallBinding, CallMismatch> {
        let CallArgs {
            positional,
            keyword,
        } = args;
        let mut values: BTreeMap<String, Value> = BTreeMap::new();

        let supplied = positional.len();
        let declared = self.positional.len();
        for (param, value) in self.positional.iter().zip(&positional) {
            values.insert(param.name.clone(), value.clone());
        }
        let extra: Vec<Value> = positional.iter().skip(declared).cloned().collect();
        if let Some(collector) = &self.varargs {
            values.insert(collector.clone(), Value::new(extra));
        } else if !extra.is_empty() {
            return Err(CallMismatch::TooManyPositional {
                function: function.to_owned(),
                declared,
                supplied,
            });
        }

        let mut extra_keywords: BTreeMap<String, Value> = BTreeMap::new();
        for (name, value) in keyword {
            let is_declared = self
                .positional
                .iter()
                .chain(&self.keyword_only)
                .any(|p| p.name == name);
            if is_declared {
                if values.contains_key(&name) {
                    return Err(CallMismatch::MultipleValues {
                        function: function.to_owned(),
                        argument: name,
                    });
                }
                values.insert(name, value);
            } else {
                if extra_keywords.contains_key(&name) {
                    return Err(CallMismatch::MultipleValues {
                        function: function.to_owned(),
                        argument: name,
                    });
                }
                extra_keywords.insert(name, value);
            }
        }
        if let Some(collector) = &self.varkw {
            values.insert(collector.clone(), Value::new(extra_keywords));
        } else if let Some(keyword) = extra_keywords.into_keys().next() {
            return Err(CallMismatch::UnexpectedKeyword {
                function: function.to_owned(),
                keyword,
            });
        }

        for param in self.positional.iter().chain(&self.keyword_only) {
            if !values.contains_key(&param.name) {
                match &param.default {
                    Some(default) => {
                        values.insert(param.name.clone(), default.clone());
                    }
                    None => {
                        return Err(CallMismatch::MissingArgument {
                            function: function.to_owned(),
                            argument: param.name.clone(),
                        });
                    }
                }
            }
        }

        Ok(CallBinding { values })
    }
}

/// Builder for a [`Signature`]. Declaration order is preserved.
#[derive(Debug, Default)]
pub struct SignatureBuilder {
    positional: Vec<Param>,
    varargs: Option<String>,
    keyword_only: Vec<Param>,
    varkw: Option<String>,
}

impl SignatureBuilder {
    pub fn positional(mut self, name: impl Into<String>) -> Self {
        self.positional.push(Param {
            name: name.into(),
            default: None,
        });
        self
    }

    pub fn positional_with_default(
        mut self,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.positional.push(Param {
            name: name.into(),
            default: Some(default.into()),
        });
        self
    }

    /// Declares the variadic-positional collector; excess positional
    /// arguments are bound to it as a `Vec<Value>`.
    pub fn varargs(mut self, name: impl Into<String>) -> Self {
        self.varargs = Some(name.into());
        self
    }

    pub fn keyword_only(mut self, name: impl Into<String>) -> Self {
        self.keyword_only.push(Param {
            name: name.into(),
            default: None,
        });
        self
    }

    pub fn keyword_only_with_default(
        mut self,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.keyword_only.push(Param {
            name: name.into(),
            default: Some(default.into()),
        });
        self
    }

    /// Declares the variadic-keyword collector; unmatched keyword arguments
    /// are bound to it as a `BTreeMap<String, Value>`.
    pub fn varkw(mut self, name: impl Into<String>) -> Self {
        self.varkw = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Signature, SignatureViolation> {
        let mut seen = BTreeSet::new();
        let names = self
            .positional
            .iter()
            .chain(&self.keyword_only)
            .map(|p| p.name.as_str())
            .chain(self.varargs.as_deref())
            .chain(self.varkw.as_deref());
        for name in names {
            if !seen.insert(name) {
                return Err(SignatureViolation::DuplicateParameter {
                    parameter: name.to_owned(),
                });
            }
        }
        Ok(Signature {
            positional: self.positional,
            varargs: self.varargs,
            keyword_only: self.keyword_only,
            varkw: self.varkw,
        })
    }
}

/// The positional and keyword arguments of one invocation.
///
/// Keyword arguments keep their supplied order; duplicates are preserved
/// here and rejected by [`Signature::bind`].
#[derive(Clone, Debug, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }
}

/// The per-call mapping from every declared parameter name to its effective
/// runtime value. Created and discarded within each invocation.
#[derive(Debug)]
pub struct CallBinding {
    values: BTreeMap<String, Value>,
}

impl CallBinding {
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}
