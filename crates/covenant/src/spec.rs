use std::fmt;
use std::sync::Arc;

use crate::error::SignatureViolation;
use crate::value::Value;

/// A named boolean check over one or more bound values.
///
/// The number of values a predicate receives equals the number of argument
/// names in the specification it belongs to, in declared order. The name is
/// used in violation messages.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    check: Arc<dyn Fn(&[Value]) -> bool + Send + Sync>,
}

impl Predicate {
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(&[Value]) -> bool + Send + Sync + 'static,
    ) -> Self {
        Predicate {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn eval(&self, values: &[Value]) -> bool {
        (self.check)(values)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.name)
    }
}

/// One item of a specification: an argument name or a predicate.
#[derive(Clone, Debug)]
pub enum SpecItem {
    Name(String),
    Predicate(Predicate),
}

impl From<&str> for SpecItem {
    fn from(name: &str) -> Self {
        SpecItem::Name(name.to_owned())
    }
}

impl From<String> for SpecItem {
    fn from(name: String) -> Self {
        SpecItem::Name(name)
    }
}

impl From<Predicate> for SpecItem {
    fn from(predicate: Predicate) -> Self {
        SpecItem::Predicate(predicate)
    }
}

/// Builds a specification item list, converting each element with
/// [`SpecItem::from`].
///
/// ```
/// use covenant::{spec, predicates::is_equal};
///
/// let items = spec!["a", "return", is_equal(1i64)];
/// assert_eq!(items.len(), 3);
/// ```
#[macro_export]
macro_rules! spec {
    ($($item:expr),* $(,)?) => {
        ::std::vec![$($crate::SpecItem::from($item)),*]
    };
}

/// Splits a specification into its argument names and predicates,
/// preserving relative order within each group. All names must come before
/// all predicates.
pub(crate) fn partition(
    items: Vec<SpecItem>,
) -> Result<(Vec<String>, Vec<Predicate>), SignatureViolation> {
    let mut names = Vec::new();
    let mut predicates = Vec::new();
    for item in items {
        match item {
            SpecItem::Name(name) => {
                if !predicates.is_empty() {
                    return Err(SignatureViolation::NamesAfterPredicates);
                }
                names.push(name);
            }
            SpecItem::Predicate(predicate) => predicates.push(predicate),
        }
    }
    Ok((names, predicates))
}
