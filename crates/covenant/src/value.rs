use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Object-safe bound for the values carried through a call binding.
///
/// Blanket-implemented for every `'static` type that is `Debug + Send + Sync`,
/// so arbitrary argument types can be boxed into a [`Value`].
pub trait AnyValue: fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> AnyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A dynamically typed argument or return value.
///
/// Predicates receive `Value`s and are responsible for downcasting them to
/// the concrete types they expect. Cloning is cheap; the boxed value is
/// shared.
#[derive(Clone)]
pub struct Value(Arc<dyn AnyValue>);

impl Value {
    pub fn new<T: Any + fmt::Debug + Send + Sync>(value: T) -> Self {
        Value(Arc::new(value))
    }

    /// Borrows the boxed value as `T`, if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().as_any().downcast_ref::<T>()
    }

    /// Whether the boxed value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_ref().as_any().is::<T>()
    }

    /// The `TypeId` of the boxed value.
    pub fn concrete_type(&self) -> TypeId {
        self.0.as_ref().as_any().type_id()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::new(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::new(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::new(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::new(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::new(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::new(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::new(value)
    }
}
