//! A small library of example predicates.
//!
//! These are ordinary [`Predicate`] values; the enforcement engine treats
//! predicates as external collaborators, so any named callable of shape
//! `(values) -> bool` works just as well.

use std::any::{Any, TypeId};
use std::fmt::Debug;

use crate::spec::Predicate;
use crate::value::Value;

/// Checks that a single bound value equals `expected`.
pub fn is_equal<T>(expected: T) -> Predicate
where
    T: Any + Debug + PartialEq + Send + Sync,
{
    Predicate::new("is_equal", move |values| {
        values.len() == 1
            && values[0]
                .downcast_ref::<T>()
                .is_some_and(|value| *value == expected)
    })
}

/// Checks that a single bound `Vec<T>` is sorted in non-decreasing order.
pub fn is_sorted<T>() -> Predicate
where
    T: Any + Ord,
{
    Predicate::new("is_sorted", |values| {
        values.len() == 1
            && values[0]
                .downcast_ref::<Vec<T>>()
                .is_some_and(|items| items.windows(2).all(|pair| pair[0] <= pair[1]))
    })
}

/// Checks that a single bound `Vec<Value>` holds only values of type `T`.
pub fn sequence_of<T: Any>() -> Predicate {
    Predicate::new("sequence_of", |values| {
        values.len() == 1
            && values[0]
                .downcast_ref::<Vec<Value>>()
                .is_some_and(|items| items.iter().all(Value::is::<T>))
    })
}

/// Checks that a single bound `Vec<Value>` holds values of one concrete
/// type. Empty and single-element sequences are homogeneous.
pub fn homogeneous() -> Predicate {
    Predicate::new("homogeneous", |values| {
        values.len() == 1
            && values[0]
                .downcast_ref::<Vec<Value>>()
                .is_some_and(|items| match items.split_first() {
                    Some((first, rest)) => rest
                        .iter()
                        .all(|item| item.concrete_type() == first.concrete_type()),
                    None => true,
                })
    })
}

/// Checks that the bound values are sequences (`Vec<Value>` or `String`)
/// of one common length. Fewer than two values pass vacuously.
pub fn equal_length() -> Predicate {
    Predicate::new("equal_length", |values| {
        let [first, rest @ ..] = values else {
            return true;
        };
        if rest.is_empty() {
            return true;
        }
        match length_of(first) {
            Some(first_len) => rest.iter().all(|value| length_of(value) == Some(first_len)),
            None => false,
        }
    })
}

/// Checks that a single bound `Vec<Value>` is grouped by concrete type in
/// the order given: every value of `types[0]` first, then `types[1]`, and
/// so on.
pub fn ordered_by_type(types: Vec<TypeId>) -> Predicate {
    Predicate::new("ordered_by_type", move |values| {
        values.len() == 1
            && values[0]
                .downcast_ref::<Vec<Value>>()
                .is_some_and(|items| {
                    let mut index = 0;
                    for type_id in &types {
                        while index < items.len() && items[index].concrete_type() == *type_id {
                            index += 1;
                        }
                    }
                    index == items.len()
                })
    })
}

fn length_of(value: &Value) -> Option<usize> {
    if let Some(items) = value.downcast_ref::<Vec<Value>>() {
        return Some(items.len());
    }
    if let Some(text) = value.downcast_ref::<String>() {
        return Some(text.len());
    }
    None
}
