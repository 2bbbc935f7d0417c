use std::collections::BTreeMap;

use crate::error::{CallMismatch, SignatureViolation};
use crate::signature::{CallArgs, Signature};
use crate::value::Value;

fn full_signature() -> Signature {
    Signature::builder()
        .positional("a")
        .positional_with_default("b", "b")
        .varargs("c")
        .keyword_only("d")
        .keyword_only_with_default("e", "e")
        .varkw("f")
        .build()
        .unwrap()
}

fn string_at<'b>(binding: &'b crate::signature::CallBinding, name: &str) -> &'b str {
    binding
        .value(name)
        .and_then(|value| value.downcast_ref::<String>())
        .unwrap()
}

#[test]
fn binds_positionals_keywords_and_defaults() {
    let signature = full_signature();
    let args = CallArgs::new()
        .positional("a")
        .positional("b")
        .keyword("d", "d");

    let binding = signature.bind("f", args).unwrap();

    assert_eq!(string_at(&binding, "a"), "a");
    assert_eq!(string_at(&binding, "b"), "b");
    assert_eq!(string_at(&binding, "d"), "d");
    // omitted keyword-only parameter falls back to its default
    assert_eq!(string_at(&binding, "e"), "e");
}

#[test]
fn collects_excess_positionals_under_the_varargs_name() {
    let signature = full_signature();
    let args = CallArgs::new()
        .positional("a")
        .positional("b")
        .positional("c1")
        .positional("c2")
        .keyword("d", "d");

    let binding = signature.bind("f", args).unwrap();

    let collected = binding
        .value("c")
        .and_then(|value| value.downcast_ref::<Vec<Value>>())
        .unwrap();
    assert_eq!(collected.len(), 2);
    assert_eq!(collected[0].downcast_ref::<String>().unwrap(), "c1");
    assert_eq!(collected[1].downcast_ref::<String>().unwrap(), "c2");
}

#[test]
fn varargs_binds_empty_when_no_excess_positionals() {
    let signature = full_signature();
    let args = CallArgs::new().positional("a").keyword("d", "d");

    let binding = signature.bind("f", args).unwrap();

    let collected = binding
        .value("c")
        .and_then(|value| value.downcast_ref::<Vec<Value>>())
        .unwrap();
    assert!(collected.is_empty());
}

#[test]
fn collects_unmatched_keywords_under_the_varkw_name() {
    let signature = full_signature();
    let args = CallArgs::new()
        .positional("a")
        .keyword("d", "d")
        .keyword("x", "x")
        .keyword("y", "y");

    let binding = signature.bind("f", args).unwrap();

    let collected = binding
        .value("f")
        .and_then(|value| value.downcast_ref::<BTreeMap<String, Value>>())
        .unwrap();
    assert_eq!(collected.len(), 2);
    assert_eq!(
        collected.get("x").and_then(|v| v.downcast_ref::<String>()),
        Some(&String::from("x"))
    );
}

#[test]
fn keyword_can_fill_an_unsupplied_positional_parameter() {
    let signature = Signature::builder()
        .positional("a")
        .positional("b")
        .build()
        .unwrap();
    let args = CallArgs::new().positional(1i64).keyword("b", 2i64);

    let binding = signature.bind("f", args).unwrap();

    assert_eq!(binding.value("b").and_then(Value::downcast_ref::<i64>), Some(&2));
}

#[test]
fn too_many_positionals_without_varargs() {
    let signature = Signature::builder().positional("a").build().unwrap();
    let args = CallArgs::new().positional(1i64).positional(2i64);

    assert_eq!(
        signature.bind("f", args).unwrap_err(),
        CallMismatch::TooManyPositional {
            function: "f".into(),
            declared: 1,
            supplied: 2,
        }
    );
}

#[test]
fn unexpected_keyword_without_varkw() {
    let signature = Signature::builder().positional("a").build().unwrap();
    let args = CallArgs::new().positional(1i64).keyword("z", 2i64);

    assert_eq!(
        signature.bind("f", args).unwrap_err(),
        CallMismatch::UnexpectedKeyword {
            function: "f".into(),
            keyword: "z".into(),
        }
    );
}

#[test]
fn positional_and_keyword_for_the_same_parameter() {
    let signature = Signature::builder().positional("a").build().unwrap();
    let args = CallArgs::new().positional(1i64).keyword("a", 2i64);

    assert_eq!(
        signature.bind("f", args).unwrap_err(),
        CallMismatch::MultipleValues {
            function: "f".into(),
            argument: "a".into(),
        }
    );
}

#[test]
fn duplicate_keyword_for_a_declared_parameter() {
    let signature = Signature::builder().positional("a").build().unwrap();
    let args = CallArgs::new().keyword("a", 1i64).keyword("a", 2i64);

    assert_eq!(
        signature.bind("f", args).unwrap_err(),
        CallMismatch::MultipleValues {
            function: "f".into(),
            argument: "a".into(),
        }
    );
}

#[test]
fn duplicate_keyword_is_rejected_even_with_varkw() {
    let signature = full_signature();
    let args = CallArgs::new()
        .positional("a")
        .keyword("d", "d")
        .keyword("x", "x1")
        .keyword("x", "x2");

    assert_eq!(
        signature.bind("f", args).unwrap_err(),
        CallMismatch::MultipleValues {
            function: "f".into(),
            argument: "x".into(),
        }
    );
}

#[test]
fn missing_required_argument() {
    let signature = Signature::builder()
        .positional("a")
        .keyword_only("d")
        .build()
        .unwrap();
    let args = CallArgs::new().positional(1i64);

    assert_eq!(
        signature.bind("f", args).unwrap_err(),
        CallMismatch::MissingArgument {
            function: "f".into(),
            argument: "d".into(),
        }
    );
}

#[test]
fn duplicate_parameter_names_are_rejected_at_build_time() {
    let result = Signature::builder()
        .positional("a")
        .keyword_only("a")
        .build();

    assert_eq!(
        result.unwrap_err(),
        SignatureViolation::DuplicateParameter {
            parameter: "a".into(),
        }
    );
}
