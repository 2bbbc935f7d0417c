use super::*;
use syn::ItemFn;

#[test]
fn test_resolve_declared_names() {
    let func: ItemFn = parse_quote! {
        fn some_method(a: i32, b: String) -> bool { true }
    };
    let spec: Spec = parse_quote! { "b", "a", is_ok };

    let resolved = resolve_names(&spec, &func.sig).unwrap();

    assert_eq!(resolved.names, ["b", "a"]);
    assert_eq!(resolved.return_index, None);
    assert_eq!(resolved.predicates.len(), 1);
}

#[test]
fn test_resolve_unknown_name() {
    let func: ItemFn = parse_quote! {
        fn some_method(a: i32, b: String) {}
    };
    let spec: Spec = parse_quote! { "c" };

    let err = resolve_names(&spec, &func.sig).unwrap_err();

    assert_eq!(err.to_string(), "`some_method` does not have argument: c");
}

#[test]
fn test_resolve_defaults_to_all_parameters() {
    let func: ItemFn = parse_quote! {
        fn some_method(a: i32, b: String) {}
    };
    let spec: Spec = parse_quote! { is_ok };

    let resolved = resolve_names(&spec, &func.sig).unwrap();

    assert_eq!(resolved.names, ["a", "b"]);
}

#[test]
fn test_resolve_excludes_the_receiver() {
    let func: ItemFn = parse_quote! {
        fn resize(&mut self, len: usize) {}
    };
    let spec: Spec = parse_quote! { is_small };

    let resolved = resolve_names(&spec, &func.sig).unwrap();

    assert_eq!(resolved.names, ["len"]);
}

#[test]
fn test_resolve_return_sentinel() {
    let func: ItemFn = parse_quote! {
        fn some_method(a: i32) -> i32 { a }
    };
    let spec: Spec = parse_quote! { "a", "return", rel };

    let resolved = resolve_names(&spec, &func.sig).unwrap();

    assert_eq!(resolved.names, ["a", "return"]);
    assert_eq!(resolved.return_index, Some(1));
}
