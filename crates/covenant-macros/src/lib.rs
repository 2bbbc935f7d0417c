//! The `#[enforce]` attribute macro for covenant contract enforcement.

use proc_macro::TokenStream;
use quote::ToTokens;
use syn::{ItemFn, ReturnType, Type, parse_macro_input, parse_quote};

use covenant_core::{Spec, instrument_fn_body, resolve_names};

/// Attaches named predicates to a function's arguments (or `"return"`) and
/// checks them on every call.
///
/// The attribute takes string-literal argument names followed by predicate
/// expressions; every name must come before every predicate, and every name
/// must refer to a declared parameter of the function (or be `"return"`).
/// Each predicate receives one reference per name, in order, and returns
/// `bool`; a `false` result panics with the predicate and the observed
/// name→value mapping. The named argument types must implement `Debug`.
///
/// ```
/// use covenant_macros::enforce;
///
/// fn is_positive(x: &i32) -> bool {
///     *x > 0
/// }
///
/// #[enforce("a", is_positive)]
/// fn increment(a: i32) -> i32 {
///     a + 1
/// }
///
/// assert_eq!(increment(41), 42);
/// ```
#[proc_macro_attribute]
pub fn enforce(args: TokenStream, input: TokenStream) -> TokenStream {
    // Parse the specification from the attribute, e.g. `"a", is_positive`.
    let spec = parse_macro_input!(args as Spec);
    // Parse the function to which the attribute is attached.
    let mut func = parse_macro_input!(input as ItemFn);
    let is_async = func.sig.asyncness.is_some();

    // Check every name against the function's declared parameters.
    let resolved = match resolve_names(&spec, &func.sig) {
        Ok(resolved) => resolved,
        Err(e) => return e.to_compile_error().into(),
    };

    let return_type: Type = match &func.sig.output {
        ReturnType::Default => parse_quote! { () },
        ReturnType::Type(_, ty) => (**ty).clone(),
    };

    // Generate the new, instrumented function body.
    let new_body = match instrument_fn_body(&resolved, &func.block, is_async, &return_type) {
        Ok(body) => body,
        Err(e) => return e.to_compile_error().into(),
    };

    // Replace the old function body with the new one.
    *func.block = new_body;

    // Return the modified function.
    func.into_token_stream().into()
}
