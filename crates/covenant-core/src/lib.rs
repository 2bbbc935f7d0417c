//! Parsing and code generation for the covenant `#[enforce]` attribute.
//!
//! The attribute takes an ordered sequence of items: string-literal
//! argument names (or the `"return"` sentinel) followed by predicate
//! expressions. Parsing, name resolution against the annotated function's
//! signature, and body instrumentation all live here as plain functions
//! over syntax trees so they can be tested without macro expansion.

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{
    Block, Expr, ExprLit, FnArg, Ident, Lit, LitStr, Pat, Token, Type,
    parse::{Parse, ParseStream, Result},
    parse_quote,
    punctuated::Punctuated,
};

/// The sentinel argument name that refers to the function's return value.
pub const RETURN: &str = "return";

/// The raw items of an `#[enforce(...)]` attribute: argument names followed
/// by predicate expressions.
#[derive(Debug)]
pub struct Spec {
    /// Argument names, as written. May be empty, in which case the spec
    /// applies to every declared parameter of the annotated function.
    pub names: Vec<LitStr>,
    /// Predicate expressions; each must evaluate to a callable taking one
    /// reference per name and returning `bool`.
    pub predicates: Vec<Expr>,
}

impl Parse for Spec {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = Punctuated::<Expr, Token![,]>::parse_terminated(input)?;

        let mut names: Vec<LitStr> = vec![];
        let mut predicates: Vec<Expr> = vec![];
        for item in items {
            match item {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => {
                    if !predicates.is_empty() {
                        return Err(syn::Error::new(
                            lit.span(),
                            "all argument names must come before all predicates",
                        ));
                    }
                    names.push(lit);
                }
                expr => predicates.push(expr),
            }
        }

        Ok(Spec { names, predicates })
    }
}

/// A spec whose names have been checked against the annotated function's
/// declared parameters.
#[derive(Debug)]
pub struct ResolvedSpec {
    pub names: Vec<String>,
    /// Position of the `"return"` sentinel within `names`, if present.
    pub return_index: Option<usize>,
    pub predicates: Vec<Expr>,
}

/// Validates every name in `spec` against the parameters declared by `sig`.
///
/// With no explicit names, the spec defaults to all declared parameter
/// names in order; the receiver, if any, is excluded. A name that is
/// neither `"return"` nor a declared parameter is rejected with an error
/// naming the function and the argument.
pub fn resolve_names(spec: &Spec, sig: &syn::Signature) -> Result<ResolvedSpec> {
    let parameters: Vec<String> = sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => match pat_type.pat.as_ref() {
                Pat::Ident(pat_ident) => Some(pat_ident.ident.to_string()),
                _ => None,
            },
            FnArg::Receiver(_) => None,
        })
        .collect();

    let names: Vec<String> = if spec.names.is_empty() {
        parameters
    } else {
        for lit in &spec.names {
            let name = lit.value();
            if name != RETURN && !parameters.iter().any(|parameter| *parameter == name) {
                return Err(syn::Error::new(
                    lit.span(),
                    format!("`{}` does not have argument: {}", sig.ident, name),
                ));
            }
        }
        spec.names.iter().map(LitStr::value).collect()
    };

    let return_index = names.iter().position(|name| name == RETURN);

    Ok(ResolvedSpec {
        names,
        return_index,
        predicates: spec.predicates.clone(),
    })
}

/// Takes the resolved spec and the original body and returns a new
/// instrumented function body.
///
/// A spec that does not name `"return"` checks its predicates before the
/// body runs; a spec naming `"return"` captures the output in a hygienic
/// binding and checks afterwards. Either way the original body executes
/// exactly once, so stacked attributes never re-invoke it.
pub fn instrument_fn_body(
    spec: &ResolvedSpec,
    original_body: &Block,
    is_async: bool,
    return_type: &Type,
) -> Result<Block> {
    // The identifier for the return value binding. It's hygienic to prevent collisions.
    let binding_ident = Ident::new("__covenant_output", Span::mixed_site());

    // Arguments handed to each predicate, in spec order; `"return"` becomes
    // the captured output binding.
    let predicate_args: Vec<TokenStream> = spec
        .names
        .iter()
        .map(|name| {
            if name == RETURN {
                quote! { &#binding_ident }
            } else {
                let ident = Ident::new(name, Span::call_site());
                quote! { &#ident }
            }
        })
        .collect();

    // Panic template: `contract violation: <pred>({a: <a>, ...}) failed`.
    // The predicate's stringified form is passed as a runtime argument so
    // braces inside it never reach the format parser.
    let described: Vec<String> = spec
        .names
        .iter()
        .map(|name| format!("{name}: {{:?}}"))
        .collect();
    let template = format!(
        "contract violation: {{}}({{{{{}}}}}) failed",
        described.join(", ")
    );

    let checks: Vec<TokenStream> = spec
        .predicates
        .iter()
        .map(|predicate| {
            let predicate_str = predicate.to_token_stream().to_string();
            quote! {
                if !(#predicate)(#(#predicate_args),*) {
                    panic!(#template, #predicate_str, #(#predicate_args),*);
                }
            }
        })
        .collect();

    let (pre_checks, post_checks) = if spec.return_index.is_some() {
        (Vec::new(), checks)
    } else {
        (checks, Vec::new())
    };

    let body_expr = if is_async {
        quote! { async #original_body.await }
    } else {
        quote! { #original_body }
    };

    Ok(parse_quote! {
        {
            #(#pre_checks)*
            let #binding_ident: #return_type = #body_expr;
            #(#post_checks)*
            #binding_ident
        }
    })
}


#[cfg(test)]
mod test_resolve_names;
