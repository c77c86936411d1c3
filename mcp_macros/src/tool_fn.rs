//! ToolFn derive macro implementation

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Implementation of the ToolFn derive macro
pub fn derive_tool_fn_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => TokenStream::from(error.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ToolFn can only be derived for unit structs",
        ));
    };
    if !matches!(data_struct.fields, Fields::Unit) {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ToolFn can only be derived for unit structs",
        ));
    }

    let ToolFnArgs { params, preflight } = extract_args(input)?;
    let struct_name = &input.ident;

    let preflight = preflight.map(|preflight| {
        quote! {
            fn preflight(
                &self,
                ctx: &crate::tool::HandlerContext,
            ) -> Option<crate::error::Result<crate::tool::ToolResponse>> {
                #preflight(ctx)
            }
        }
    });

    Ok(quote! {
        impl crate::tool::ToolFn for #struct_name {
            type Params = #params;

            #preflight

            fn call(
                &self,
                ctx: crate::tool::HandlerContext,
                params: Self::Params,
            ) -> crate::tool::HandlerResponse {
                Box::pin(handle_impl(ctx, params))
            }
        }
    })
}

struct ToolFnArgs {
    params:    syn::Type,
    preflight: Option<syn::Path>,
}

/// Extract `#[tool_fn(params = "...", preflight = "...")]`; `params` is required
fn extract_args(input: &DeriveInput) -> syn::Result<ToolFnArgs> {
    let mut params = None;
    let mut preflight = None;
    for attr in &input.attrs {
        if attr.path().is_ident("tool_fn") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("params") {
                    let value = meta.value()?;
                    let s: syn::LitStr = value.parse()?;
                    params = Some(s.parse::<syn::Type>()?);
                    Ok(())
                } else if meta.path.is_ident("preflight") {
                    let value = meta.value()?;
                    let s: syn::LitStr = value.parse()?;
                    preflight = Some(s.parse::<syn::Path>()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported tool_fn attribute"))
                }
            })?;
        }
    }

    match params {
        Some(params) => Ok(ToolFnArgs { params, preflight }),
        None => Err(syn::Error::new_spanned(
            &input.ident,
            "tool_fn attribute with params is required",
        )),
    }
}
