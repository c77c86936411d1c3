//! ToolDescription derive macro implementation

use heck::ToKebabCase;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Implementation of the ToolDescription derive macro
pub fn derive_tool_description_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => TokenStream::from(error.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let path = extract_path(input)?;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ToolDescription can only be derived for enums",
        ));
    };

    let mut match_arms = Vec::with_capacity(data_enum.variants.len());
    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "ToolDescription can only be derived for enums with unit variants",
            ));
        }

        let variant_name = &variant.ident;
        // help text files are named after the wire name of the tool
        let kebab_case_name = variant_name.to_string().to_kebab_case();
        let file_path = format!("{path}/{kebab_case_name}.txt");

        match_arms.push(quote! {
            Self::#variant_name => include_str!(#file_path).trim_ascii()
        });
    }

    let enum_name = &input.ident;

    Ok(quote! {
        impl #enum_name {
            /// Returns the description text for this tool.
            pub const fn description(&self) -> &'static str {
                match self {
                    #(#match_arms,)*
                }
            }
        }
    })
}

/// Extract the path from tool_description attributes
fn extract_path(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if attr.path().is_ident("tool_description") {
            let mut path = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("path") {
                    let value = meta.value()?;
                    let s: syn::LitStr = value.parse()?;
                    path = Some(s.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported tool_description attribute"))
                }
            })?;

            if let Some(path) = path {
                return Ok(path);
            }
        }
    }

    Err(syn::Error::new_spanned(
        &input.ident,
        "tool_description attribute with path is required",
    ))
}
