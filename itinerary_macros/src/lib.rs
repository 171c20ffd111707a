mod schema_extraction;

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{ItemStruct, LitStr};

use crate::schema_extraction::{
    collect_doc_comments, collect_field_docs, ensure_supported_struct, infer_description,
    infer_schema_name, parse_reply_schema_args, ReplySchemaArgs,
};

/// Implements `itinerary_agent::schema::ReplySchema` for a struct with named
/// fields, caching the schemars-derived JSON Schema in a `OnceLock`.
///
/// Accepts optional `name = "..."` and `description = "..."` overrides.
#[proc_macro_attribute]
pub fn reply_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    parse_reply_schema_args(attr)
        .and_then(|args| {
            let item_struct = syn::parse::<ItemStruct>(item)?;
            expand_reply_schema(&args, &item_struct)
        })
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_reply_schema(args: &ReplySchemaArgs, item: &ItemStruct) -> syn::Result<TokenStream2> {
    ensure_supported_struct(item)?;

    let ident = &item.ident;
    let schema_name = infer_schema_name(item, args.name.as_ref());
    let description = match infer_description(
        args.description.as_ref(),
        collect_doc_comments(&item.attrs),
    ) {
        Some(lit) => quote! { Some(#lit) },
        None => quote! { None },
    };
    let property_docs = collect_field_docs(item).into_iter().map(|(property, doc)| {
        let property = LitStr::new(&property, Span::call_site());
        let doc = LitStr::new(&doc, Span::call_site());
        quote! { (#property, #doc) }
    });

    Ok(quote! {
        #item

        impl itinerary_agent::schema::ReplySchema for #ident {
            fn schema() -> &'static itinerary_agent::schema::SchemaHandle {
                use itinerary_agent::schema::{apply_doc_comments, SchemaHandle};

                static HANDLE: std::sync::OnceLock<SchemaHandle> = std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    let mut root = schemars::schema_for!(Self);
                    apply_doc_comments(&mut root, #schema_name, #description, &[#(#property_docs),*]);
                    SchemaHandle::from_root_schema(#schema_name, root)
                })
            }
        }
    })
}
