use proc_macro2::Span;
use syn::{
    parse::Parser, punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Fields,
    ItemStruct, Lit, LitStr, MetaNameValue, Token,
};

#[derive(Default)]
pub struct ReplySchemaArgs {
    pub name: Option<LitStr>,
    pub description: Option<LitStr>,
}

pub fn parse_reply_schema_args(attr: proc_macro::TokenStream) -> syn::Result<ReplySchemaArgs> {
    if attr.is_empty() {
        return Ok(ReplySchemaArgs::default());
    }

    let parser = Punctuated::<MetaNameValue, Token![,]>::parse_terminated;
    let args = parser.parse(attr)?;

    let mut result = ReplySchemaArgs::default();

    for nested in args {
        let ident = nested
            .path
            .get_ident()
            .ok_or_else(|| syn::Error::new_spanned(&nested.path, "expected identifier"))?;

        let lit_str = match &nested.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => lit.clone(),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected string literal value",
                ));
            }
        };

        let slot = match ident.to_string().as_str() {
            "name" => &mut result.name,
            "description" => &mut result.description,
            other => {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unsupported argument `{other}`"),
                ));
            }
        };

        if slot.is_some() {
            return Err(syn::Error::new(
                ident.span(),
                format!("duplicate `{ident}` argument"),
            ));
        }
        *slot = Some(lit_str);
    }

    Ok(result)
}

/// Reply schemas are plain structs with named fields and no generics.
pub fn ensure_supported_struct(item: &ItemStruct) -> syn::Result<()> {
    if !matches!(item.fields, Fields::Named(_)) {
        return Err(syn::Error::new(
            item.struct_token.span(),
            "`#[reply_schema]` only supports structs with named fields",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new(
            item.generics.span(),
            "`#[reply_schema]` does not support generic structs",
        ));
    }
    Ok(())
}

pub fn collect_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let docs: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(MetaNameValue {
                value: Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }),
                ..
            }) => Some(lit.value().trim().to_string()),
            _ => None,
        })
        .collect();

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n"))
    }
}

/// Field docs keyed by the serialized property name, so `rename` and
/// `rename_all = "camelCase"` land on the property schemars emits.
pub fn collect_field_docs(item: &ItemStruct) -> Vec<(String, String)> {
    let camel_case = serde_string_arg(&item.attrs, "rename_all").as_deref() == Some("camelCase");
    let mut results = Vec::new();

    if let Fields::Named(fields) = &item.fields {
        for field in &fields.named {
            let Some(ident) = &field.ident else {
                continue;
            };
            let Some(doc) = collect_doc_comments(&field.attrs) else {
                continue;
            };

            let property = match serde_string_arg(&field.attrs, "rename") {
                Some(renamed) => renamed,
                None if camel_case => to_camel_case(&ident.to_string()),
                None => ident.to_string(),
            };
            results.push((property, doc));
        }
    }

    results
}

fn serde_string_arg(attrs: &[Attribute], key: &str) -> Option<String> {
    let mut found = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        // Unknown nested forms abort the walk; anything captured so far still counts.
        let _ = attr.parse_nested_meta(|meta| {
            if meta.input.peek(Token![=]) {
                let value: Expr = meta.value()?.parse()?;
                if meta.path.is_ident(key) {
                    if let Expr::Lit(ExprLit {
                        lit: Lit::Str(lit), ..
                    }) = value
                    {
                        found = Some(lit.value());
                    }
                }
            }
            Ok(())
        });
    }

    found
}

fn to_camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper_next = false;

    for ch in snake.trim_start_matches('_').chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }

    out
}

pub fn infer_schema_name(item: &ItemStruct, explicit: Option<&LitStr>) -> LitStr {
    if let Some(explicit) = explicit {
        return explicit.clone();
    }

    LitStr::new(&item.ident.to_string(), Span::call_site())
}

pub fn infer_description(explicit: Option<&LitStr>, doc: Option<String>) -> Option<LitStr> {
    if let Some(explicit) = explicit {
        return Some(explicit.clone());
    }

    doc.map(|text| LitStr::new(&text, Span::call_site()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_conversion() {
        assert_eq!(to_camel_case("start_time_utc"), "startTimeUtc");
        assert_eq!(to_camel_case("name"), "name");
        assert_eq!(to_camel_case("duration_in_seconds"), "durationInSeconds");
    }

    #[test]
    fn field_docs_follow_serde_renames() {
        let item: ItemStruct = syn::parse_quote! {
            #[serde(rename_all = "camelCase")]
            struct Sample {
                /// Coded category
                #[serde(rename = "type")]
                activity_type: u32,
                /// Start in epoch millis
                start_time_utc: i64,
                #[serde(default)]
                note: Option<String>,
            }
        };

        let docs = collect_field_docs(&item);
        assert_eq!(
            docs,
            vec![
                ("type".to_string(), "Coded category".to_string()),
                ("startTimeUtc".to_string(), "Start in epoch millis".to_string()),
            ]
        );
    }

    #[test]
    fn only_plain_named_structs_are_supported() {
        let named: ItemStruct = syn::parse_quote! { struct Trip { name: String } };
        assert!(ensure_supported_struct(&named).is_ok());

        let tuple: ItemStruct = syn::parse_quote! { struct Trip(String); };
        let err = ensure_supported_struct(&tuple).unwrap_err();
        assert!(err.to_string().contains("named fields"));

        let generic: ItemStruct = syn::parse_quote! { struct Trip<T> { items: Vec<T> } };
        let err = ensure_supported_struct(&generic).unwrap_err();
        assert!(err.to_string().contains("generic"));
    }
}
