use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr};

pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let fields = named_fields(input)?;

    // #[document(collection = "...")] on the struct, or snake_case name + "s"
    let collection = extract_collection(input)?;
    let id_field = extract_id_field(name, fields)?;
    let unique_fields = extract_unique_fields(fields)?;
    let unique_names: Vec<LitStr> = unique_fields
        .iter()
        .map(|ident| LitStr::new(&ident.to_string(), ident.span()))
        .collect();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::retail_ids::Document for #name #ty_generics #where_clause {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id_field
            }

            fn unique_keys(&self) -> ::std::vec::Vec<(&'static str, ::std::string::String)> {
                #[allow(unused_mut)]
                let mut keys = ::std::vec::Vec::new();
                #(
                    if let ::std::option::Option::Some(value) =
                        ::retail_ids::UniqueValue::unique_value(&self.#unique_fields)
                    {
                        keys.push((#unique_names, ::std::string::String::from(value)));
                    }
                )*
                keys
            }
        }
    })
}

fn named_fields(input: &DeriveInput) -> syn::Result<&syn::punctuated::Punctuated<Field, syn::Token![,]>> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(&fields.named);
        }
    }
    Err(syn::Error::new(
        Span::call_site(),
        "Document derive: only structs with named fields are supported",
    ))
}

fn extract_collection(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("document") {
            continue;
        }

        let mut collection = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported document attribute"))
            }
        })?;

        if let Some(c) = collection {
            return Ok(c);
        }
    }

    let name = input.ident.to_string();
    Ok(format!("{}s", to_snake_case(&name)))
}

/// Field flags parsed from `#[document(id)]` / `#[document(unique)]`.
#[derive(Default)]
struct FieldFlags {
    id: bool,
    unique: bool,
}

fn field_flags(field: &Field) -> syn::Result<FieldFlags> {
    let mut flags = FieldFlags::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("document") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                flags.id = true;
                Ok(())
            } else if meta.path.is_ident("unique") {
                flags.unique = true;
                Ok(())
            } else {
                Err(meta.error("expected `id` or `unique`"))
            }
        })?;
    }
    Ok(flags)
}

fn extract_id_field(
    name: &Ident,
    fields: &syn::punctuated::Punctuated<Field, syn::Token![,]>,
) -> syn::Result<Ident> {
    for field in fields {
        if field_flags(field)?.id {
            if let Some(ident) = &field.ident {
                return Ok(ident.clone());
            }
        }
    }

    fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == "id")
        .cloned()
        .ok_or_else(|| {
            syn::Error::new(
                name.span(),
                "Document derive: no field marked with #[document(id)] and no field named `id`",
            )
        })
}

fn extract_unique_fields(
    fields: &syn::punctuated::Punctuated<Field, syn::Token![,]>,
) -> syn::Result<Vec<Ident>> {
    let mut unique = Vec::new();
    for field in fields {
        if field_flags(field)?.unique {
            if let Some(ident) = &field.ident {
                unique.push(ident.clone());
            }
        }
    }
    Ok(unique)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
