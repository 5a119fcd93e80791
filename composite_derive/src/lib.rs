extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::{quote, ToTokens};
use syn::ext::IdentExt;

/// Derives `sinli::Composite` (and `sinli::IntoField` as a nested field) for a
/// struct with named fields.
///
/// The contents of each field's `#[sinli(...)]` attribute are carried into the
/// generated field table as raw text, and are only interpreted when the
/// composite is encoded, so that malformed layouts surface as `SchemaError`s.
#[proc_macro_derive(Composite, attributes(sinli))]
pub fn composite_derive(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    impl_composite(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn impl_composite(ast: &syn::DeriveInput) -> syn::Result<TokenStream2> {
    let name = &ast.ident;

    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "Composite cannot be derived for generic types",
        ));
    }

    let named = match &ast.data {
        syn::Data::Struct(syn::DataStruct {
            fields: syn::Fields::Named(syn::FieldsNamed { named, .. }),
            ..
        }) => named,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Composite can only be derived for structs with named fields",
            ))
        }
    };

    let mut labels = Vec::with_capacity(named.len());
    let mut tags = Vec::with_capacity(named.len());
    let mut types = Vec::with_capacity(named.len());
    let mut idents = Vec::with_capacity(named.len());

    for field in named.iter() {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        labels.push(ident.unraw().to_string());
        tags.push(field_tag(&field.attrs));
        types.push(&field.ty);
        idents.push(ident);
    }

    let index = 0..named.len();

    Ok(quote! {
        impl ::sinli::Composite for #name {
            fn fields(&self) -> &'static [::sinli::FieldMeta] {
                const FIELDS: &[::sinli::FieldMeta] = &[
                    #( ::sinli::FieldMeta::new(#labels, #tags, <#types as ::sinli::IntoField>::KIND), )*
                ];
                FIELDS
            }

            fn value(&self, index: usize) -> ::std::option::Option<::sinli::Value<'_>> {
                match index {
                    #( #index => ::std::option::Option::Some(::sinli::IntoField::to_value(&self.#idents)), )*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::sinli::IntoField for #name {
            const KIND: ::sinli::FieldKind = ::sinli::FieldKind::Nested;

            fn to_value(&self) -> ::sinli::Value<'_> {
                ::sinli::Value::Nested(self)
            }
        }
    })
}

/// Concatenates the contents of every `#[sinli(...)]` attribute on a field.
fn field_tag(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("sinli"))
        .map(|attr| match &attr.meta {
            syn::Meta::List(list) => tag_text(list.tokens.clone()),
            syn::Meta::NameValue(nv) => tag_text(nv.value.to_token_stream()),
            syn::Meta::Path(_) => String::new(),
        })
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders attribute tokens as option text, with every string literal (raw
/// or escaped) replaced by its value in double quotes.
fn tag_text(tokens: TokenStream2) -> String {
    tokens
        .into_iter()
        .map(|tt| match tt {
            TokenTree::Literal(_) => match syn::parse2::<syn::LitStr>(TokenStream2::from(tt.clone())) {
                Ok(lit) => quoted(&lit.value()),
                Err(_) => tt.to_string(),
            },
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Encloses `text` in double quotes, escaping only quotes and backslashes.
fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
