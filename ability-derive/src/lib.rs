//! Derive macros for the `ability` crate.
//!
//! This crate provides a derive macro for implementing the `Subject` trait,
//! which tells an `Ability` which policy a value is checked against.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ability = { version = "0.1", features = ["derive"] }
//! ```
//!
//! ## Examples
//!
//! ```rust,ignore
//! use ability::Subject;
//!
//! // Subject name defaults to the type name: "Book"
//! #[derive(Subject)]
//! struct Book {
//!     id: u64,
//!     user_id: u64,
//! }
//!
//! // Explicit subject name
//! #[derive(Subject)]
//! #[subject(name = "Article")]
//! struct BlogPost {
//!     id: u64,
//! }
//!
//! assert_eq!(Book::subject_name(), "Book");
//! assert_eq!(BlogPost::subject_name(), "Article");
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Error, LitStr, Result, parse_macro_input};

/// Derive macro for implementing the `Subject` trait.
///
/// ## Attributes
///
/// - `#[subject(name = "...")]` - Optional. The subject name policies are
///   registered under. Defaults to the type's identifier.
///
/// ## Example
///
/// ```rust,ignore
/// #[derive(Subject)]
/// #[subject(name = "Book")]
/// struct BookRecord {
///     id: u64,
/// }
/// ```
#[proc_macro_derive(Subject, attributes(subject))]
pub fn derive_subject(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_subject_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_subject_impl(input: DeriveInput) -> Result<TokenStream2> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let subject_name = match parse_name_attr(&input)? {
        Some(name) => name,
        None => ident.to_string(),
    };

    if subject_name.is_empty() {
        return Err(Error::new_spanned(&input, "subject name cannot be empty"));
    }

    Ok(quote! {
        impl #impl_generics ::ability::Subject for #ident #ty_generics #where_clause {
            fn subject_name() -> &'static str {
                #subject_name
            }
        }
    })
}

/// Parse the `name = "..."` value from `#[subject(...)]` attributes.
fn parse_name_attr(input: &DeriveInput) -> Result<Option<String>> {
    for attr in &input.attrs {
        if !attr.path().is_ident("subject") {
            continue;
        }

        let mut name_value = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name_value = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported subject attribute, expected `name = \"...\"`"))
            }
        })?;

        if name_value.is_some() {
            return Ok(name_value);
        }
    }
    Ok(None)
}
