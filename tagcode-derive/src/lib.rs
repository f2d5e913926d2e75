//! # Tagcode Derive Macros
//!
//! This crate provides the procedural macros for `tagcode`. It automates the
//! construction of a product type's registration: the constructor and field
//! extractor capabilities, the identity declaration (with supertypes taken
//! from the `#[tagcode(implements(...))]` attribute) and the `FieldType`
//! implementation that lets products compose as fields of other products.
//!
//! Compatible with `syn 2.0`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Index};

/// Derives a registration for a product type with zero, one or two fields.
///
/// Generates an inherent `registration()` accessor (configured once against
/// the global registry, on first use) and an implementation of
/// `tagcode::FieldType`. Supertypes are declared literally:
///
/// ```rust,ignore
/// #[derive(TagcodeProduct)]
/// #[tagcode(implements(Shape, Drawable))]
/// struct Circle { radius: f64 }
/// ```
#[proc_macro_derive(TagcodeProduct, attributes(tagcode))]
pub fn derive_tagcode_product(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    if !input.generics.params.is_empty() {
        return syn::Error::new(name.span(), "TagcodeProduct does not support generic types")
            .to_compile_error()
            .into();
    }

    let data_struct = match input.data {
        Data::Struct(ds) => ds,
        _ => {
            return syn::Error::new(name.span(), "TagcodeProduct only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let supertypes = match parse_attributes(&input.attrs) {
        Ok(supertypes) => supertypes,
        Err(e) => return e.to_compile_error().into(),
    };

    let name_str = name.to_string();
    let identity = quote! {
        tagcode::TypeIdentity::new(tagcode::TypeName::new(#name_str))
            #(.implements(tagcode::TypeName::new(#supertypes)))*
    };

    let expanded = match &data_struct.fields {
        Fields::Unit => generate_arity0(&name, &identity, quote! { #name }),
        Fields::Named(named) => {
            let fields: Vec<&syn::Field> = named.named.iter().collect();
            match fields.as_slice() {
                [] => generate_arity0(&name, &identity, quote! { #name {} }),
                [field] => {
                    let ident = field.ident.clone().unwrap();
                    let ty = &field.ty;
                    generate_arity1(
                        &name,
                        &identity,
                        ty,
                        quote! { |value| #name { #ident: value } },
                        quote! { |value: &#name| &value.#ident },
                    )
                }
                [first, second] => {
                    let (ident_a, ty_a) = (first.ident.clone().unwrap(), &first.ty);
                    let (ident_b, ty_b) = (second.ident.clone().unwrap(), &second.ty);
                    generate_arity2(
                        &name,
                        &identity,
                        ty_a,
                        ty_b,
                        quote! { |first, second| #name { #ident_a: first, #ident_b: second } },
                        quote! { |value: &#name| (&value.#ident_a, &value.#ident_b) },
                    )
                }
                _ => {
                    return syn::Error::new(
                        name.span(),
                        "TagcodeProduct supports products of at most two fields",
                    )
                    .to_compile_error()
                    .into();
                }
            }
        }
        Fields::Unnamed(unnamed) => {
            let fields: Vec<&syn::Field> = unnamed.unnamed.iter().collect();
            match fields.as_slice() {
                [] => generate_arity0(&name, &identity, quote! { #name() }),
                [field] => {
                    let ty = &field.ty;
                    let idx = Index::from(0);
                    generate_arity1(
                        &name,
                        &identity,
                        ty,
                        quote! { |value| #name(value) },
                        quote! { |value: &#name| &value.#idx },
                    )
                }
                [first, second] => {
                    let ty_a = &first.ty;
                    let ty_b = &second.ty;
                    let idx_a = Index::from(0);
                    let idx_b = Index::from(1);
                    generate_arity2(
                        &name,
                        &identity,
                        ty_a,
                        ty_b,
                        quote! { |first, second| #name(first, second) },
                        quote! { |value: &#name| (&value.#idx_a, &value.#idx_b) },
                    )
                }
                _ => {
                    return syn::Error::new(
                        name.span(),
                        "TagcodeProduct supports products of at most two fields",
                    )
                    .to_compile_error()
                    .into();
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Parses `#[tagcode(...)]` attributes. Returns the declared supertype names.
fn parse_attributes(attrs: &[Attribute]) -> syn::Result<Vec<String>> {
    let mut supertypes = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("tagcode") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("implements") {
                    meta.parse_nested_meta(|inner| match inner.path.get_ident() {
                        Some(ident) => {
                            supertypes.push(ident.to_string());
                            Ok(())
                        }
                        None => Err(inner.error("expected a bare supertype name")),
                    })?;
                    return Ok(());
                }
                Err(meta.error("Unknown tagcode attribute key. Supported: implements"))
            })?;
        }
    }
    Ok(supertypes)
}

// --- Generator: Arity 0 ---

fn generate_arity0(
    name: &syn::Ident,
    identity: &proc_macro2::TokenStream,
    ctor: proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    quote! {
        impl #name {
            /// Returns the process-wide registration for this product type,
            /// configuring it on first access.
            pub fn registration() -> &'static ::std::sync::Arc<tagcode::Arity0<#name>> {
                static REGISTRATION: ::std::sync::OnceLock<::std::sync::Arc<tagcode::Arity0<#name>>> =
                    ::std::sync::OnceLock::new();
                REGISTRATION.get_or_init(|| {
                    tagcode::rt::build_arity0(|| #ctor, #identity)
                })
            }
        }

        impl tagcode::FieldType for #name {
            fn codec() -> tagcode::SharedCodec<Self> {
                tagcode::rt::arity0_codec(#name::registration())
            }
        }
    }
}

// --- Generator: Arity 1 ---

fn generate_arity1(
    name: &syn::Ident,
    identity: &proc_macro2::TokenStream,
    field_ty: &syn::Type,
    ctor: proc_macro2::TokenStream,
    extract: proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    quote! {
        impl #name {
            /// Returns the process-wide registration for this product type,
            /// configuring it on first access.
            pub fn registration() -> &'static ::std::sync::Arc<tagcode::Arity1<#name, #field_ty>> {
                static REGISTRATION: ::std::sync::OnceLock<
                    ::std::sync::Arc<tagcode::Arity1<#name, #field_ty>>,
                > = ::std::sync::OnceLock::new();
                REGISTRATION.get_or_init(|| {
                    tagcode::rt::build_arity1(
                        #ctor,
                        #extract,
                        #identity,
                        <#field_ty as tagcode::FieldType>::codec(),
                    )
                })
            }
        }

        impl tagcode::FieldType for #name {
            fn codec() -> tagcode::SharedCodec<Self> {
                tagcode::rt::arity1_codec(#name::registration())
            }
        }
    }
}

// --- Generator: Arity 2 ---

fn generate_arity2(
    name: &syn::Ident,
    identity: &proc_macro2::TokenStream,
    first_ty: &syn::Type,
    second_ty: &syn::Type,
    ctor: proc_macro2::TokenStream,
    extract: proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    quote! {
        impl #name {
            /// Returns the process-wide registration for this product type,
            /// configuring it on first access.
            pub fn registration()
                -> &'static ::std::sync::Arc<tagcode::Arity2<#name, #first_ty, #second_ty>>
            {
                static REGISTRATION: ::std::sync::OnceLock<
                    ::std::sync::Arc<tagcode::Arity2<#name, #first_ty, #second_ty>>,
                > = ::std::sync::OnceLock::new();
                REGISTRATION.get_or_init(|| {
                    tagcode::rt::build_arity2(
                        #ctor,
                        #extract,
                        #identity,
                        <#first_ty as tagcode::FieldType>::codec(),
                        <#second_ty as tagcode::FieldType>::codec(),
                    )
                })
            }
        }

        impl tagcode::FieldType for #name {
            fn codec() -> tagcode::SharedCodec<Self> {
                tagcode::rt::arity2_codec(#name::registration())
            }
        }
    }
}
