use crate::macros::error::derive_names;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::{Attribute, Expr, Fields, Ident, ItemStruct, LitBool, Meta, Type, Visibility};

/// Property names that would collide with generated inherent items.
const RESERVED: &[&str] = &["new", "build", "builder"];

struct ModelArgs {
    builder: Option<Ident>,
}

/// A struct field together with the options parsed from its `#[property(...)]` attribute.
struct PropertyField {
    ident: Ident,
    ty: Type,
    attrs: Vec<Attribute>,
    required: bool,
    one_of: Option<Expr>,
    validates: Option<Expr>,
}

/// Expands the `#[model]` attribute macro.
pub fn expand_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match expand(args, input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(args: TokenStream, input: ItemStruct) -> syn::Result<TokenStream> {
    let ModelArgs { builder } = parse_model_args(args)?;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "model does not support generic structs",
        ));
    }
    let Fields::Named(named) = &input.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "model only supports structs with named fields",
        ));
    };
    let fields = named.named.iter().map(parse_field).collect::<syn::Result<Vec<_>>>()?;

    let model = &input.ident;
    let builder = builder.unwrap_or_else(|| format_ident!("{}Builder", model));

    Ok([
        model_struct(&input, &fields),
        model_impls(model, &builder, &fields),
        builder_struct(&input.vis, model, &builder, &fields),
    ]
    .into_iter()
    .collect())
}

fn parse_model_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
    let mut builder = None;

    for meta in parser.parse2(args)? {
        let Meta::NameValue(name_value) = meta else {
            return Err(syn::Error::new_spanned(meta, "Expected `builder = Name`"));
        };
        if !name_value.path.is_ident("builder") {
            return Err(syn::Error::new_spanned(
                name_value.path,
                "Unsupported argument; expected `builder = Name`",
            ));
        }
        if builder.is_some() {
            return Err(syn::Error::new_spanned(name_value, "Duplicate `builder` argument"));
        }
        let Expr::Path(path) = &name_value.value else {
            return Err(syn::Error::new_spanned(&name_value.value, "builder must be an identifier"));
        };
        let Some(ident) = path.path.get_ident() else {
            return Err(syn::Error::new_spanned(path, "builder must be a plain identifier"));
        };
        builder = Some(ident.clone());
    }

    Ok(ModelArgs { builder })
}

fn parse_field(field: &syn::Field) -> syn::Result<PropertyField> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "model only supports named fields"));
    };
    if RESERVED.iter().any(|reserved| ident == reserved) {
        return Err(syn::Error::new_spanned(
            &ident,
            format!("`{ident}` is reserved for the generated builder"),
        ));
    }

    let mut property = PropertyField {
        ident,
        ty: field.ty.clone(),
        attrs: Vec::new(),
        required: false,
        one_of: None,
        validates: None,
    };

    for attr in &field.attrs {
        if !attr.path().is_ident("property") {
            property.attrs.push(attr.clone());
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("required") {
                property.required = if meta.input.peek(syn::Token![=]) {
                    meta.value()?.parse::<LitBool>()?.value
                } else {
                    true
                };
                return Ok(());
            }
            if meta.path.is_ident("one_of") {
                if property.one_of.is_some() {
                    return Err(meta.error("Duplicate `one_of` option"));
                }
                property.one_of = Some(meta.value()?.parse()?);
                return Ok(());
            }
            if meta.path.is_ident("validates") {
                if property.validates.is_some() {
                    return Err(meta.error("Duplicate `validates` option"));
                }
                property.validates = Some(meta.value()?.parse()?);
                return Ok(());
            }
            Err(meta.error("Unsupported property option; expected required, one_of or validates"))
        })?;
    }

    Ok(property)
}

fn model_struct(input: &ItemStruct, fields: &[PropertyField]) -> TokenStream {
    let ItemStruct { attrs, vis, ident, .. } = input;
    let derives = derive_names(attrs);
    let debug = if derives.contains("Debug") { quote! {} } else { quote! { #[derive(Debug)] } };
    let definitions = fields.iter().map(|field| {
        let PropertyField { ident, ty, attrs, .. } = field;
        quote! { #(#attrs)* #ident: ::core::option::Option<#ty> }
    });

    quote! {
        #(#attrs)*
        #debug
        #vis struct #ident {
            #(#definitions,)*
        }
    }
}

fn model_impls(model: &Ident, builder: &Ident, fields: &[PropertyField]) -> TokenStream {
    let idents: Vec<_> = fields.iter().map(|f| &f.ident).collect();
    let accessors = fields.iter().map(|PropertyField { ident, ty, .. }| {
        let doc = format!("Value of `{ident}` captured at build time, if it was set.");
        quote! {
            #[doc = #doc]
            #[must_use]
            pub const fn #ident(&self) -> ::core::option::Option<&#ty> {
                self.#ident.as_ref()
            }
        }
    });
    let assignments = fields.iter().map(|PropertyField { ident, ty, .. }| {
        let name = ident.to_string();
        quote! {
            #name => {
                self.#ident = Some(<#ty as ::metabuilder::PropertyValue>::extract(#name, &value)?);
            },
        }
    });

    quote! {
        #[automatically_derived]
        impl #model {
            #(#accessors)*

            /// Starts a fresh builder for this model.
            ///
            /// # Errors
            /// Returns the declaration error if the builder type is misconfigured.
            pub fn builder() -> ::metabuilder::Result<#builder> {
                #builder::new()
            }
        }

        #[automatically_derived]
        impl ::metabuilder::Model for #model {
            fn empty() -> Self {
                Self { #(#idents: None,)* }
            }

            fn assign(
                &mut self,
                name: &str,
                value: ::metabuilder::Value,
            ) -> ::metabuilder::Result<()> {
                match name {
                    #(#assignments)*
                    _ => return Err(::metabuilder::BuilderError::unknown_property(name)),
                }
                Ok(())
            }
        }
    }
}

fn builder_struct(
    vis: &Visibility,
    model: &Ident,
    builder: &Ident,
    fields: &[PropertyField],
) -> TokenStream {
    let declarations = fields.iter().map(declaration);
    let methods = fields.iter().map(|PropertyField { ident, ty, .. }| {
        let name = ident.to_string();
        let setter = format_ident!("set_{}", ident);
        let clearer = format_ident!("clear_{}", ident);
        let setter_doc = format!("Validates and stores `{name}`.");
        quote! {
            /// Currently accumulated value, if any.
            #[must_use]
            pub fn #ident(&self) -> ::core::option::Option<#ty> {
                self.inner
                    .get(#name)
                    .and_then(<#ty as ::metabuilder::PropertyValue>::from_value)
            }

            #[doc = #setter_doc]
            ///
            /// # Errors
            /// Returns the first violated rule; the previous value is kept.
            pub fn #setter(&mut self, value: impl Into<#ty>) -> ::metabuilder::Result<()> {
                let value: #ty = value.into();
                self.inner.set(#name, value)
            }

            /// Forgets the accumulated value.
            ///
            /// # Errors
            /// Fails when the property is required.
            pub fn #clearer(&mut self) -> ::metabuilder::Result<()> {
                self.inner.clear(#name)
            }
        }
    });
    let doc = format!("Validating builder for [`{model}`].");

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone)]
        #vis struct #builder {
            inner: ::metabuilder::Builder,
        }

        #[automatically_derived]
        impl ::metabuilder::BuilderType for #builder {
            fn declare(
                declaration: &mut ::metabuilder::Declaration,
            ) -> ::metabuilder::Result<()> {
                declaration.model::<#model>()?;
                #(#declarations)*
                Ok(())
            }

            fn from_builder(inner: ::metabuilder::Builder) -> Self {
                Self { inner }
            }
        }

        #[automatically_derived]
        impl #builder {
            /// Returns an empty instance. The builder type is declared on first use and
            /// its schema is shared by every instance created here.
            ///
            /// # Errors
            /// Returns the declaration error if the builder type is misconfigured.
            pub fn new() -> ::metabuilder::Result<Self> {
                static SCHEMA: ::metabuilder::SchemaCell = ::metabuilder::SchemaCell::new();
                SCHEMA.builder::<#builder>()
            }

            #(#methods)*

            /// Materializes a new model instance from the accumulated values.
            ///
            /// # Errors
            /// Returns [`::metabuilder::BuilderError::RequiredField`] when a required
            /// property is missing.
            pub fn build(&self) -> ::metabuilder::Result<#model> {
                self.inner.build::<#model>()
            }
        }

        impl ::core::ops::Deref for #builder {
            type Target = ::metabuilder::Builder;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::core::ops::DerefMut for #builder {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.inner
            }
        }
    }
}

fn declaration(field: &PropertyField) -> TokenStream {
    let PropertyField { ident, ty, required, one_of, validates, .. } = field;
    let name = ident.to_string();
    let one_of = one_of.as_ref().map(|values| quote! { .one_of(#values) });
    let validates = validates.as_ref().map(|predicate| quote! { .validates_as::<#ty>(#predicate) });

    quote! {
        declaration.property(
            #name,
            ::metabuilder::PropertyOptions::for_type::<#ty>()
                .required(#required)
                #one_of
                #validates,
        );
    }
}
