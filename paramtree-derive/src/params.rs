use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, DeriveInput, Generics, Ident, LitStr, Type, ext::IdentExt, meta::ParseNestedMeta,
    parse_quote,
};

/// Container-level input. No container attributes are accepted yet.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(param), supports(struct_named))]
struct ParamsOpts {
    ident: Ident,
    generics: Generics,
    data: darling::ast::Data<darling::util::Ignored, FieldOpts>,
}

/// Field-level attributes for `#[param(...)]`
#[derive(Debug, FromField)]
#[darling(attributes(param), forward_attrs(serde))]
struct FieldOpts {
    ident: Option<Ident>,
    ty: Type,
    attrs: Vec<Attribute>,

    /// Path segment addressing this field, ahead of serde's rename and the name
    #[darling(default)]
    rename: Option<String>,

    /// Leave the field out of the field table entirely
    #[darling(default)]
    skip: bool,

    /// Keep the field matchable but refuse writes to it
    #[darling(default)]
    read_only: bool,
}

pub fn generate_impl(input: &DeriveInput) -> TokenStream2 {
    match ParamsOpts::from_derive_input(input) {
        Ok(opts) => generate_from_opts(opts).unwrap_or_else(syn::Error::into_compile_error),
        Err(e) => e.write_errors(),
    }
}

fn generate_from_opts(opts: ParamsOpts) -> syn::Result<TokenStream2> {
    let type_name = &opts.ident;
    let fields = match opts.data {
        darling::ast::Data::Struct(fields) => fields.fields,
        darling::ast::Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                type_name,
                "Params can only be derived for structs with named fields",
            ));
        }
    };

    let mut infos = Vec::new();
    let mut accessors = Vec::new();
    let mut writable_types = Vec::new();

    for field in fields.iter().filter(|field| !field.skip) {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(&field.ty, "expected a named field"));
        };
        let name = ident.unraw().to_string();
        let rename = optional_str(field.rename.as_deref());
        let serde_rename = optional_str(serde_rename(&field.attrs)?.as_deref());

        let index = infos.len();
        infos.push(quote! {
            ::paramtree::FieldInfo {
                name: #name,
                rename: #rename,
                serde_rename: #serde_rename,
            }
        });

        if !field.read_only {
            accessors.push(quote! {
                #index => ::core::option::Option::Some(&mut self.#ident),
            });
            writable_types.push(&field.ty);
        }
    }

    let generics = bound_field_types(opts.generics.clone(), &writable_types);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::paramtree::Params for #type_name #ty_generics #where_clause {
            fn location(&mut self) -> ::paramtree::Location<'_> {
                ::paramtree::Location::Struct(self)
            }
        }

        impl #impl_generics ::paramtree::StructMut for #type_name #ty_generics #where_clause {
            fn fields(&self) -> &'static [::paramtree::FieldInfo] {
                const FIELDS: &[::paramtree::FieldInfo] = &[#(#infos),*];
                FIELDS
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::paramtree::Params> {
                match index {
                    #(#accessors)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// Generic structs need every writable field type to implement `Params`.
fn bound_field_types(mut generics: Generics, types: &[&Type]) -> Generics {
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for ty in types {
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::paramtree::Params));
        }
    }
    generics
}

fn optional_str(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    }
}

/// Reads `rename = "..."` or `rename(deserialize = "...")` out of `#[serde(...)]`.
fn serde_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                return skip_meta(meta);
            }
            if meta.input.peek(syn::Token![=]) {
                let value: LitStr = meta.value()?.parse()?;
                rename = Some(value.value());
                return Ok(());
            }
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("deserialize") {
                    let value: LitStr = inner.value()?.parse()?;
                    rename = Some(value.value());
                    Ok(())
                } else {
                    skip_meta(inner)
                }
            })
        })?;
    }
    Ok(rename)
}

/// Consumes a serde option this macro has no use for.
fn skip_meta(meta: ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(skip_meta)?;
    }
    Ok(())
}
