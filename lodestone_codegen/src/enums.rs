use crate::{query::QueryContext, shared::keyword_replace};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::cell::Cell;

#[derive(Debug, Clone, PartialEq)]
pub struct GqlEnum<'schema> {
    pub description: Option<&'schema str>,
    pub name: &'schema str,
    pub variants: Vec<GqlEnumVariant<'schema>>,
    pub is_required: Cell<bool>
}

#[derive(Debug, Clone, PartialEq)]
pub struct GqlEnumVariant<'schema> {
    pub description: Option<&'schema str>,
    pub name: &'schema str
}

impl<'schema> GqlEnum<'schema> {
    /// Expand the enum with hand-written serde impls.
    ///
    /// Variant names are carried over verbatim from the schema. With the
    /// catch-all option enabled an extra `Unknown(String)` variant absorbs
    /// values the schema did not declare at generation time, otherwise
    /// deserialization of such a value fails.
    pub(crate) fn to_rust(&self, query_context: &QueryContext<'_>) -> TokenStream {
        let derives = query_context.response_enum_derives();
        let name = Ident::new(self.name, Span::call_site());
        let names: Vec<&str> = self.variants.iter().map(|variant| variant.name).collect();
        let idents: Vec<Ident> = names
            .iter()
            .map(|variant_name| Ident::new(&keyword_replace(variant_name), Span::call_site()))
            .collect();
        let descriptions = self
            .variants
            .iter()
            .map(|variant| variant.description.map(|d| quote!(#[doc = #d])));
        let description = self.description.map(|d| quote!(#[doc = #d]));
        let self_name = self.name;

        let (unknown_variant, serialize_unknown, deserialize_fallback) =
            if query_context.unknown_enum_variants {
                (
                    quote!(Unknown(String),),
                    quote!(#name::Unknown(ref value) => value.as_str(),),
                    quote!(_ => Ok(#name::Unknown(value)))
                )
            } else {
                (
                    quote!(),
                    quote!(),
                    quote! {
                        other => Err(<D::Error as ::serde::de::Error>::custom(format!(
                            "unknown {} variant: {}",
                            #self_name, other
                        )))
                    }
                )
            };

        quote! {
            #derives
            #description
            pub enum #name {
                #(#descriptions #idents,)*
                #unknown_variant
            }

            impl ::serde::Serialize for #name {
                fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(match *self {
                        #(#name::#idents => #names,)*
                        #serialize_unknown
                    })
                }
            }

            impl<'de> ::serde::Deserialize<'de> for #name {
                fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let value: String = ::serde::Deserialize::deserialize(deserializer)?;
                    match value.as_str() {
                        #(#names => Ok(#name::#idents),)*
                        #deserialize_fallback
                    }
                }
            }
        }
    }
}
