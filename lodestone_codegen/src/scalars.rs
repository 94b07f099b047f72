use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::cell::Cell;

#[derive(Debug, Clone, PartialEq)]
pub struct Scalar<'schema> {
    pub name: &'schema str,
    pub description: Option<&'schema str>,
    pub is_required: Cell<bool>
}

impl<'schema> Scalar<'schema> {
    /// Emit the type alias for a custom scalar.
    ///
    /// `DateTime` maps to the runtime's chrono-backed codec type. Any other
    /// custom scalar is passed through as raw JSON, the registry treats it
    /// as identity unless the caller registered a codec for it.
    pub(crate) fn to_rust(&self) -> TokenStream {
        let ident = Ident::new(self.name, Span::call_site());
        let description = self.description.map(|d| quote!(#[doc = #d]));
        let ty = if self.name == "DateTime" {
            quote!(::lodestone::codec::DateTime)
        } else {
            quote!(::serde_json::Value)
        };

        quote! {
            #description
            #[allow(dead_code)]
            pub type #ident = #ty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_aliases_the_runtime_codec_type() {
        let scalar = Scalar {
            name: "DateTime",
            description: None,
            is_required: Cell::new(true)
        };
        assert!(scalar
            .to_rust()
            .to_string()
            .contains(":: lodestone :: codec :: DateTime"));
    }

    #[test]
    fn unknown_scalars_fall_back_to_raw_json() {
        let scalar = Scalar {
            name: "Cursor",
            description: None,
            is_required: Cell::new(true)
        };
        assert!(scalar
            .to_rust()
            .to_string()
            .contains(":: serde_json :: Value"));
    }
}
