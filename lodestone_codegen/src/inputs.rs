use crate::{
    deprecation::DeprecationStatus,
    field_type::FieldType,
    objects::GqlObjectField,
    query::QueryContext,
    schema::Schema,
    shared::{field_rename_annotation, keyword_replace}
};
use graphql_parser::schema;
use heck::SnakeCase;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::cell::Cell;

/// An input object, emitted as a Serialize struct when a variable
/// (transitively) uses it.
#[derive(Debug, Clone, PartialEq)]
pub struct GqlInput<'schema> {
    pub description: Option<&'schema str>,
    pub name: &'schema str,
    pub fields: Vec<GqlObjectField<'schema>>,
    pub is_required: Cell<bool>
}

impl<'schema> GqlInput<'schema> {
    pub(crate) fn require(&self, schema: &Schema<'_>) {
        if self.is_required.get() {
            return;
        }
        self.is_required.set(true);
        for field in &self.fields {
            schema.require(field.type_.inner_name_str());
        }
    }

    pub(crate) fn to_rust(&self, context: &QueryContext<'_>) -> TokenStream {
        let name = Ident::new(self.name, Span::call_site());
        let description = self.description.map(|d| quote!(#[doc = #d]));
        let derives = context.variables_derives();
        let fields = self.fields.iter().map(|field| {
            let rust_safe_field_name = keyword_replace(&field.name.to_snake_case());
            let field_ident = Ident::new(&rust_safe_field_name, Span::call_site());
            let rename = field_rename_annotation(field.name, &rust_safe_field_name);
            let ty = field.type_.to_rust(context, "");
            let description = field.description.map(|d| quote!(#[doc = #d]));
            quote!(#description #rename pub #field_ident: #ty)
        });

        quote! {
            #derives
            #description
            pub struct #name {
                #(#fields,)*
            }
        }
    }
}

impl<'schema> std::convert::From<&'schema schema::InputObjectType> for GqlInput<'schema> {
    fn from(input: &'schema schema::InputObjectType) -> GqlInput<'schema> {
        GqlInput {
            description: input.description.as_deref(),
            name: &input.name,
            fields: input
                .fields
                .iter()
                .map(|field| GqlObjectField {
                    description: field.description.as_deref(),
                    name: &field.name,
                    type_: FieldType::from(&field.value_type),
                    deprecation: DeprecationStatus::Current
                })
                .collect(),
            is_required: false.into()
        }
    }
}
