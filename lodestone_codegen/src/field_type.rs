use crate::query::QueryContext;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

#[derive(Clone, Debug, PartialEq, Hash)]
enum GraphqlTypeQualifier {
    Required,
    List
}

#[derive(Clone, Debug, PartialEq, Hash)]
pub struct FieldType<'a> {
    /// The type name of the field.
    ///
    /// e.g. for `[Int]!`, this would return `Int`.
    name: &'a str,
    /// An ordered list of qualifiers, from outer to inner.
    ///
    /// e.g. `[Int]!` would have `vec![List, Optional]`, but `[Int!]` would have `vec![Optional,
    /// List]`.
    qualifiers: Vec<GraphqlTypeQualifier>
}

impl<'a> FieldType<'a> {
    pub(crate) fn new(name: &'a str) -> Self {
        FieldType {
            name,
            qualifiers: Vec::new()
        }
    }

    #[cfg(test)]
    pub(crate) fn list(mut self) -> Self {
        self.qualifiers.insert(0, GraphqlTypeQualifier::List);
        self
    }

    pub(crate) fn nonnull(mut self) -> Self {
        self.qualifiers.insert(0, GraphqlTypeQualifier::Required);
        self
    }

    /// The same type reference with the outer non-null annotation stripped.
    ///
    /// Used for the top-level response wrapper fields, which are always
    /// nullable regardless of the schema annotation.
    pub(crate) fn as_nullable(&self) -> Self {
        let mut nullable = self.clone();
        if nullable.qualifiers.first() == Some(&GraphqlTypeQualifier::Required) {
            nullable.qualifiers.remove(0);
        }
        nullable
    }

    /// Takes a field type with its name.
    pub(crate) fn to_rust(&self, context: &QueryContext<'_>, prefix: &str) -> TokenStream {
        let prefix: &str = if prefix.is_empty() {
            self.inner_name_str()
        } else {
            prefix
        };

        let full_name = {
            if context.is_scalar(self.name) {
                self.name.to_string()
            } else if context.is_enum(self.name) {
                self.name.to_string()
            } else {
                if prefix.is_empty() {
                    panic!("Empty prefix for {:?}", self);
                }

                prefix.to_string()
            }
        };

        let full_name = crate::shared::keyword_replace(&full_name);
        let full_name = Ident::new(&full_name, Span::call_site());
        let mut qualified = quote!(#full_name);

        let mut non_null = false;

        // Note: we iterate over qualifiers in reverse because it is more intuitive. This
        // means we start from the _inner_ type and make our way to the outside.
        for qualifier in self.qualifiers.iter().rev() {
            match (non_null, qualifier) {
                // We are in non-null context, and we wrap the non-null type into a list.
                // We switch back to null context.
                (true, GraphqlTypeQualifier::List) => {
                    qualified = quote!(Vec<#qualified>);
                    non_null = false;
                }
                // We are in nullable context, and we wrap the nullable type into a list.
                (false, GraphqlTypeQualifier::List) => {
                    qualified = quote!(Vec<Option<#qualified>>);
                }
                // We are in non-nullable context, but we can't double require a type
                // (!!).
                (true, GraphqlTypeQualifier::Required) => panic!("double required annotation"),
                // We are in nullable context, and we switch to non-nullable context.
                (false, GraphqlTypeQualifier::Required) => {
                    non_null = true;
                }
            }
        }

        // If we are in nullable context at the end of the iteration, we wrap the whole
        // type with an Option.
        if !non_null {
            qualified = quote!(Option<#qualified>);
        }

        qualified
    }

    /// The qualifier list as a `&'static [Qualifier]` literal for the
    /// emitted shape tables.
    pub(crate) fn qualifier_tokens(&self) -> TokenStream {
        let qualifiers = self.qualifiers.iter().map(|qualifier| match qualifier {
            GraphqlTypeQualifier::Required => {
                quote!(::lodestone::codegen::Qualifier::Required)
            }
            GraphqlTypeQualifier::List => quote!(::lodestone::codegen::Qualifier::List)
        });
        quote!(&[#(#qualifiers),*])
    }

    /// Return the innermost name - we mostly use this for looking types up in our Schema struct.
    pub fn inner_name_str(&self) -> &str {
        self.name
    }

    /// Is the type nullable?
    ///
    /// Note: a list of nullable values is considered nullable only if the list itself is nullable.
    pub fn is_optional(&self) -> bool {
        if let Some(qualifier) = self.qualifiers.get(0) {
            qualifier != &GraphqlTypeQualifier::Required
        } else {
            true
        }
    }
}

impl<'schema> std::convert::From<&'schema graphql_parser::schema::Type> for FieldType<'schema> {
    fn from(schema_type: &'schema graphql_parser::schema::Type) -> FieldType<'schema> {
        from_schema_type_inner(schema_type)
    }
}

fn graphql_parser_depth(schema_type: &graphql_parser::schema::Type) -> usize {
    match schema_type {
        graphql_parser::schema::Type::ListType(inner) => 1 + graphql_parser_depth(inner),
        graphql_parser::schema::Type::NonNullType(inner) => 1 + graphql_parser_depth(inner),
        graphql_parser::schema::Type::NamedType(_) => 0
    }
}

fn from_schema_type_inner(inner: &graphql_parser::schema::Type) -> FieldType<'_> {
    use graphql_parser::schema::Type::*;

    let qualifiers_depth = graphql_parser_depth(inner);
    let mut qualifiers = Vec::with_capacity(qualifiers_depth);

    let mut inner = inner;

    loop {
        match inner {
            ListType(new_inner) => {
                qualifiers.push(GraphqlTypeQualifier::List);
                inner = new_inner;
            }
            NonNullType(new_inner) => {
                qualifiers.push(GraphqlTypeQualifier::Required);
                inner = new_inner;
            }
            NamedType(name) => return FieldType { name, qualifiers }
        }
    }
}
