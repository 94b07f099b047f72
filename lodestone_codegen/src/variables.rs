use crate::{field_type::FieldType, query::QueryContext, shared::keyword_replace};
use graphql_parser::query;
use heck::SnakeCase;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::collections::BTreeMap;

/// A variable declared by an operation document.
#[derive(Debug, Clone)]
pub struct Variable<'query> {
    pub name: &'query str,
    pub ty: FieldType<'query>,
    pub default: Option<&'query query::Value>
}

impl<'query> Variable<'query> {
    /// A `default_<name>()` constructor when the declaration carries a
    /// default value.
    pub(crate) fn generate_default_value_constructor(
        &self,
        context: &QueryContext<'_>
    ) -> TokenStream {
        match self.default {
            Some(default) => {
                let fn_name = Ident::new(
                    &format!("default_{}", self.name.to_snake_case()),
                    Span::call_site()
                );
                let ty = self.ty.to_rust(context, "");
                let value = graphql_parser_value_to_literal(
                    default,
                    context,
                    &self.ty,
                    self.ty.is_optional()
                );
                quote! {
                    pub fn #fn_name() -> #ty {
                        #value
                    }
                }
            }
            None => quote!()
        }
    }

    /// The entry for this variable in the generated declaration table.
    pub(crate) fn shape_tokens(&self, context: &QueryContext<'_>) -> TokenStream {
        let name = self.name;
        let qualifiers = self.ty.qualifier_tokens();
        let kind = variable_kind_tokens(context, self.ty.inner_name_str(), &mut Vec::new());

        quote! {
            ::lodestone::codegen::VariableShape {
                name: #name,
                qualifiers: #qualifiers,
                kind: #kind
            }
        }
    }
}

impl<'query> std::convert::From<&'query query::VariableDefinition> for Variable<'query> {
    fn from(def: &'query query::VariableDefinition) -> Variable<'query> {
        Variable {
            name: &def.name,
            ty: FieldType::from(&def.var_type),
            default: def.default_value.as_ref()
        }
    }
}

/// Scalar leaves carry their codec name so nested values are routed
/// through the registry; input objects describe their fields and enums
/// pass through as serialized. A recursive input falls back to
/// pass-through at the point of the cycle.
fn variable_kind_tokens(
    context: &QueryContext<'_>,
    type_name: &str,
    seen: &mut Vec<String>
) -> TokenStream {
    if context.is_scalar(type_name) {
        quote!(::lodestone::codegen::VariableKind::Scalar(#type_name))
    } else if let Some(input) = context.schema.inputs.get(type_name) {
        if seen.iter().any(|name| name == type_name) {
            return quote!(::lodestone::codegen::VariableKind::Opaque);
        }
        seen.push(type_name.to_string());
        let fields: Vec<TokenStream> = input
            .fields
            .iter()
            .map(|field| {
                let field_name = field.name;
                let qualifiers = field.type_.qualifier_tokens();
                let kind = variable_kind_tokens(context, field.type_.inner_name_str(), seen);
                quote! {
                    ::lodestone::codegen::InputFieldShape {
                        name: #field_name,
                        qualifiers: #qualifiers,
                        kind: #kind
                    }
                }
            })
            .collect();
        seen.pop();
        quote!(::lodestone::codegen::VariableKind::Object(&[#(#fields),*]))
    } else {
        quote!(::lodestone::codegen::VariableKind::Opaque)
    }
}

fn graphql_parser_value_to_literal(
    value: &query::Value,
    context: &QueryContext<'_>,
    ty: &FieldType<'_>,
    is_optional: bool
) -> TokenStream {
    use query::Value;

    let inner = match value {
        Value::Boolean(b) => {
            if *b {
                quote!(true)
            } else {
                quote!(false)
            }
        }
        Value::String(s) => quote!(#s.to_string()),
        Value::Variable(_) => panic!("variable in a default value"),
        Value::Int(i) => {
            let i = i.as_i64().unwrap(); //This is always Some
            quote!(#i)
        }
        Value::Float(f) => quote!(#f),
        Value::Enum(variant) => {
            let ty_ident = Ident::new(ty.inner_name_str(), Span::call_site());
            let variant = Ident::new(&keyword_replace(variant), Span::call_site());
            quote!(#ty_ident::#variant)
        }
        Value::List(elements) => {
            let elements = elements
                .iter()
                .map(|element| graphql_parser_value_to_literal(element, context, ty, false));
            quote! {
                vec![#(#elements),*]
            }
        }
        Value::Object(object) => render_object_literal(object, context, ty.inner_name_str()),
        Value::Null => return quote!(None)
    };

    if is_optional {
        quote!(Some(#inner))
    } else {
        inner
    }
}

fn render_object_literal(
    object: &BTreeMap<String, query::Value>,
    context: &QueryContext<'_>,
    type_name: &str
) -> TokenStream {
    let type_ident = Ident::new(type_name, Span::call_site());
    let input = context
        .schema
        .inputs
        .get(type_name)
        .unwrap_or_else(|| panic!("unknown input object in default value: {}", type_name));
    let fields = input.fields.iter().map(|field| {
        let field_ident = Ident::new(
            &keyword_replace(&field.name.to_snake_case()),
            Span::call_site()
        );
        let value = match object.get(field.name) {
            Some(value) => graphql_parser_value_to_literal(
                value,
                context,
                &field.type_,
                field.type_.is_optional()
            ),
            None if field.type_.is_optional() => quote!(None),
            None => panic!(
                "required input field `{}.{}` has no default",
                type_name, field.name
            )
        };
        quote!(#field_ident: #value)
    });

    quote! {
        #type_ident {
            #(#fields),*
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use graphql_parser::query::{Definition, OperationDefinition};

    #[test]
    fn default_value_constructors_are_generated() {
        let document = graphql_parser::parse_query(
            r#"query Services($first: Int = 25, $after: String) { services { id } }"#
        )
        .unwrap();
        let variables: Vec<Variable<'_>> = match &document.definitions[0] {
            Definition::Operation(OperationDefinition::Query(q)) => {
                q.variable_definitions.iter().map(Into::into).collect()
            }
            other => panic!("unexpected definition: {:?}", other)
        };
        let schema = Schema::new();
        let context = QueryContext::new_empty(&schema);

        let with_default = variables[0]
            .generate_default_value_constructor(&context)
            .to_string();
        let without_default = variables[1]
            .generate_default_value_constructor(&context)
            .to_string();

        assert!(with_default.contains("pub fn default_first"));
        assert!(with_default.contains("Some (25i64)"));
        assert!(without_default.is_empty());
    }

    #[test]
    fn scalar_variables_carry_their_codec_name() {
        let document = graphql_parser::parse_query(
            r#"mutation Link($id: ID!, $ids: [ID!]!) { link(id: $id, ids: $ids) { id } }"#
        )
        .unwrap();
        let variables: Vec<Variable<'_>> = match &document.definitions[0] {
            Definition::Operation(OperationDefinition::Mutation(m)) => {
                m.variable_definitions.iter().map(Into::into).collect()
            }
            other => panic!("unexpected definition: {:?}", other)
        };
        let schema = Schema::new();
        let context = QueryContext::new_empty(&schema);

        let shape = variables[1].shape_tokens(&context).to_string();
        assert!(shape.contains(r#"name : "ids""#));
        assert!(shape.contains(r#"VariableKind :: Scalar ("ID")"#));
        assert!(shape.contains("Qualifier :: Required"));
        assert!(shape.contains("Qualifier :: List"));
    }

    #[test]
    fn input_object_variables_describe_their_fields() {
        let ast = graphql_parser::parse_schema(
            r#"
            scalar DateTime

            input ServiceUpdateData {
                name: String
                installDate: DateTime
            }
            "#
        )
        .unwrap();
        let schema = Schema::from(&ast);
        let context = QueryContext::new_empty(&schema);

        let document = graphql_parser::parse_query(
            r#"mutation Update($data: ServiceUpdateData!) { update(data: $data) { id } }"#
        )
        .unwrap();
        let variables: Vec<Variable<'_>> = match &document.definitions[0] {
            Definition::Operation(OperationDefinition::Mutation(m)) => {
                m.variable_definitions.iter().map(Into::into).collect()
            }
            other => panic!("unexpected definition: {:?}", other)
        };

        let shape = variables[0].shape_tokens(&context).to_string();
        assert!(shape.contains("VariableKind :: Object"));
        assert!(shape.contains(r#"name : "installDate""#));
        assert!(shape.contains(r#"VariableKind :: Scalar ("DateTime")"#));
    }
}
