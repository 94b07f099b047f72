use crate::{operations::Operation, query::QueryContext, schema, CodegenError};
use graphql_parser::query;
use proc_macro2::TokenStream;
use quote::*;
use std::collections::BTreeSet;

/// Selects the first operation matching `operation_name`. Returns `None` when the query
/// document defines no operation, or when the selected operation does not match any
/// defined operation.
pub(crate) fn select_operation<'query>(
    query: &'query query::Document,
    operation_name: &str
) -> Option<Operation<'query>> {
    let operations = all_operations(query);

    operations
        .iter()
        .find(|op| op.name == operation_name)
        .map(ToOwned::to_owned)
}

pub(crate) fn all_operations(query: &query::Document) -> Vec<Operation<'_>> {
    let mut operations: Vec<Operation<'_>> = Vec::new();

    for definition in &query.definitions {
        if let query::Definition::Operation(op) = definition {
            operations.push(op.into());
        }
    }
    operations
}

/// Bind the operation's variable references to its declarations.
///
/// Every `$variable` used in an argument must be declared, and every
/// declared variable must be used somewhere in the document.
pub(crate) fn validate_variable_usage(operation: &Operation<'_>) -> Result<(), CodegenError> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    operation.selection.collect_variables(&mut used);

    let declared: BTreeSet<String> = operation
        .variables
        .iter()
        .map(|variable| variable.name.to_string())
        .collect();

    if let Some(unbound) = used.iter().find(|name| !declared.contains(*name)) {
        return Err(CodegenError::UnboundVariable(unbound.clone()));
    }
    if let Some(unused) = declared.iter().find(|name| !used.contains(*name)) {
        return Err(CodegenError::UnusedVariable(unused.clone()));
    }

    Ok(())
}

/// The main code generation function.
pub(crate) fn response_for_query(
    schema: &schema::Schema<'_>,
    query: &query::Document,
    operation: &Operation<'_>,
    options: &crate::CodegenOptions
) -> Result<TokenStream, CodegenError> {
    let mut context = QueryContext::new(
        schema,
        options.deprecation_strategy(),
        options.unknown_enum_variants()
    );

    if let Some(derives) = options.variables_derives() {
        context.ingest_variables_derives(derives)?;
    }

    if let Some(derives) = options.response_derives() {
        context.ingest_response_derives(derives)?;
    }

    for definition in &query.definitions {
        if let query::Definition::Fragment(fragment) = definition {
            return Err(CodegenError::UnimplementedError(format!(
                "fragment definition `{}`",
                fragment.name
            )));
        }
    }

    validate_variable_usage(operation)?;

    if operation.is_subscription() && operation.selection.len() > 1 {
        return Err(CodegenError::SyntaxError(
            crate::constants::MULTIPLE_SUBSCRIPTION_FIELDS_ERROR.to_string()
        ));
    }

    // Pull in the types the variables depend on before filtering the
    // required definitions below.
    for variable in &operation.variables {
        context.schema.require(variable.ty.inner_name_str());
    }

    let root_name = operation.root_name(context.schema);
    let definition = context.schema.objects.get(root_name).ok_or_else(|| {
        CodegenError::TypeError(format!("operation type `{}` not in schema", root_name))
    })?;

    let (response_data, root_index, _involved_types) =
        definition.response_for_selection(&context, &operation.selection, &operation.name, true)?;

    let enum_definitions: Vec<TokenStream> = context
        .schema
        .enums
        .values()
        .filter_map(|enm| {
            if enm.is_required.get() {
                Some(enm.to_rust(&context))
            } else {
                None
            }
        })
        .collect();

    let input_object_definitions: Vec<TokenStream> = context
        .schema
        .inputs
        .values()
        .filter_map(|input| {
            if input.is_required.get() {
                Some(input.to_rust(&context))
            } else {
                None
            }
        })
        .collect();

    let scalar_definitions: Vec<TokenStream> = context
        .schema
        .scalars
        .values()
        .filter_map(|scalar| {
            if scalar.is_required.get() {
                Some(scalar.to_rust())
            } else {
                None
            }
        })
        .collect();

    let variables_struct = operation.expand_variables(&context);
    let variable_shapes: Vec<TokenStream> = operation
        .variables
        .iter()
        .map(|variable| variable.shape_tokens(&context))
        .collect();

    let shape_defs = context.shape_defs();

    let tokens = quote! {
        use serde::{Serialize, Deserialize};

        #[allow(dead_code)]
        type Boolean = bool;
        #[allow(dead_code)]
        type Float = f64;
        #[allow(dead_code)]
        type Int = i64;
        #[allow(dead_code)]
        type ID = String;

        #(#scalar_definitions)*

        #(#input_object_definitions)*

        #(#enum_definitions)*

        pub static SHAPE: ::lodestone::codegen::Shape = ::lodestone::codegen::Shape {
            root: #root_index,
            defs: &[#(#shape_defs),*]
        };

        pub static VARIABLES: &[::lodestone::codegen::VariableShape] = &[#(#variable_shapes),*];

        #variables_struct

        #response_data
    };

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_parser::query::Definition;

    #[test]
    fn select_operation_matches_by_name() {
        let document = graphql_parser::parse_query(
            r#"
            query First { a { id } }
            query Second { b { id } }
            "#
        )
        .unwrap();

        assert_eq!(all_operations(&document).len(), 2);
        assert_eq!(select_operation(&document, "Second").unwrap().name, "Second");
        assert!(select_operation(&document, "Third").is_none());
    }

    #[test]
    fn unbound_variable_is_reported() {
        let document = graphql_parser::parse_query(
            r#"query Broken { service(id: $id) { id } }"#
        )
        .unwrap();
        let operation = match &document.definitions[0] {
            Definition::Operation(op) => Operation::from(op),
            other => panic!("unexpected definition: {:?}", other)
        };

        match validate_variable_usage(&operation) {
            Err(CodegenError::UnboundVariable(name)) => assert_eq!(name, "id"),
            other => panic!("unexpected result: {:?}", other)
        }
    }

    #[test]
    fn unused_variable_is_reported() {
        let document = graphql_parser::parse_query(
            r#"query Broken($id: ID!, $stale: Int) { service(id: $id) { id } }"#
        )
        .unwrap();
        let operation = match &document.definitions[0] {
            Definition::Operation(op) => Operation::from(op),
            other => panic!("unexpected definition: {:?}", other)
        };

        match validate_variable_usage(&operation) {
            Err(CodegenError::UnusedVariable(name)) => assert_eq!(name, "stale"),
            other => panic!("unexpected result: {:?}", other)
        }
    }

    #[test]
    fn variables_in_nested_input_values_count_as_used() {
        let document = graphql_parser::parse_query(
            r#"query Page($first: Int) { services(page: { first: $first }) { id } }"#
        )
        .unwrap();
        let operation = match &document.definitions[0] {
            Definition::Operation(op) => Operation::from(op),
            other => panic!("unexpected definition: {:?}", other)
        };

        assert!(validate_variable_usage(&operation).is_ok());
    }
}
