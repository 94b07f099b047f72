use crate::{operations::OperationType, CodegenError};
use heck::*;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

/// This struct contains the parameters necessary to generate code for a given operation.
pub(crate) struct GeneratedModule<'a> {
    pub operation: &'a crate::operations::Operation<'a>,
    pub query_string: &'a str,
    pub query_document: &'a graphql_parser::query::Document,
    pub schema: &'a crate::schema::Schema<'a>,
    pub options: &'a crate::CodegenOptions
}

impl<'a> GeneratedModule<'a> {
    /// Generate the items for the variables and the response that will go inside the module.
    fn build_impls(&self) -> Result<TokenStream, CodegenError> {
        crate::codegen::response_for_query(
            &self.schema,
            &self.query_document,
            &self.operation,
            &self.options
        )
    }

    /// Generate the module and all the code inside.
    pub(crate) fn to_token_stream(&self) -> Result<TokenStream, CodegenError> {
        let module_name = Ident::new(&self.operation.name.to_snake_case(), Span::call_site());
        let module_visibility = self.options.module_visibility();
        let operation_name_literal = &self.operation.name;
        let operation_name_ident = Ident::new(operation_name_literal, Span::call_site());

        // Force cargo to refresh the generated code when the query file changes.
        let query_include = self
            .options
            .query_file()
            .map(|path| {
                let path = path.to_str();
                quote!(
                    const __QUERY_WORKAROUND: &str = include_str!(#path);
                )
            })
            .unwrap_or_else(|| quote! {});

        let query_string = &self.query_string;
        let impls = self.build_impls()?;
        let operation_type = match &self.operation.operation_type {
            OperationType::Query => quote!(Query),
            OperationType::Mutation => quote!(Mutation),
            OperationType::Subscription => quote!(Subscription)
        };
        let operation_type = quote!(::lodestone::OperationType::#operation_type);

        Ok(quote!(
            #[allow(clippy::all)]
            #module_visibility struct #operation_name_ident;

            #[allow(clippy::all)]
            #module_visibility mod #module_name {
                #![allow(dead_code)]

                pub const OPERATION_NAME: &str = #operation_name_literal;
                pub const QUERY: &str = #query_string;

                #query_include

                #impls
            }

            #[allow(clippy::all)]
            impl ::lodestone::GraphQLOperation for #operation_name_ident {
                type Variables = #module_name::Variables;
                type ResponseData = #module_name::ResponseData;

                fn build_request(
                    variables: Self::Variables
                ) -> (
                    ::lodestone::RequestBody<Self::Variables>,
                    ::lodestone::OperationMeta
                ) {
                    let meta = ::lodestone::OperationMeta {
                        operation_name: #module_name::OPERATION_NAME,
                        operation_type: #operation_type
                    };

                    let body = ::lodestone::RequestBody {
                        variables,
                        query: #module_name::QUERY,
                        operation_name: #module_name::OPERATION_NAME
                    };

                    (body, meta)
                }

                fn shape() -> &'static ::lodestone::codegen::Shape {
                    &#module_name::SHAPE
                }

                fn variable_shapes() -> &'static [::lodestone::codegen::VariableShape] {
                    #module_name::VARIABLES
                }
            }
        ))
    }
}
