use crate::deprecation::DeprecationStrategy;
use proc_macro2::TokenStream;
use quote::quote;
use std::path::{Path, PathBuf};

/// Used to configure code generation.
#[derive(Debug, Default)]
pub struct CodegenOptions {
    /// Name of the operation to generate for, when the document defines
    /// more than one. All operations are generated when unset.
    operation_name: Option<String>,
    /// Comma-separated list of additional traits we want to derive for variables.
    variables_derives: Option<String>,
    /// Comma-separated list of additional traits we want to derive for responses.
    response_derives: Option<String>,
    /// The deprecation strategy to adopt.
    deprecation_strategy: Option<DeprecationStrategy>,
    /// Generate an `Unknown(String)` catch-all variant on response enums.
    unknown_enum_variants: bool,
    /// The module visibility.
    module_visibility: Option<syn::Visibility>,
    /// The path to the query file, so the generated module can embed an
    /// `include_str!` that makes cargo re-run the build on change.
    query_file: Option<PathBuf>
}

impl CodegenOptions {
    pub fn new() -> CodegenOptions {
        CodegenOptions::default()
    }

    pub fn set_operation_name(&mut self, operation_name: String) {
        self.operation_name = Some(operation_name);
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    pub fn set_variables_derives(&mut self, variables_derives: String) {
        self.variables_derives = Some(variables_derives);
    }

    pub fn variables_derives(&self) -> Option<&str> {
        self.variables_derives.as_deref()
    }

    pub fn set_response_derives(&mut self, response_derives: String) {
        self.response_derives = Some(response_derives);
    }

    pub fn response_derives(&self) -> Option<&str> {
        self.response_derives.as_deref()
    }

    pub fn set_deprecation_strategy(&mut self, deprecation_strategy: DeprecationStrategy) {
        self.deprecation_strategy = Some(deprecation_strategy);
    }

    pub fn deprecation_strategy(&self) -> DeprecationStrategy {
        self.deprecation_strategy.clone().unwrap_or_default()
    }

    pub fn set_unknown_enum_variants(&mut self, unknown_enum_variants: bool) {
        self.unknown_enum_variants = unknown_enum_variants;
    }

    pub fn unknown_enum_variants(&self) -> bool {
        self.unknown_enum_variants
    }

    pub fn set_module_visibility(&mut self, visibility: syn::Visibility) {
        self.module_visibility = Some(visibility);
    }

    pub(crate) fn module_visibility(&self) -> TokenStream {
        match &self.module_visibility {
            Some(visibility) => quote!(#visibility),
            None => quote!(pub)
        }
    }

    pub fn set_query_file(&mut self, path: PathBuf) {
        self.query_file = Some(path);
    }

    pub(crate) fn query_file(&self) -> Option<&Path> {
        self.query_file.as_deref()
    }
}
