#![recursion_limit = "128"]
#![deny(rust_2018_idioms)]

//! Code generation for the `lodestone` client runtime.
//!
//! Turns an SDL schema plus `.graphql` operation documents into one Rust
//! module per operation: the typed `Variables` and response structs, the
//! static shape and variable declaration tables, and the
//! `GraphQLOperation` impl the runtime executes against. Meant to be
//! driven from a `build.rs` through [`CodegenBuilder`].

use lazy_static::*;
use proc_macro2::TokenStream;
use quote::*;

mod builder;
mod codegen;
mod codegen_options;
/// Deprecation-related code
pub mod deprecation;
mod query;
/// Contains the `Schema` type and its implementation.
pub mod schema;

mod constants;
mod enums;
mod field_type;
mod generated_module;
mod inputs;
mod objects;
mod operations;
mod scalars;
mod selection;
mod shared;
mod variables;

pub use crate::{
    builder::{BuildError, CodegenBuilder},
    codegen_options::CodegenOptions,
    deprecation::DeprecationStrategy
};

use std::{collections::HashMap, error::Error, fmt, io::Read};

type CacheMap<T> = std::sync::Mutex<HashMap<std::path::PathBuf, T>>;

lazy_static! {
    static ref SCHEMA_CACHE: CacheMap<String> = CacheMap::default();
    static ref QUERY_CACHE: CacheMap<(String, graphql_parser::query::Document)> =
        CacheMap::default();
}

/// An error that happened during code generation
#[derive(Debug)]
pub enum CodegenError {
    /// An IO Error
    IoError(String, std::io::Error),
    /// An error that occurred while parsing a query
    QueryParsingError(graphql_parser::query::ParseError),
    /// An error that occurred while parsing the schema
    SchemaParsingError(graphql_parser::schema::ParseError),
    /// A syntax error in the query
    SyntaxError(String),
    /// A type error in the query
    TypeError(String),
    /// A variable is referenced in the document but not declared
    UnboundVariable(String),
    /// A variable is declared but never referenced in the document
    UnusedVariable(String),
    /// An internal error, should not be returned in normal usage
    InternalError(String),
    /// An unimplemented feature
    UnimplementedError(String),
    /// Invalid inputs were passed
    InputError(String)
}
impl Error for CodegenError {}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::IoError(msg, inner) => write!(f, "io error: {}\n{}", msg, inner),
            CodegenError::QueryParsingError(inner) => write!(f, "parsing error: {}", inner),
            CodegenError::SchemaParsingError(inner) => write!(f, "parsing error: {}", inner),
            CodegenError::SyntaxError(msg) => write!(f, "syntax error: {}", msg),
            CodegenError::TypeError(msg) => write!(f, "type error: {}", msg),
            CodegenError::UnboundVariable(name) => {
                write!(f, "variable ${} is used but not declared", name)
            }
            CodegenError::UnusedVariable(name) => {
                write!(f, "variable ${} is declared but never used", name)
            }
            CodegenError::InternalError(msg) => write!(f, "internal error: {}", msg),
            CodegenError::UnimplementedError(msg) => write!(f, "unimplemented: {}", msg),
            CodegenError::InputError(msg) => write!(f, "invalid input: {}", msg)
        }
    }
}

/// Generates Rust code given a query document, a schema and options.
pub fn generate_module_token_stream(
    query_path: std::path::PathBuf,
    schema_path: &std::path::Path,
    options: CodegenOptions
) -> Result<TokenStream, CodegenError> {
    use std::collections::hash_map;

    let (query_string, query) = {
        let mut lock = QUERY_CACHE.lock().expect("query cache is poisoned");
        match lock.entry(query_path.clone()) {
            hash_map::Entry::Occupied(o) => o.get().clone(),
            hash_map::Entry::Vacant(v) => {
                let query_string = read_file(v.key())?;
                let query = graphql_parser::parse_query(&query_string)
                    .map_err(CodegenError::QueryParsingError)?;
                v.insert((query_string, query)).clone()
            }
        }
    };

    // Determine which operations we are generating code for.
    let operations = match options.operation_name() {
        Some(operation_name) => {
            let operation = codegen::select_operation(&query, operation_name)
                .ok_or_else(|| operation_not_found_error(operation_name, &query))?;
            vec![operation]
        }
        None => codegen::all_operations(&query)
    };

    if operations.is_empty() {
        return Err(CodegenError::InputError(format!(
            "no operation defined in query document {}",
            query_path.display()
        )));
    }

    let schema_extension = schema_path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("INVALID");

    // Check the schema cache.
    let schema_string: String = {
        let mut lock = SCHEMA_CACHE.lock().expect("schema cache is poisoned");
        match lock.entry(schema_path.to_path_buf()) {
            hash_map::Entry::Occupied(o) => o.get().clone(),
            hash_map::Entry::Vacant(v) => {
                let schema_string = read_file(v.key())?;
                (*v.insert(schema_string)).to_string()
            }
        }
    };

    let parsed_schema = match schema_extension {
        "graphql" | "gql" => graphql_parser::schema::parse_schema(&schema_string)
            .map_err(CodegenError::SchemaParsingError)?,
        extension => {
            return Err(CodegenError::InputError(format!(
                "unsupported extension for the GraphQL schema: {} (only .graphql and .gql are supported)",
                extension
            )))
        }
    };

    let schema = schema::Schema::from(&parsed_schema);

    // The generated modules.
    let mut modules = Vec::with_capacity(operations.len());

    for operation in &operations {
        let generated = generated_module::GeneratedModule {
            query_string: query_string.as_str(),
            schema: &schema,
            query_document: &query,
            operation,
            options: &options
        }
        .to_token_stream()?;
        modules.push(generated);
    }

    Ok(quote! { #(#modules)* })
}

fn read_file(path: &std::path::Path) -> Result<String, CodegenError> {
    use std::fs;

    let mut out = String::new();
    let mut file = fs::File::open(path).map_err(|io_err| {
        let msg = format!(
            r#"
            Could not find file with path: {}
            Hint: file paths in the CodegenBuilder calls are relative to the project root (location of the Cargo.toml). Example: .add_query("queries/my_query.graphql").
            "#,
            path.display()
        );
        CodegenError::IoError(msg, io_err)
    })?;
    file.read_to_string(&mut out)
        .map_err(|e| CodegenError::IoError("".to_string(), e))?;
    Ok(out)
}

/// Build an error when the selected operation is not found in the document.
fn operation_not_found_error(
    operation_name: &str,
    query: &graphql_parser::query::Document
) -> CodegenError {
    use graphql_parser::query::*;

    let available_operations = query
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            Definition::Operation(op) => match op {
                OperationDefinition::Mutation(m) => m.name.as_deref(),
                OperationDefinition::Query(q) => q.name.as_deref(),
                OperationDefinition::Subscription(s) => s.name.as_deref(),
                OperationDefinition::SelectionSet(_) => None
            },
            _ => None
        })
        .collect::<Vec<_>>()
        .join(", ");

    CodegenError::TypeError(format!(
        "the selected operation does not match any defined operation in the query file.\nSelected: {}\nDefined operations: {}",
        operation_name, available_operations,
    ))
}
