use crate::deprecation::{DeprecationStatus, DeprecationStrategy};
use graphql_parser::schema::Value;
use heck::SnakeCase;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::collections::{BTreeMap, BTreeSet};

// List of keywords based on https://doc.rust-lang.org/grammar.html#keywords
const RUST_KEYWORDS: &[&str] = &[
    "abstract",
    "alignof",
    "as",
    "async",
    "await",
    "become",
    "box",
    "break",
    "const",
    "continue",
    "crate",
    "do",
    "else",
    "enum",
    "extern crate",
    "extern",
    "false",
    "final",
    "fn",
    "for",
    "for",
    "if let",
    "if",
    "if",
    "impl",
    "impl",
    "in",
    "let",
    "loop",
    "macro",
    "match",
    "mod",
    "move",
    "mut",
    "offsetof",
    "override",
    "priv",
    "proc",
    "pub",
    "pure",
    "ref",
    "return",
    "self",
    "sizeof",
    "static",
    "struct",
    "super",
    "trait",
    "true",
    "type",
    "typeof",
    "unsafe",
    "unsized",
    "use",
    "use",
    "virtual",
    "where",
    "while",
    "yield"
];

pub(crate) fn keyword_replace(needle: &str) -> String {
    match RUST_KEYWORDS.binary_search(&needle) {
        Ok(index) => [RUST_KEYWORDS[index], "_"].concat(),
        Err(_) => needle.to_owned()
    }
}

pub(crate) fn render_object_field(
    field_name: &str,
    field_type: &TokenStream,
    description: Option<&str>,
    status: &DeprecationStatus,
    strategy: &DeprecationStrategy
) -> Option<TokenStream> {
    #[allow(unused_assignments)]
    let mut deprecation = quote!();
    match (status, strategy) {
        // If the field is deprecated and we are denying usage, don't generate the
        // field in rust at all and short-circuit.
        (DeprecationStatus::Deprecated(_), DeprecationStrategy::Deny) => return None,
        // Everything is allowed so there is nothing to do.
        (_, DeprecationStrategy::Allow) => deprecation = quote!(),
        // Current so there is nothing to do.
        (DeprecationStatus::Current, _) => deprecation = quote!(),
        // A reason was provided, translate it to a note.
        (DeprecationStatus::Deprecated(Some(reason)), DeprecationStrategy::Warn) => {
            deprecation = quote!(#[deprecated(note = #reason)])
        }
        // No reason provided, just mark as deprecated.
        (DeprecationStatus::Deprecated(None), DeprecationStrategy::Warn) => {
            deprecation = quote!(#[deprecated])
        }
    };

    let description = description.map(|s| quote!(#[doc = #s]));
    let rust_safe_field_name = keyword_replace(&field_name.to_snake_case());
    let name_ident = Ident::new(&rust_safe_field_name, Span::call_site());
    let rename = field_rename_annotation(&field_name, &rust_safe_field_name);

    Some(quote!(#description #deprecation #rename pub #name_ident: #field_type))
}

/// An argument value in an operation document, with variable references
/// kept explicit so they can be checked against the declarations.
#[derive(PartialEq, Debug, Clone)]
pub enum ArgumentValue {
    Variable(String),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<ArgumentValue>),
    Object(BTreeMap<String, ArgumentValue>)
}

impl ArgumentValue {
    pub(crate) fn collect_variables(&self, variables: &mut BTreeSet<String>) {
        match self {
            ArgumentValue::Variable(name) => {
                variables.insert(name.clone());
            }
            ArgumentValue::List(list) => {
                for entry in list {
                    entry.collect_variables(variables);
                }
            }
            ArgumentValue::Object(map) => {
                for value in map.values() {
                    value.collect_variables(variables);
                }
            }
            ArgumentValue::Int(_)
            | ArgumentValue::Float(_)
            | ArgumentValue::String(_)
            | ArgumentValue::Boolean(_)
            | ArgumentValue::Null
            | ArgumentValue::Enum(_) => ()
        }
    }
}

impl From<Value> for ArgumentValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Variable(x) => ArgumentValue::Variable(x),
            Value::Int(x) => ArgumentValue::Int(x.as_i64().unwrap()), //This is always Some
            Value::Float(x) => ArgumentValue::Float(x),
            Value::String(x) => ArgumentValue::String(x),
            Value::Boolean(x) => ArgumentValue::Boolean(x),
            Value::Null => ArgumentValue::Null,
            Value::Enum(x) => ArgumentValue::Enum(x),
            Value::List(list) => ArgumentValue::List(list.into_iter().map(Into::into).collect()),
            Value::Object(object) => {
                let map = object
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect();
                ArgumentValue::Object(map)
            }
        }
    }
}

/// Given the GraphQL schema name for an object/interface/input object field and
/// the equivalent rust name, produces a serde annotation to map them during
/// (de)serialization if it is necessary, otherwise an empty TokenStream.
pub(crate) fn field_rename_annotation(graphql_name: &str, rust_name: &str) -> Option<TokenStream> {
    if graphql_name != rust_name {
        Some(quote!(#[serde(rename = #graphql_name)]))
    } else {
        None
    }
}

mod tests {
    #[test]
    fn keyword_replace() {
        use super::keyword_replace;
        assert_eq!("fora", keyword_replace("fora"));
        assert_eq!("in_", keyword_replace("in"));
        assert_eq!("fn_", keyword_replace("fn"));
        assert_eq!("struct_", keyword_replace("struct"));
    }

    #[test]
    fn variables_are_collected_from_nested_values() {
        use super::ArgumentValue;
        use std::collections::{BTreeMap, BTreeSet};

        let mut object = BTreeMap::new();
        object.insert("after".to_string(), ArgumentValue::Variable("cursor".to_string()));
        object.insert("limit".to_string(), ArgumentValue::Int(10));
        let value = ArgumentValue::List(vec![
            ArgumentValue::Object(object),
            ArgumentValue::Variable("filter".to_string()),
            ArgumentValue::Null,
        ]);

        let mut variables = BTreeSet::new();
        value.collect_variables(&mut variables);

        let variables: Vec<_> = variables.into_iter().collect();
        assert_eq!(variables, vec!["cursor".to_string(), "filter".to_string()]);
    }
}
