//! A typed GraphQL client runtime for generated operation bindings.
//!
//! # Getting started
//!
//! Write your operations in `.graphql` files and generate bindings from
//! your `build.rs` (create it if necessary):
//!
//! ```ignore
//! use lodestone_codegen::CodegenBuilder;
//!
//! fn main() {
//!     CodegenBuilder::new()
//!         .add_query("queries/add_service_link.graphql")
//!         .with_out_dir("src/queries")
//!         .build("schema.graphql")
//!         .unwrap();
//! }
//! ```
//!
//! Afterwards every operation is a zero-size marker type implementing
//! [`GraphQLOperation`]:
//!
//! ```ignore
//! use lodestone::Client;
//! use queries::add_service_link::{AddServiceLinkMutation, add_service_link_mutation::Variables};
//!
//! let client = Client::builder("http://localhost:8080/graphql").build();
//! let response = client
//!     .execute(AddServiceLinkMutation, Variables { id: "svc-1".into(), link_id: "link-1".into() })
//!     .await?;
//! ```
//!
//! # How a call runs
//!
//! Each call moves through a fixed sequence: the typed `Variables` struct
//! is serialized and validated against the declared variable shapes (a
//! missing required variable aborts before the transport is touched),
//! the bound document text is handed to the [`Transport`](transport::Transport)
//! collaborator as an opaque request, and the returned envelope is split
//! into `data`/`errors`. `data` is walked against the operation's static
//! [`Shape`](shape::Shape) — scalar codecs, enum variant sets and
//! nullability are enforced there — before being deserialized into the
//! generated response structs.
//!
//! GraphQL protocol errors are not Rust errors: they are returned on the
//! [`Response`] so callers can act on partial success. Only structural
//! failures (missing variable, shape mismatch, transport fault) surface as
//! [`QueryError`].
//!
//! Generated bindings and this runtime hold no shared mutable state; calls
//! may be issued concurrently without any ordering between them.

#[macro_use]
extern crate serde;
#[macro_use]
extern crate async_trait;

use std::{collections::HashMap, fmt, fmt::Display};

pub mod client;
pub mod codec;
mod decode;
mod error;
pub mod shape;
pub mod transport;
pub(crate) mod types;

#[cfg(feature = "http")]
pub use client::ClientBuilder;
pub use client::Client;
pub use error::{
    DecodeErrorKind, QueryError, ResponseDecodeError, ScalarDecodeError, TransportError,
    UnknownEnumVariantError
};
use serde::{de::DeserializeOwned, Serialize};
pub use types::{HeaderPair, OperationMeta, OperationType, Outcome, RequestBody};

/// Types referenced by generated code. Not meant to be written by hand.
pub mod codegen {
    pub use crate::shape::{
        FieldKind, FieldShape, InputFieldShape, Qualifier, Shape, ShapeDef, VariableKind,
        VariableShape
    };
    pub use crate::types::{OperationMeta, OperationType, RequestBody};
}

/// A generated operation binding.
///
/// Implemented by codegen on the per-operation marker struct; the
/// associated types live in the operation's generated module. Everything
/// here is immutable after generation — an implementation is a value
/// object carrying no cross-call state.
pub trait GraphQLOperation: Send + Sync + 'static {
    /// The shape of the variables declared by the operation document.
    type Variables: Serialize + Send + Sync + Clone + 'static;
    /// The typed mirror of the operation's selection set. Top-level fields
    /// are always nullable, independent of per-field nullability.
    type ResponseData: DeserializeOwned + Send + Sync + Clone + 'static;

    /// Pair the embedded document text with concrete variable values.
    fn build_request(variables: Self::Variables) -> (RequestBody<Self::Variables>, OperationMeta);

    /// The static response-shape arena for this operation.
    fn shape() -> &'static shape::Shape;

    /// The declared variables, used to validate the serialized map before
    /// the transport is invoked.
    fn variable_shapes() -> &'static [shape::VariableShape];
}

/// The decoded GraphQL envelope for one call.
///
/// A fresh instance per call; `data` and `errors` may each be absent, per
/// the GraphQL-over-HTTP convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<Data: Clone> {
    /// The absent, partial or complete response data.
    pub data: Option<Data>,
    /// The top-level errors returned by the server, verbatim.
    pub errors: Option<Vec<GraphQLError>>
}

impl<Data: Clone> Response<Data> {
    /// The terminal state this call ended in.
    pub fn outcome(&self) -> Outcome {
        let has_errors = self.errors.as_ref().map(|e| !e.is_empty()).unwrap_or(false);
        match (&self.data, has_errors) {
            (Some(_), false) => Outcome::Succeeded,
            (Some(_), true) => Outcome::PartiallyFailed,
            (None, _) => Outcome::Failed
        }
    }
}

/// An element in the top-level `errors` array of a response body.
///
/// This tries to be as close to the spec as possible.
///
/// [Spec](https://github.com/facebook/graphql/blob/master/spec/Section%207%20--%20Response.md)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQLError {
    /// The human-readable error message. This is the only required field.
    pub message: String,
    /// Which locations in the query the error applies to.
    pub locations: Option<Vec<Location>>,
    /// Which path in the query the error applies to, e.g. `["users", 0, "email"]`.
    pub path: Option<Vec<PathFragment>>,
    /// Additional error data. Its exact format is defined by the server.
    pub extensions: Option<HashMap<String, serde_json::Value>>
}

impl Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use `/` as a separator like JSON Pointer.
        let path = self
            .path
            .as_ref()
            .map(|fragments| {
                fragments
                    .iter()
                    .fold(String::new(), |mut acc, item| {
                        acc.push_str(&format!("{}/", item));
                        acc
                    })
                    .trim_end_matches('/')
                    .to_string()
            })
            .unwrap_or_else(|| "<query>".to_string());

        // Just the first location, when the server sent one.
        let loc = self
            .locations
            .as_ref()
            .and_then(|locations| locations.iter().next())
            .cloned()
            .unwrap_or_default();

        write!(f, "{}:{}:{}: {}", path, loc.line, loc.column, self.message)
    }
}

/// Part of a path in a query. It can be an object key or an array index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PathFragment {
    /// A key inside an object
    Key(String),
    /// An index inside an array
    Index(i32)
}

impl Display for PathFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathFragment::Key(ref key) => write!(f, "{}", key),
            PathFragment::Index(ref idx) => write!(f, "{}", idx)
        }
    }
}

/// A location inside a query string, used in errors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// The line number where the error originated (starting from 1).
    pub line: i32,
    /// The column number where the error originated (starting from 1).
    pub column: i32
}
