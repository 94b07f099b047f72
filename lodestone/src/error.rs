use serde_json::Value;
use thiserror::Error;

/// A scalar value on the wire did not conform to its registered codec.
#[derive(Debug, Clone, Error)]
#[error("invalid value for scalar `{scalar_name}`: {raw_value}")]
pub struct ScalarDecodeError {
    pub scalar_name: String,
    pub raw_value: Value
}

/// The payload contained an enum value outside the declared variant set.
#[derive(Debug, Clone, Error)]
#[error("unknown variant `{value}` for enum `{enum_name}`")]
pub struct UnknownEnumVariantError {
    pub enum_name: String,
    pub value: String
}

/// Why a single field failed to decode. See [`ResponseDecodeError`].
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    #[error(transparent)]
    Scalar(#[from] ScalarDecodeError),
    #[error(transparent)]
    Enum(#[from] UnknownEnumVariantError),
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str
    },
    #[error("missing value for non-nullable field")]
    MissingField,
    #[error("error deserializing response data: {0}")]
    Json(#[from] serde_json::Error)
}

/// A response payload failed to decode against the generated shape.
///
/// The whole decode is aborted on the first mismatch; partial structural
/// success is never exposed as a value.
#[derive(Debug, Error)]
#[error("error decoding response at `{path}`: {cause}")]
pub struct ResponseDecodeError {
    /// Dotted field path into `data`, e.g. `addServiceLink.links[0].id`.
    pub path: String,
    #[source]
    pub cause: DecodeErrorKind
}

/// A failure at the transport layer, distinct from a GraphQL-level failure.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("server returned error status: {0}")]
    Status(u16),
    #[error("could not read response payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    #[error("response body is not a GraphQL envelope")]
    InvalidEnvelope,
    #[error("request was cancelled")]
    Cancelled
}

/// Everything that can abort a single operation call.
///
/// GraphQL protocol errors are not represented here: they come back as
/// values in [`Response::errors`](crate::Response) so the caller can decide
/// how to treat partial success.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A declared non-null variable was absent or null. Raised before any
    /// network activity.
    #[error("missing value for required variable `${name}`")]
    MissingVariable { name: String },
    /// The `Variables` struct could not be serialized to a JSON map.
    #[error("error serializing variables: {0}")]
    SerializeVariables(#[source] serde_json::Error),
    /// A declared variable value did not conform to its scalar codec.
    #[error("invalid value for variable `${name}`: {cause}")]
    InvalidVariable {
        name: String,
        #[source]
        cause: ScalarDecodeError
    },
    #[error(transparent)]
    Decode(#[from] ResponseDecodeError),
    #[error(transparent)]
    Transport(#[from] TransportError)
}
