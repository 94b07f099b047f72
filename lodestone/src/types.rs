use serde::Serialize;

/// The kind of an operation, mirroring the GraphQL grammar.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription
}

/// Static facts about a generated operation, produced once by codegen.
#[derive(Clone, Copy, Debug)]
pub struct OperationMeta {
    pub operation_name: &'static str,
    pub operation_type: OperationType
}

/// An extra HTTP header for the default transport.
pub struct HeaderPair(pub &'static str, pub &'static str);

/// The GraphQL-over-HTTP request body: `{query, operationName, variables}`.
/// Built by generated code through
/// [`GraphQLOperation::build_request`](crate::GraphQLOperation::build_request).
#[derive(Debug, Serialize, Clone)]
pub struct RequestBody<Variables: Serialize + Send + Sync + Clone> {
    /// The values for the declared variables, as the generated `Variables`
    /// struct.
    pub variables: Variables,
    /// The operation document, embedded verbatim at generation time and
    /// never reparsed.
    pub query: &'static str,
    #[serde(rename = "operationName")]
    pub operation_name: &'static str
}

/// The terminal state of one call, derived from the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `data` came back and no errors were reported.
    Succeeded,
    /// Both `data` and `errors` came back; non-erroring branches decoded
    /// normally.
    PartiallyFailed,
    /// No usable `data`.
    Failed
}
