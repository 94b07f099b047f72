use crate::{
    codec::ScalarCodecRegistry,
    decode::decode_data,
    error::{QueryError, ScalarDecodeError, TransportError},
    shape::{Qualifier, VariableKind, VariableShape},
    transport::Transport,
    types::OperationMeta,
    GraphQLOperation, GraphQLError, Response
};
use serde_json::Value;
use std::sync::Arc;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;
#[cfg(feature = "http")]
use crate::types::HeaderPair;

/// The typed client runtime.
///
/// A client is a pairing of a transport collaborator with a scalar codec
/// registry. It holds no per-call state: every [`execute`](Client::execute)
/// is an independent request/response exchange, and concurrent calls need
/// no locking because both members are read-only after construction.
pub struct Client<T: Transport> {
    transport: T,
    registry: Arc<ScalarCodecRegistry>
}

#[cfg(feature = "http")]
impl Client<HttpTransport> {
    /// A builder for a client backed by the default HTTP transport.
    pub fn builder<U: Into<String>>(url: U) -> ClientBuilder {
        ClientBuilder::new(url)
    }
}

impl<T: Transport> Client<T> {
    /// A client over a custom transport, with the built-in codecs.
    pub fn with_transport(transport: T) -> Self {
        Client {
            transport,
            registry: Arc::new(ScalarCodecRegistry::new())
        }
    }

    pub fn with_registry(transport: T, registry: ScalarCodecRegistry) -> Self {
        Client {
            transport,
            registry: Arc::new(registry)
        }
    }

    /// Run one operation call through its full lifecycle: serialize and
    /// validate variables, invoke the transport, split the envelope and
    /// decode `data` against the generated shape.
    ///
    /// GraphQL protocol errors come back as values on the [`Response`];
    /// structural failures (missing variable, decode mismatch, transport
    /// fault) abort the call with a [`QueryError`].
    pub async fn execute<Q: GraphQLOperation>(
        &self,
        _operation: Q,
        variables: Q::Variables
    ) -> Result<Response<Q::ResponseData>, QueryError> {
        let (body, meta) = Q::build_request(variables);

        let variables = serialize_variables(&self.registry, &body.variables, Q::variable_shapes())?;
        tracing::debug!(
            operation = meta.operation_name,
            "variables serialized, invoking transport"
        );

        let payload = self
            .transport
            .call(body.query, meta.operation_name, variables)
            .await?;

        decode_response::<Q>(&self.registry, &meta, payload)
    }
}

/// Serialize the typed variables to a JSON map and check it against the
/// declared variable shapes. A missing or null required variable fails
/// before any network activity; scalar values are encoded through the
/// registry, recursively for list and input object variable types.
fn serialize_variables<V: serde::Serialize>(
    registry: &ScalarCodecRegistry,
    variables: &V,
    shapes: &[VariableShape]
) -> Result<Value, QueryError> {
    let serialized = serde_json::to_value(variables).map_err(QueryError::SerializeVariables)?;
    // An operation without declared variables generates a unit struct,
    // which serializes to null.
    let mut map = match serialized {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        _ => {
            return Err(QueryError::SerializeVariables(serde::ser::Error::custom(
                "variables did not serialize to a map"
            )))
        }
    };

    for shape in shapes {
        let value = match map.get_mut(shape.name) {
            None | Some(Value::Null) => {
                if shape.is_required() {
                    return Err(QueryError::MissingVariable {
                        name: shape.name.to_owned()
                    });
                }
                continue;
            }
            Some(value) => value
        };
        encode_variable_value(registry, &shape.kind, shape.qualifiers, value).map_err(|cause| {
            QueryError::InvalidVariable {
                name: shape.name.to_owned(),
                cause
            }
        })?;
    }

    Ok(Value::Object(map))
}

fn kind_label(kind: &VariableKind) -> &'static str {
    match kind {
        VariableKind::Scalar(name) => name,
        VariableKind::Opaque => "opaque value",
        VariableKind::Object(_) => "input object"
    }
}

fn encode_variable_value(
    registry: &ScalarCodecRegistry,
    kind: &VariableKind,
    qualifiers: &[Qualifier],
    value: &mut Value
) -> Result<(), ScalarDecodeError> {
    let rest = match qualifiers.first() {
        Some(Qualifier::Required) => &qualifiers[1..],
        _ => qualifiers
    };
    if value.is_null() {
        return Ok(());
    }
    match rest.first() {
        Some(Qualifier::List) => {
            let items = match value {
                Value::Array(items) => items,
                other => {
                    return Err(ScalarDecodeError {
                        scalar_name: kind_label(kind).to_owned(),
                        raw_value: other.clone()
                    })
                }
            };
            for item in items {
                encode_variable_value(registry, kind, &rest[1..], item)?;
            }
            Ok(())
        }
        Some(Qualifier::Required) => encode_variable_value(registry, kind, rest, value),
        None => match kind {
            VariableKind::Scalar(scalar) => {
                *value = registry.encode(scalar, value)?;
                Ok(())
            }
            VariableKind::Opaque => Ok(()),
            VariableKind::Object(fields) => {
                let map = match value {
                    Value::Object(map) => map,
                    other => {
                        return Err(ScalarDecodeError {
                            scalar_name: kind_label(kind).to_owned(),
                            raw_value: other.clone()
                        })
                    }
                };
                for field in *fields {
                    if let Some(field_value) = map.get_mut(field.name) {
                        encode_variable_value(
                            registry,
                            &field.kind,
                            field.qualifiers,
                            field_value
                        )?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Split the GraphQL envelope and decode `data` against the operation's
/// shape. Either, both or neither of `data`/`errors` may be present; a
/// payload with neither is a transport-level fault, not a protocol result.
fn decode_response<Q: GraphQLOperation>(
    registry: &ScalarCodecRegistry,
    meta: &OperationMeta,
    payload: Value
) -> Result<Response<Q::ResponseData>, QueryError> {
    let mut envelope = match payload {
        Value::Object(map) => map,
        _ => return Err(TransportError::InvalidEnvelope.into())
    };

    let errors: Option<Vec<GraphQLError>> = match envelope.remove("errors") {
        Some(Value::Null) | None => None,
        Some(raw) => Some(
            serde_json::from_value(raw).map_err(|_| TransportError::InvalidEnvelope)?
        )
    };

    let data = match envelope.remove("data") {
        Some(Value::Null) | None => None,
        Some(data) => Some(data)
    };

    if data.is_none() && errors.is_none() {
        return Err(TransportError::InvalidEnvelope.into());
    }

    let has_errors = errors.as_ref().map(|e| !e.is_empty()).unwrap_or(false);

    let data = match data {
        Some(mut data) => {
            // Fields on an error path are left absent per GraphQL
            // semantics, so the walk is lenient about nulls when the
            // envelope carries errors.
            decode_data(Q::shape(), registry, &mut data, has_errors)?;
            let typed = serde_json::from_value(data).map_err(|e| {
                QueryError::Decode(crate::error::ResponseDecodeError {
                    path: "data".to_owned(),
                    cause: e.into()
                })
            })?;
            Some(typed)
        }
        None => None
    };

    tracing::trace!(
        operation = meta.operation_name,
        has_data = data.is_some(),
        has_errors,
        "response decoded"
    );

    Ok(Response { data, errors })
}

/// Configures a [`Client`] over the default HTTP transport.
#[cfg(feature = "http")]
pub struct ClientBuilder {
    url: String,
    extra_headers: Vec<HeaderPair>,
    registry: ScalarCodecRegistry
}

#[cfg(feature = "http")]
impl ClientBuilder {
    pub fn new<U: Into<String>>(url: U) -> Self {
        ClientBuilder {
            url: url.into(),
            extra_headers: Vec::new(),
            registry: ScalarCodecRegistry::new()
        }
    }

    pub fn with_extra_header(mut self, header: HeaderPair) -> Self {
        self.extra_headers.push(header);
        self
    }

    /// Register a custom scalar codec on top of the built-ins.
    pub fn with_scalar_codec<E, D>(mut self, name: &str, encode: E, decode: D) -> Self
    where
        E: Fn(&Value) -> Result<Value, ScalarDecodeError> + Send + Sync + 'static,
        D: Fn(&Value) -> Result<Value, ScalarDecodeError> + Send + Sync + 'static
    {
        self.registry.register(name, encode, decode);
        self
    }

    pub fn build(self) -> Client<HttpTransport> {
        let mut transport = HttpTransport::new(self.url);
        for header in self.extra_headers {
            transport = transport.with_header(header);
        }
        Client::with_registry(transport, self.registry)
    }
}
