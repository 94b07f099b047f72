use async_trait::async_trait;
use lodestone::{
    transport::Transport, Client, DecodeErrorKind, Outcome, QueryError, TransportError
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

mod queries;

use queries::add_service_link::{add_service_link_mutation::Variables, AddServiceLinkMutation};

/// Replays a canned envelope and records what the runtime sent.
struct MockTransport {
    payload: Value,
    seen: Arc<Mutex<Option<(String, String, Value)>>>
}

impl MockTransport {
    fn new(payload: Value) -> Self {
        MockTransport {
            payload,
            seen: Arc::new(Mutex::new(None))
        }
    }

    fn seen(&self) -> Arc<Mutex<Option<(String, String, Value)>>> {
        self.seen.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(
        &self,
        query: &'static str,
        operation_name: &'static str,
        variables: Value
    ) -> Result<Value, TransportError> {
        *self.seen.lock().unwrap() = Some((query.to_owned(), operation_name.to_owned(), variables));
        Ok(self.payload.clone())
    }
}

struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn call(
        &self,
        _query: &'static str,
        _operation_name: &'static str,
        _variables: Value
    ) -> Result<Value, TransportError> {
        Err(TransportError::Status(502))
    }
}

fn variables() -> Variables {
    Variables {
        id: "svc-1".to_string(),
        link_id: "link-1".to_string()
    }
}

#[tokio::test]
async fn successful_mutation_decodes_the_selection() {
    let transport = MockTransport::new(json!({
        "data": {
            "addServiceLink": {
                "id": "svc-1",
                "name": "Uplink",
                "externalId": null,
                "customer": null,
                "terminationPoints": [],
                "links": [{"id": "link-1"}]
            }
        }
    }));
    let client = Client::with_transport(transport);

    let response = client
        .execute(AddServiceLinkMutation, variables())
        .await
        .unwrap();

    assert_eq!(response.outcome(), Outcome::Succeeded);
    assert!(response.errors.is_none());
    let service = response.data.unwrap().add_service_link.unwrap();
    assert_eq!(service.name, "Uplink");
    assert!(service.external_id.is_none());
    assert!(service.customer.is_none());
    assert!(service.termination_points.is_empty());
    assert_eq!(service.links.len(), 1);
    assert_eq!(service.links[0].id, "link-1");
}

#[tokio::test]
async fn request_carries_document_and_serialized_variables() {
    let transport = MockTransport::new(json!({"data": {"addServiceLink": null}}));
    let seen = transport.seen();
    let client = Client::with_transport(transport);

    let response = client
        .execute(AddServiceLinkMutation, variables())
        .await
        .unwrap();
    assert!(response.data.unwrap().add_service_link.is_none());

    let (query, operation_name, sent_variables) = seen.lock().unwrap().take().unwrap();
    assert!(query.starts_with("mutation AddServiceLinkMutation"));
    assert_eq!(operation_name, "AddServiceLinkMutation");
    assert_eq!(sent_variables, json!({"id": "svc-1", "linkId": "link-1"}));
}

#[tokio::test]
async fn errors_only_envelope_yields_failed_outcome() {
    let transport = MockTransport::new(json!({
        "errors": [{"message": "not found"}]
    }));
    let client = Client::with_transport(transport);

    let response = client
        .execute(AddServiceLinkMutation, variables())
        .await
        .unwrap();

    assert_eq!(response.outcome(), Outcome::Failed);
    assert!(response.data.is_none());
    let errors = response.errors.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "not found");
}

#[tokio::test]
async fn partial_failure_exposes_data_and_errors() {
    // The error on `name` bubbled up to the nearest nullable field.
    let transport = MockTransport::new(json!({
        "data": {"addServiceLink": null},
        "errors": [{"message": "name resolver crashed", "path": ["addServiceLink", "name"]}]
    }));
    let client = Client::with_transport(transport);

    let response = client
        .execute(AddServiceLinkMutation, variables())
        .await
        .unwrap();

    assert_eq!(response.outcome(), Outcome::PartiallyFailed);
    assert!(response.data.unwrap().add_service_link.is_none());
    assert_eq!(response.errors.unwrap()[0].message, "name resolver crashed");
}

#[tokio::test]
async fn mistyped_field_aborts_the_decode_with_a_path() {
    let transport = MockTransport::new(json!({
        "data": {
            "addServiceLink": {
                "id": "svc-1",
                "name": 7,
                "externalId": null,
                "customer": null,
                "terminationPoints": [],
                "links": []
            }
        }
    }));
    let client = Client::with_transport(transport);

    let err = client
        .execute(AddServiceLinkMutation, variables())
        .await
        .unwrap_err();

    match err {
        QueryError::Decode(e) => {
            assert_eq!(e.path, "addServiceLink.name");
            assert!(matches!(e.cause, DecodeErrorKind::Scalar(_)));
        }
        other => panic!("unexpected error: {:?}", other)
    }
}

#[tokio::test]
async fn empty_envelope_is_a_transport_fault() {
    let transport = MockTransport::new(json!({}));
    let client = Client::with_transport(transport);

    let err = client
        .execute(AddServiceLinkMutation, variables())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        QueryError::Transport(TransportError::InvalidEnvelope)
    ));
}

#[tokio::test]
async fn transport_errors_propagate_unchanged() {
    let client = Client::with_transport(FailingTransport);

    let err = client
        .execute(AddServiceLinkMutation, variables())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        QueryError::Transport(TransportError::Status(502))
    ));
}
