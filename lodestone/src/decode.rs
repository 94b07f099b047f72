//! Shape-driven response decoding.
//!
//! The raw `data` payload is walked against the operation's static
//! [`Shape`] before it is deserialized into the typed response structs.
//! The walk validates nullability, list nesting, enum variant membership
//! and scalar conformance (through the codec registry), normalizing scalar
//! values in place. The first mismatch aborts the whole decode with the
//! offending field path.

use crate::{
    codec::ScalarCodecRegistry,
    error::{DecodeErrorKind, ResponseDecodeError, UnknownEnumVariantError},
    shape::{FieldKind, FieldShape, Qualifier, Shape}
};
use serde_json::Value;
use std::fmt::Write;

enum PathSegment {
    Field(&'static str),
    Index(usize)
}

fn render_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::Field(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            PathSegment::Index(idx) => {
                let _ = write!(out, "[{}]", idx);
            }
        }
    }
    out
}

struct Decoder<'a> {
    shape: &'a Shape,
    registry: &'a ScalarCodecRegistry,
    /// Set when the envelope also carried GraphQL errors. Null-bubbling on
    /// the error path then satisfies non-null annotations.
    lenient: bool,
    path: Vec<PathSegment>
}

/// Walk `data` against `shape`, normalizing scalars through `registry`.
///
/// `lenient` decoding admits nulls on non-null positions, per GraphQL
/// semantics for fields on an error path.
pub fn decode_data(
    shape: &Shape,
    registry: &ScalarCodecRegistry,
    data: &mut Value,
    lenient: bool
) -> Result<(), ResponseDecodeError> {
    let mut decoder = Decoder {
        shape,
        registry,
        lenient,
        path: Vec::new()
    };
    decoder.walk_def(shape.root, data)
}

impl<'a> Decoder<'a> {
    fn fail(&self, cause: DecodeErrorKind) -> ResponseDecodeError {
        ResponseDecodeError {
            path: render_path(&self.path),
            cause
        }
    }

    fn unexpected(&self, expected: &'static str, found: &Value) -> ResponseDecodeError {
        self.fail(DecodeErrorKind::UnexpectedShape {
            expected,
            found: json_kind(found)
        })
    }

    fn walk_def(&mut self, def_index: usize, value: &mut Value) -> Result<(), ResponseDecodeError> {
        let def = &self.shape.defs[def_index];
        let map = match value {
            Value::Object(map) => map,
            other => return Err(self.unexpected("object", other))
        };
        for field in def.fields {
            self.path.push(PathSegment::Field(field.name));
            match map.get_mut(field.name) {
                Some(field_value) => self.walk_value(field.qualifiers, field, field_value)?,
                None if field.qualifiers.first() == Some(&Qualifier::Required) && !self.lenient => {
                    return Err(self.fail(DecodeErrorKind::MissingField));
                }
                // Optional fields default to absent, which is not an error.
                None => {}
            }
            self.path.pop();
        }
        Ok(())
    }

    fn walk_value(
        &mut self,
        qualifiers: &'static [Qualifier],
        field: &FieldShape,
        value: &mut Value
    ) -> Result<(), ResponseDecodeError> {
        let (required, rest) = match qualifiers.split_first() {
            Some((Qualifier::Required, rest)) => (true, rest),
            _ => (false, qualifiers)
        };

        if value.is_null() {
            if required && !self.lenient {
                return Err(self.fail(DecodeErrorKind::MissingField));
            }
            return Ok(());
        }

        match rest.split_first() {
            Some((Qualifier::List, inner)) => {
                let items = match value {
                    Value::Array(items) => items,
                    other => return Err(self.unexpected("list", other))
                };
                for (idx, item) in items.iter_mut().enumerate() {
                    self.path.push(PathSegment::Index(idx));
                    self.walk_value(inner, field, item)?;
                    self.path.pop();
                }
                Ok(())
            }
            // A double non-null annotation never comes out of the
            // generator, treat it as already unwrapped.
            Some((Qualifier::Required, _)) => self.walk_value(rest, field, value),
            None => self.decode_leaf(field, value)
        }
    }

    fn decode_leaf(
        &mut self,
        field: &FieldShape,
        value: &mut Value
    ) -> Result<(), ResponseDecodeError> {
        match field.kind {
            FieldKind::Scalar(scalar_name) => {
                let decoded = self
                    .registry
                    .decode(scalar_name, value)
                    .map_err(|e| self.fail(e.into()))?;
                *value = decoded;
                Ok(())
            }
            FieldKind::Enum {
                name,
                variants,
                catch_all
            } => {
                let raw = match value {
                    Value::String(raw) => raw,
                    other => return Err(self.unexpected("enum value", other))
                };
                if !catch_all && !variants.contains(&raw.as_str()) {
                    let err = UnknownEnumVariantError {
                        enum_name: name.to_owned(),
                        value: raw.clone()
                    };
                    return Err(self.fail(err.into()));
                }
                Ok(())
            }
            FieldKind::Object(def_index) => self.walk_def(def_index, value)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{FieldKind, FieldShape, Qualifier, Shape, ShapeDef};
    use serde_json::json;

    // query GetDevice { device { id status tags lastSeen ports { label } } }
    static DEVICE_SHAPE: Shape = Shape {
        root: 2,
        defs: &[
            ShapeDef {
                name: "GetDeviceDevicePorts",
                fields: &[FieldShape {
                    name: "label",
                    qualifiers: &[Qualifier::Required],
                    kind: FieldKind::Scalar("String")
                }]
            },
            ShapeDef {
                name: "GetDeviceDevice",
                fields: &[
                    FieldShape {
                        name: "id",
                        qualifiers: &[Qualifier::Required],
                        kind: FieldKind::Scalar("ID")
                    },
                    FieldShape {
                        name: "status",
                        qualifiers: &[Qualifier::Required],
                        kind: FieldKind::Enum {
                            name: "DeviceStatus",
                            variants: &["ONLINE", "OFFLINE"],
                            catch_all: false
                        }
                    },
                    FieldShape {
                        name: "tags",
                        qualifiers: &[Qualifier::List],
                        kind: FieldKind::Scalar("String")
                    },
                    FieldShape {
                        name: "lastSeen",
                        qualifiers: &[],
                        kind: FieldKind::Scalar("DateTime")
                    },
                    FieldShape {
                        name: "ports",
                        qualifiers: &[Qualifier::Required, Qualifier::List, Qualifier::Required],
                        kind: FieldKind::Object(0)
                    },
                ]
            },
            ShapeDef {
                name: "ResponseData",
                fields: &[FieldShape {
                    name: "device",
                    qualifiers: &[],
                    kind: FieldKind::Object(1)
                }]
            },
        ]
    };

    fn decode(data: &mut Value, lenient: bool) -> Result<(), ResponseDecodeError> {
        let registry = ScalarCodecRegistry::new();
        decode_data(&DEVICE_SHAPE, &registry, data, lenient)
    }

    #[test]
    fn conforming_payload_decodes() {
        let mut data = json!({
            "device": {
                "id": "dev-1",
                "status": "ONLINE",
                "tags": ["edge", null],
                "lastSeen": "2024-03-01T10:30:00Z",
                "ports": [{"label": "eth0"}, {"label": "eth1"}]
            }
        });
        decode(&mut data, false).unwrap();
    }

    #[test]
    fn nullable_wrapper_field_may_be_null_or_absent() {
        decode(&mut json!({ "device": null }), false).unwrap();
        decode(&mut json!({}), false).unwrap();
    }

    #[test]
    fn unknown_enum_variant_fails_with_path() {
        let mut data = json!({
            "device": {
                "id": "dev-1",
                "status": "SLEEPING",
                "tags": null,
                "lastSeen": null,
                "ports": []
            }
        });
        let err = decode(&mut data, false).unwrap_err();
        assert_eq!(err.path, "device.status");
        match err.cause {
            DecodeErrorKind::Enum(e) => assert_eq!(e.value, "SLEEPING"),
            other => panic!("unexpected cause: {:?}", other)
        }
    }

    #[test]
    fn malformed_scalar_deep_in_a_list_reports_the_indexed_path() {
        let mut data = json!({
            "device": {
                "id": "dev-1",
                "status": "ONLINE",
                "tags": null,
                "lastSeen": null,
                "ports": [{"label": "eth0"}, {"label": 7}]
            }
        });
        let err = decode(&mut data, false).unwrap_err();
        assert_eq!(err.path, "device.ports[1].label");
    }

    #[test]
    fn null_on_required_field_fails_strict_but_passes_lenient() {
        let mut data = json!({
            "device": {
                "id": null,
                "status": "ONLINE",
                "tags": null,
                "lastSeen": null,
                "ports": []
            }
        });
        let err = decode(&mut data.clone(), false).unwrap_err();
        assert_eq!(err.path, "device.id");
        assert!(matches!(err.cause, DecodeErrorKind::MissingField));

        decode(&mut data, true).unwrap();
    }

    #[test]
    fn datetime_scalar_is_normalized_in_place() {
        let mut data = json!({
            "device": {
                "id": "dev-1",
                "status": "OFFLINE",
                "tags": null,
                "lastSeen": "2024-03-01T10:30:00+00:00",
                "ports": []
            }
        });
        decode(&mut data, false).unwrap();
        assert_eq!(data["device"]["lastSeen"], json!("2024-03-01T10:30:00Z"));
    }

    #[test]
    fn fields_outside_the_selection_are_ignored() {
        let mut data = json!({
            "device": {
                "id": "dev-1",
                "status": "ONLINE",
                "tags": null,
                "lastSeen": null,
                "ports": [],
                "firmware": {"version": "1.2.3"}
            }
        });
        decode(&mut data, false).unwrap();
    }

    #[test]
    fn catch_all_enum_admits_undeclared_variants() {
        static OPEN_SHAPE: Shape = Shape {
            root: 0,
            defs: &[ShapeDef {
                name: "ResponseData",
                fields: &[FieldShape {
                    name: "status",
                    qualifiers: &[Qualifier::Required],
                    kind: FieldKind::Enum {
                        name: "DeviceStatus",
                        variants: &["ONLINE", "OFFLINE"],
                        catch_all: true
                    }
                }]
            }]
        };
        let registry = ScalarCodecRegistry::new();
        let mut data = json!({"status": "SLEEPING"});
        decode_data(&OPEN_SHAPE, &registry, &mut data, false).unwrap();
        // Declared variants still pass, and non-strings still fail.
        decode_data(&OPEN_SHAPE, &registry, &mut json!({"status": "ONLINE"}), false).unwrap();
        let err =
            decode_data(&OPEN_SHAPE, &registry, &mut json!({"status": 3}), false).unwrap_err();
        assert_eq!(err.path, "status");
    }

    #[test]
    fn non_list_where_list_expected_fails() {
        let mut data = json!({
            "device": {
                "id": "dev-1",
                "status": "ONLINE",
                "tags": "edge",
                "lastSeen": null,
                "ports": []
            }
        });
        let err = decode(&mut data, false).unwrap_err();
        assert_eq!(err.path, "device.tags");
        assert!(matches!(
            err.cause,
            DecodeErrorKind::UnexpectedShape { expected: "list", .. }
        ));
    }
}
