//! The scalar codec registry.
//!
//! Schema scalars travel as plain JSON values; a codec is an encode/decode
//! pair that validates and normalizes them at the `serde_json::Value` level.
//! Decoding happens while the response is walked against its shape, encoding
//! while variables are serialized, so typed struct fields (e.g. chrono
//! datetimes) only ever see canonical wire forms.

use crate::error::ScalarDecodeError;
use chrono::SecondsFormat;
use serde_json::Value;
use std::collections::HashMap;

/// The target type generated code uses for `DateTime` schema scalars.
pub type DateTime = chrono::DateTime<chrono::FixedOffset>;

type CodecFn = Box<dyn Fn(&Value) -> Result<Value, ScalarDecodeError> + Send + Sync>;

struct ScalarCodec {
    encode: CodecFn,
    decode: CodecFn
}

/// Maps schema scalar names to encode/decode functions.
///
/// Populated once at startup and read-only afterwards; shared between
/// concurrent calls without locking.
pub struct ScalarCodecRegistry {
    codecs: HashMap<String, ScalarCodec>
}

impl Default for ScalarCodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarCodecRegistry {
    /// A registry with codecs for the built-in scalars (`ID`, `String`,
    /// `Int`, `Float`, `Boolean`) and `DateTime`.
    pub fn new() -> Self {
        let mut registry = ScalarCodecRegistry {
            codecs: HashMap::new()
        };
        registry.register("ID", expect_string, expect_string);
        registry.register("String", expect_string, expect_string);
        registry.register("Boolean", expect_bool, expect_bool);
        registry.register("Int", expect_int, expect_int);
        registry.register("Float", expect_number, expect_number);
        registry.register("DateTime", datetime_codec, datetime_codec);
        registry
    }

    /// Register or replace the codec for `name`.
    pub fn register<E, D>(&mut self, name: &str, encode: E, decode: D)
    where
        E: Fn(&Value) -> Result<Value, ScalarDecodeError> + Send + Sync + 'static,
        D: Fn(&Value) -> Result<Value, ScalarDecodeError> + Send + Sync + 'static
    {
        self.codecs.insert(
            name.to_owned(),
            ScalarCodec {
                encode: Box::new(encode),
                decode: Box::new(decode)
            }
        );
    }

    pub fn encode(&self, name: &str, value: &Value) -> Result<Value, ScalarDecodeError> {
        match self.codecs.get(name) {
            Some(codec) => (codec.encode)(value),
            None => identity_fallback(name, value)
        }
    }

    pub fn decode(&self, name: &str, value: &Value) -> Result<Value, ScalarDecodeError> {
        match self.codecs.get(name) {
            Some(codec) => (codec.decode)(value),
            None => identity_fallback(name, value)
        }
    }
}

fn error(name: &str, value: &Value) -> ScalarDecodeError {
    ScalarDecodeError {
        scalar_name: name.to_owned(),
        raw_value: value.clone()
    }
}

/// Unregistered scalars pass through unchanged as long as they are
/// JSON-primitive-compatible.
fn identity_fallback(name: &str, value: &Value) -> Result<Value, ScalarDecodeError> {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(value.clone()),
        Value::Array(_) | Value::Object(_) => Err(error(name, value))
    }
}

fn expect_string(value: &Value) -> Result<Value, ScalarDecodeError> {
    match value {
        Value::String(_) => Ok(value.clone()),
        _ => Err(error("String", value))
    }
}

fn expect_bool(value: &Value) -> Result<Value, ScalarDecodeError> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        _ => Err(error("Boolean", value))
    }
}

fn expect_int(value: &Value) -> Result<Value, ScalarDecodeError> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        _ => Err(error("Int", value))
    }
}

fn expect_number(value: &Value) -> Result<Value, ScalarDecodeError> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        _ => Err(error("Float", value))
    }
}

/// ISO-8601 with offset, re-emitted in canonical RFC 3339 form. Malformed
/// input is an error, never a truncation.
fn datetime_codec(value: &Value) -> Result<Value, ScalarDecodeError> {
    let raw = match value {
        Value::String(s) => s,
        _ => return Err(error("DateTime", value))
    };
    let parsed: DateTime = raw.parse().map_err(|_| error("DateTime", value))?;
    Ok(Value::String(
        parsed.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn datetime_round_trips_canonical_values() {
        let registry = ScalarCodecRegistry::new();
        for raw in &[
            "2024-03-01T10:30:00+00:00",
            "2024-03-01T10:30:00.123+02:00",
            "1999-12-31T23:59:59-05:00",
        ] {
            let decoded = registry.decode("DateTime", &json!(raw)).unwrap();
            let encoded = registry.encode("DateTime", &decoded).unwrap();
            assert_eq!(encoded, decoded);
        }
    }

    #[test]
    fn datetime_decode_keeps_the_offset() {
        let registry = ScalarCodecRegistry::new();
        let decoded = registry
            .decode("DateTime", &json!("2024-03-01T10:30:00+02:00"))
            .unwrap();
        assert_eq!(decoded, json!("2024-03-01T10:30:00+02:00"));
    }

    #[test]
    fn malformed_datetime_fails_decode() {
        let registry = ScalarCodecRegistry::new();
        for raw in &["2024-03-01", "not a date", "2024-13-40T99:99:99Z"] {
            let err = registry.decode("DateTime", &json!(raw)).unwrap_err();
            assert_eq!(err.scalar_name, "DateTime");
            assert_eq!(err.raw_value, json!(raw));
        }
    }

    #[test]
    fn unregistered_scalar_passes_primitives_through() {
        let registry = ScalarCodecRegistry::new();
        assert_eq!(registry.decode("Upload", &json!("x")).unwrap(), json!("x"));
        assert_eq!(registry.decode("Upload", &json!(42)).unwrap(), json!(42));
    }

    #[test]
    fn unregistered_scalar_rejects_structured_values() {
        let registry = ScalarCodecRegistry::new();
        assert!(registry.decode("Upload", &json!({"a": 1})).is_err());
        assert!(registry.decode("Upload", &json!([1, 2])).is_err());
    }

    #[test]
    fn int_rejects_fractional_numbers() {
        let registry = ScalarCodecRegistry::new();
        assert!(registry.decode("Int", &json!(1.5)).is_err());
        assert_eq!(registry.decode("Int", &json!(7)).unwrap(), json!(7));
    }

    #[test]
    fn custom_codec_overrides_the_fallback() {
        let mut registry = ScalarCodecRegistry::new();
        registry.register(
            "Upper",
            |v| Ok(v.clone()),
            |v| match v {
                Value::String(s) => Ok(Value::String(s.to_uppercase())),
                _ => Err(ScalarDecodeError {
                    scalar_name: "Upper".into(),
                    raw_value: v.clone()
                })
            }
        );
        assert_eq!(
            registry.decode("Upper", &json!("abc")).unwrap(),
            json!("ABC")
        );
    }
}
