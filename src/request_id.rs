//! Correlation header protocol and identifier generation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Header carrying the correlation id, inbound (optional) and outbound (always).
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Context record field holding the correlation id.
pub const REQUEST_ID_KEY: &str = "requestId";

/// Decodes a header value into an id string without losing bytes.
///
/// Visible ASCII maps to itself and obs-text bytes (0x80-0xFF) map to the
/// Latin-1 code point of the same value.
pub fn id_from_header(value: &HeaderValue) -> String {
    value.as_bytes().iter().map(|&b| b as char).collect()
}

/// Inverse of [`id_from_header`]; `None` when the id holds a character
/// outside Latin-1 or a control byte.
pub fn header_from_id(id: &str) -> Option<HeaderValue> {
    let bytes = id
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()?;
    HeaderValue::from_bytes(&bytes).ok()
}

/// Errors raised while producing a request id.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Generator returned an empty request id")]
    Empty,

    #[error("Request id is not a valid header value: {0:?}")]
    InvalidHeaderValue(String),

    #[error("Request id generation failed: {message}")]
    Failed { message: String },
}

impl GenerateError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Produces correlation ids that are unique across concurrent and historical
/// requests.
///
/// Callers treat the result as an opaque string. Any
/// `Fn() -> Result<String, GenerateError>` closure is a generator.
pub trait RequestIdGenerator: Send + Sync {
    fn generate(&self) -> Result<String, GenerateError>;
}

impl<F> RequestIdGenerator for F
where
    F: Fn() -> Result<String, GenerateError> + Send + Sync,
{
    fn generate(&self) -> Result<String, GenerateError> {
        self()
    }
}

/// Shared, type-erased generator handed to the middleware.
pub type SharedGenerator = Arc<dyn RequestIdGenerator>;

/// Random 128-bit UUID in canonical 36-character form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl RequestIdGenerator for UuidV4Generator {
    fn generate(&self) -> Result<String, GenerateError> {
        Ok(Uuid::new_v4().to_string())
    }
}

/// Time-ordered UUID, so ids sort by creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl RequestIdGenerator for UuidV7Generator {
    fn generate(&self) -> Result<String, GenerateError> {
        Ok(Uuid::now_v7().to_string())
    }
}

/// Built-in generators selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    #[default]
    UuidV4,
    UuidV7,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::UuidV4 => "uuid-v4",
            GeneratorKind::UuidV7 => "uuid-v7",
        }
    }

    /// Builds the generator this kind names.
    pub fn build(self) -> SharedGenerator {
        match self {
            GeneratorKind::UuidV4 => Arc::new(UuidV4Generator),
            GeneratorKind::UuidV7 => Arc::new(UuidV7Generator),
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uuid-v4" | "uuid_v4" | "v4" => Ok(GeneratorKind::UuidV4),
            "uuid-v7" | "uuid_v7" | "v7" => Ok(GeneratorKind::UuidV7),
            _ => Err(format!(
                "Invalid request id generator '{}'. Valid values are: uuid-v4, uuid-v7",
                s
            )),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_from_header_keeps_every_byte() {
        assert_eq!(id_from_header(&HeaderValue::from_static("abc-1")), "abc-1");

        let latin1 = HeaderValue::from_bytes(b"caf\xe9-42").unwrap();
        assert_eq!(id_from_header(&latin1), "caf\u{e9}-42");
        assert_eq!(header_from_id("caf\u{e9}-42"), Some(latin1));
    }

    #[test]
    fn test_header_from_id_rejects_unencodable() {
        assert!(header_from_id("snow\u{2603}").is_none());
        assert!(header_from_id("line\nbreak").is_none());
    }

    #[test]
    fn test_header_constant() {
        assert_eq!(REQUEST_ID_HEADER, "x-request-id");
        assert_eq!(REQUEST_ID_KEY, "requestId");
    }

    #[test]
    fn test_uuid_v4_canonical_form() {
        let id = UuidV4Generator.generate().unwrap();
        assert_eq!(id.len(), 36);
        assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_uuid_v7_canonical_form() {
        let id = UuidV7Generator.generate().unwrap();
        assert_eq!(id.len(), 36);
        assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 7);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        for generator in [GeneratorKind::UuidV4.build(), GeneratorKind::UuidV7.build()] {
            let ids: HashSet<String> = (0..1000).map(|_| generator.generate().unwrap()).collect();
            assert_eq!(ids.len(), 1000);
        }
    }

    #[test]
    fn test_closure_generator() {
        let generator: SharedGenerator = Arc::new(|| Ok::<_, GenerateError>("fixed".to_string()));
        assert_eq!(generator.generate().unwrap(), "fixed");

        let failing: SharedGenerator = Arc::new(|| Err::<String, _>(GenerateError::failed("entropy exhausted")));
        assert!(matches!(failing.generate(), Err(GenerateError::Failed { .. })));
    }

    #[test]
    fn test_generator_kind_parsing() {
        assert_eq!("uuid-v4".parse::<GeneratorKind>().unwrap(), GeneratorKind::UuidV4);
        assert_eq!("V7".parse::<GeneratorKind>().unwrap(), GeneratorKind::UuidV7);
        assert!("snowflake".parse::<GeneratorKind>().is_err());
        assert_eq!(GeneratorKind::default().to_string(), "uuid-v4");
    }
}
