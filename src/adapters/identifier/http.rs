//! HTTP entity identifier adapter
//!
//! Talks to an identification service over HTTP: one POST per chunk carrying
//! the chunk text, the rendered policy text, and the response schema matching
//! the chunk's shape. The service answers with newline-delimited JSON, each
//! line a cumulative snapshot of the entities recognized so far; the final
//! line is the terminal result. A plain single-JSON body is handled as one
//! snapshot. The adapter performs no retries; the service is expected to
//! apply its own retry policy or fail fast.

use crate::adapters::identifier::{EntityIdentifier, PartialSink};
use crate::config::IdentifierConfig;
use crate::domain::{
    Chunk, ContentShape, IdentifierError, Result, SensitiveEntity, SentraError,
};
use async_trait::async_trait;
use futures::StreamExt;
use regex::Regex;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

/// Fallback severity color for entities the service left uncolored
const DEFAULT_SEVERITY_HEX: &str = "B0B0B0";

/// Upper bound on error-body text carried into an error message
const ERROR_BODY_LIMIT: usize = 512;

/// HTTP-backed [`EntityIdentifier`]
pub struct HttpEntityIdentifier {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<crate::config::SecretString>,
    model: Option<String>,
}

impl HttpEntityIdentifier {
    /// Build an identifier client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`SentraError::Configuration`] when the endpoint is not a
    /// valid URL or the HTTP client cannot be constructed.
    pub fn new(config: &IdentifierConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            SentraError::Configuration(format!("Invalid identifier endpoint: {e}"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                SentraError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl EntityIdentifier for HttpEntityIdentifier {
    async fn identify(
        &self,
        chunk: &Chunk,
        policy_text: &str,
        partials: PartialSink,
    ) -> std::result::Result<Vec<SensitiveEntity>, IdentifierError> {
        let body = json!({
            "content": chunk.text,
            "shape": chunk.shape.as_str(),
            "policies": policy_text,
            "responseSchema": response_schema(chunk.shape),
            "model": self.model
        });

        let mut request = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret().as_ref());
        }

        let response = request
            .send()
            .await
            .map_err(|e| IdentifierError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_LIMIT)
                .collect();
            return Err(IdentifierError::Http {
                status: status.as_u16(),
                message,
            });
        }

        // Consume newline-delimited snapshots as they arrive, forwarding
        // each to the partial sink. The last snapshot is the terminal list.
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut last: Option<Vec<SensitiveEntity>> = None;

        while let Some(piece) = stream.next().await {
            let piece = piece.map_err(|e| IdentifierError::Interrupted(e.to_string()))?;
            buffer.push_str(&String::from_utf8_lossy(&piece));

            while let Some(newline) = buffer.find('\n') {
                let line: String = buffer.drain(..=newline).collect();
                if let Some(snapshot) = parse_snapshot(line.trim(), chunk.shape)? {
                    let _ = partials.send(snapshot.clone());
                    last = Some(snapshot);
                }
            }
        }

        if let Some(snapshot) = parse_snapshot(buffer.trim(), chunk.shape)? {
            let _ = partials.send(snapshot.clone());
            last = Some(snapshot);
        }

        last.ok_or_else(|| {
            IdentifierError::InvalidResponse("response body contained no snapshots".to_string())
        })
    }
}

/// Parse one snapshot line into entities
///
/// Accepts either a bare entity array or an object with an `entities` array.
/// Entities are normalized before deserialization: a missing `shape` tag is
/// filled in from the requested shape, confidence is clamped to the 0-10
/// scale, and a missing or malformed severity color falls back to a neutral
/// default. An entity whose explicit variant contradicts the requested shape
/// is a contract violation and fails the chunk.
fn parse_snapshot(
    line: &str,
    shape: ContentShape,
) -> std::result::Result<Option<Vec<SensitiveEntity>>, IdentifierError> {
    if line.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(line)
        .map_err(|e| IdentifierError::InvalidResponse(format!("malformed snapshot: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("entities") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(IdentifierError::InvalidResponse(
                    "snapshot object is missing an entities array".to_string(),
                ))
            }
        },
        _ => {
            return Err(IdentifierError::InvalidResponse(
                "snapshot is neither an array nor an object".to_string(),
            ))
        }
    };

    let severity_re = Regex::new(r"^[0-9a-fA-F]{6}$").unwrap();
    let mut entities = Vec::with_capacity(items.len());
    for mut item in items {
        if let Value::Object(map) = &mut item {
            map.entry("shape")
                .or_insert_with(|| Value::String(shape.as_str().to_string()));

            if let Some(confidence) = map.get("confidence").and_then(Value::as_f64) {
                let clamped = confidence.clamp(0.0, 10.0);
                if clamped != confidence {
                    map.insert("confidence".to_string(), json!(clamped));
                }
            }

            let severity_ok = map
                .get("severityHex")
                .and_then(Value::as_str)
                .map(|hex| severity_re.is_match(hex))
                .unwrap_or(false);
            if !severity_ok {
                map.insert(
                    "severityHex".to_string(),
                    Value::String(DEFAULT_SEVERITY_HEX.to_string()),
                );
            }
        }

        let entity: SensitiveEntity = serde_json::from_value(item)
            .map_err(|e| IdentifierError::InvalidResponse(format!("malformed entity: {e}")))?;

        if entity.shape() != shape {
            return Err(IdentifierError::InvalidResponse(format!(
                "entity variant {} does not match requested shape {}",
                entity.shape(),
                shape
            )));
        }
        entities.push(entity);
    }

    Ok(Some(entities))
}

/// JSON response schema for the variant matching a content shape
///
/// Sent with every request so the service constrains its output to the
/// variant the rest of the pipeline expects.
pub fn response_schema(shape: ContentShape) -> Value {
    let mut properties = json!({
        "label": { "type": "string" },
        "policyReference": { "type": "string" },
        "confidence": { "type": "number", "minimum": 0, "maximum": 10 },
        "severityHex": { "type": "string", "pattern": "^[0-9a-fA-F]{6}$" },
        "category": { "type": "string" }
    });
    let mut required = vec!["label", "policyReference", "confidence", "category"];

    let object = properties.as_object_mut().expect("schema base is an object");
    match shape {
        ContentShape::Unstructured => {
            object.insert("excerpt".to_string(), json!({ "type": "string" }));
            required.push("excerpt");
        }
        ContentShape::Spreadsheet => {
            object.insert(
                "cellRanges".to_string(),
                json!({ "type": "array", "items": { "type": "string" } }),
            );
            object.insert("sheetName".to_string(), json!({ "type": "string" }));
            required.push("cellRanges");
            required.push("sheetName");
        }
        ContentShape::Json | ContentShape::Csv => {
            object.insert("path".to_string(), json!({ "type": "string" }));
            required.push("path");
        }
    }

    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": properties,
            "required": required
        }
    })
}
