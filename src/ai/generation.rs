//! Per-call generation settings and the response-shape schema.
//!
//! Both serialize directly into Gemini's `generationConfig` object.

use serde::Serialize;
use std::collections::BTreeMap;

pub const JSON_MIME_TYPE: &str = "application/json";

/// Sampling and output-shape settings for one backend call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Schema>,
}

impl GenerationConfig {
    pub fn sampling(temperature: f64, top_p: f64, top_k: u32) -> Self {
        Self {
            temperature: Some(temperature),
            top_p: Some(top_p),
            top_k: Some(top_k),
            ..Self::default()
        }
    }

    /// Request machine-parseable JSON constrained to `schema`.
    pub fn with_json_schema(mut self, schema: Schema) -> Self {
        self.response_mime_type = Some(JSON_MIME_TYPE.to_string());
        self.response_schema = Some(schema);
        self
    }

    pub fn is_structured(&self) -> bool {
        self.response_schema.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Array,
    Object,
}

/// The OpenAPI subset Gemini accepts as `responseSchema`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl Schema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            items: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            min_items: None,
            max_items: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn exact_len(mut self, len: u32) -> Self {
        self.min_items = Some(len);
        self.max_items = Some(len);
        self
    }

    /// Add a required property.
    pub fn property(mut self, name: &str, schema: Schema) -> Self {
        self.properties.insert(name.to_string(), schema);
        self.required.push(name.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sampling_config_serializes_camel_case() {
        let value = serde_json::to_value(GenerationConfig::sampling(0.5, 0.95, 64)).unwrap();
        assert_eq!(value, json!({ "temperature": 0.5, "topP": 0.95, "topK": 64 }));
    }

    #[test]
    fn test_json_schema_config() {
        let config = GenerationConfig::default().with_json_schema(Schema::string());
        assert!(config.is_structured());

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "responseMimeType": "application/json",
                "responseSchema": { "type": "STRING" }
            })
        );
    }

    #[test]
    fn test_nested_schema_serialization() {
        let schema = Schema::array(
            Schema::object()
                .property("name", Schema::string().describe("A name."))
                .property("tags", Schema::array(Schema::string()).exact_len(2)),
        );

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "A name." },
                        "tags": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "minItems": 2,
                            "maxItems": 2
                        }
                    },
                    "required": ["name", "tags"]
                }
            })
        );
    }
}
