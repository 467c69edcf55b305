use crate::adapters::http::ProviderClient;
use crate::domain::model::{LookupRequest, PropertyRecord};
use crate::domain::ports::HomeDataSource;
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;

/// Provider that already answers with a flat JSON object of property fields.
pub struct PassthroughSource {
    client: ProviderClient,
}

impl PassthroughSource {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HomeDataSource for PassthroughSource {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn fetch(&self, request: &LookupRequest) -> Result<serde_json::Value> {
        self.client.get_json(request).await
    }

    fn parse(&self, payload: serde_json::Value) -> Result<PropertyRecord> {
        match payload {
            serde_json::Value::Object(obj) => Ok(obj.into_iter().collect()),
            other => Err(LookupError::ProviderSchemaError {
                message: format!("expected a JSON object, got {}", json_kind(&other)),
            }),
        }
    }

    fn normalize(&self, record: PropertyRecord) -> Result<PropertyRecord> {
        Ok(record)
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn source() -> PassthroughSource {
        PassthroughSource::new(ProviderClient::new("http://test.com", Duration::from_secs(1)))
    }

    #[test]
    fn test_parse_object() {
        let record = source()
            .parse(serde_json::json!({"has_septic": true, "sq_ft": 1200}))
            .unwrap();

        assert_eq!(record.data.len(), 2);
        assert_eq!(record.get("sq_ft"), Some(&serde_json::json!(1200)));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = source().parse(serde_json::json!([1, 2, 3])).unwrap_err();
        assert!(
            matches!(err, LookupError::ProviderSchemaError { ref message } if message.contains("an array"))
        );
    }

    #[test]
    fn test_normalize_is_identity() {
        let record: PropertyRecord = [("sewer".to_string(), serde_json::json!("Septic"))]
            .into_iter()
            .collect();
        assert_eq!(source().normalize(record.clone()).unwrap(), record);
        assert!(source().constructed_fields().is_empty());
    }
}
