use crate::adapters::http::ProviderClient;
use crate::core::passthrough::json_kind;
use crate::domain::mappings::{ConstructedField, GenericField, GenericSewer};
use crate::domain::model::{LookupRequest, PropertyRecord};
use crate::domain::ports::HomeDataSource;
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;

pub const DEFAULT_ENDPOINT: &str = "http://virtserver.swaggerhub.com/bdauer8/septic/1/canary";

const DETAILS_KEY: &str = "property/details";

// 目前支援的 HouseCanary 欄位
const FIELDS_TO_RETRIEVE: &[HouseCanaryField] = &[HouseCanaryField::Sewer];

const CONSTRUCTED_FIELDS: &[ConstructedField] = &[ConstructedField::HasSeptic];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HouseCanaryField {
    Sewer,
}

impl HouseCanaryField {
    fn key(&self) -> &'static str {
        match self {
            Self::Sewer => "sewer",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        FIELDS_TO_RETRIEVE.iter().copied().find(|f| f.key() == key)
    }

    fn to_generic(self) -> GenericField {
        match self {
            Self::Sewer => GenericField::Sewer,
        }
    }
}

/// Sewer values as HouseCanary reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HouseCanarySewer {
    Municipal,
    Septic,
    Storm,
    None,
    Yes,
}

impl HouseCanarySewer {
    fn from_provider(value: &str) -> Option<Self> {
        match value {
            "Municipal" => Some(Self::Municipal),
            "Septic" => Some(Self::Septic),
            "Storm" => Some(Self::Storm),
            "None" => Some(Self::None),
            "Yes" => Some(Self::Yes),
            _ => None,
        }
    }

    fn to_generic(self) -> GenericSewer {
        match self {
            Self::Municipal => GenericSewer::Municipal,
            Self::Septic => GenericSewer::Septic,
            Self::Storm => GenericSewer::Storm,
            Self::None => GenericSewer::NoSewer,
            // 有下水道但未提供種類
            Self::Yes => GenericSewer::TypeUnknown,
        }
    }
}

pub struct HouseCanarySource {
    client: ProviderClient,
}

impl HouseCanarySource {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    fn normalize_sewer(value: &serde_json::Value) -> GenericSewer {
        match value.as_str().and_then(HouseCanarySewer::from_provider) {
            Some(sewer) => sewer.to_generic(),
            None => {
                tracing::warn!("Unrecognized HouseCanary sewer value: {}", value);
                GenericSewer::ExistenceUnknown
            }
        }
    }
}

#[async_trait]
impl HomeDataSource for HouseCanarySource {
    fn name(&self) -> &str {
        "house_canary"
    }

    async fn fetch(&self, request: &LookupRequest) -> Result<serde_json::Value> {
        self.client.get_json(request).await
    }

    /// 取出 `property/details.result` 下的 property 與 assessment，
    /// assessment 的同名欄位覆蓋 property。
    fn parse(&self, mut payload: serde_json::Value) -> Result<PropertyRecord> {
        let result = payload
            .get_mut(DETAILS_KEY)
            .and_then(|details| details.get_mut("result"))
            .map(serde_json::Value::take)
            .ok_or_else(|| LookupError::ProviderSchemaError {
                message: format!("missing '{}.result'", DETAILS_KEY),
            })?;

        let mut result = match result {
            serde_json::Value::Object(obj) => obj,
            other => {
                return Err(LookupError::ProviderSchemaError {
                    message: format!("'{}.result' is {}", DETAILS_KEY, json_kind(&other)),
                });
            }
        };

        let mut record = PropertyRecord::default();
        for section in ["property", "assessment"] {
            match result.remove(section) {
                Some(serde_json::Value::Object(obj)) => {
                    record.data.extend(
                        obj.into_iter()
                            .filter(|(key, _)| HouseCanaryField::from_key(key).is_some()),
                    );
                }
                Some(serde_json::Value::Null) | None => {}
                Some(other) => {
                    return Err(LookupError::ProviderSchemaError {
                        message: format!("'{}' is {}", section, json_kind(&other)),
                    });
                }
            }
        }

        Ok(record)
    }

    fn normalize(&self, record: PropertyRecord) -> Result<PropertyRecord> {
        let mut normalized = PropertyRecord::default();

        for (key, value) in record.data {
            let Some(field) = HouseCanaryField::from_key(&key) else {
                continue;
            };
            let generic = match field {
                HouseCanaryField::Sewer => Self::normalize_sewer(&value).as_str(),
            };
            normalized.data.insert(
                field.to_generic().name().to_string(),
                serde_json::Value::String(generic.to_string()),
            );
        }

        Ok(normalized)
    }

    fn constructed_fields(&self) -> &[ConstructedField] {
        CONSTRUCTED_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn source() -> HouseCanarySource {
        HouseCanarySource::new(ProviderClient::new("http://test.com", Duration::from_secs(1)))
    }

    fn payload(property: serde_json::Value, assessment: serde_json::Value) -> serde_json::Value {
        json!({
            "property/details": {
                "api_code": 0,
                "api_code_description": "ok",
                "result": {
                    "property": property,
                    "assessment": assessment
                }
            }
        })
    }

    #[test]
    fn test_parse_keeps_supported_fields_only() {
        let record = source()
            .parse(payload(
                json!({"sewer": "Septic", "heating": "Central", "building_area_sq_ft": 1200}),
                json!({"apn": "12-34"}),
            ))
            .unwrap();

        assert_eq!(record.data.len(), 1);
        assert_eq!(record.get("sewer"), Some(&json!("Septic")));
    }

    #[test]
    fn test_parse_assessment_overrides_property() {
        let record = source()
            .parse(payload(json!({"sewer": "Municipal"}), json!({"sewer": "Septic"})))
            .unwrap();

        assert_eq!(record.get("sewer"), Some(&json!("Septic")));
    }

    #[test]
    fn test_parse_missing_sections_are_empty() {
        let record = source()
            .parse(json!({"property/details": {"result": {}}}))
            .unwrap();
        assert!(record.data.is_empty());

        let record = source()
            .parse(payload(serde_json::Value::Null, json!({"sewer": "Storm"})))
            .unwrap();
        assert_eq!(record.get("sewer"), Some(&json!("Storm")));
    }

    #[test]
    fn test_parse_missing_details_is_schema_error() {
        let err = source().parse(json!({"has_septic": true})).unwrap_err();
        assert!(matches!(err, LookupError::ProviderSchemaError { .. }));

        let err = source()
            .parse(json!({"property/details": {"api_code": 204}}))
            .unwrap_err();
        assert!(matches!(err, LookupError::ProviderSchemaError { .. }));

        let err = source()
            .parse(json!({"property/details": {"result": "none"}}))
            .unwrap_err();
        assert!(matches!(err, LookupError::ProviderSchemaError { .. }));
    }

    #[test]
    fn test_normalize_sewer_values() {
        let cases = [
            (json!("Municipal"), "municipal"),
            (json!("Septic"), "septic"),
            (json!("Storm"), "storm"),
            (json!("None"), "no_sewer"),
            (json!("Yes"), "type_unknown"),
            (json!("Cesspool"), "existence_unknown"),
            (serde_json::Value::Null, "existence_unknown"),
        ];

        for (raw, expected) in cases {
            let record: PropertyRecord = [("sewer".to_string(), raw)].into_iter().collect();
            let normalized = source().normalize(record).unwrap();
            assert_eq!(normalized.get("sewer"), Some(&json!(expected)));
        }
    }

    #[test]
    fn test_constructed_fields() {
        let fields = source().constructed_fields().to_vec();
        assert_eq!(fields, vec![ConstructedField::HasSeptic]);
    }
}
