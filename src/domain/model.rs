use crate::utils::error::{LookupError, Result};
use crate::utils::validation::validate_zip_code;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A validated lookup, built once per inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub zip: String,
    pub address: String,
    pub fields: BTreeSet<String>,
}

impl LookupRequest {
    pub fn new<I, F>(zip: &str, address: &str, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        let zip = zip.trim();
        validate_zip_code("zip", zip)?;

        let address = address.trim();
        if address.is_empty() {
            return Err(LookupError::InvalidParameter {
                field: "address".to_string(),
                reason: "address cannot be empty".to_string(),
            });
        }

        let fields: BTreeSet<String> = fields
            .into_iter()
            .flat_map(|f| {
                f.as_ref()
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        if fields.is_empty() {
            return Err(LookupError::InvalidParameter {
                field: "fields".to_string(),
                reason: "at least one field must be requested".to_string(),
            });
        }

        Ok(Self {
            zip: zip.to_string(),
            address: address.to_string(),
            fields,
        })
    }

    /// 解析 URL 查詢字串
    ///
    /// `fields` 可用逗號分隔，也可重複出現；`zip` 與 `address` 重複時取最後一個值。
    pub fn from_query(query: &str) -> Result<Self> {
        let mut zip = None;
        let mut address = None;
        let mut fields = Vec::new();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "zip" => zip = Some(value.into_owned()),
                "address" => address = Some(value.into_owned()),
                "fields" => fields.push(value.into_owned()),
                _ => {}
            }
        }

        let zip = zip.ok_or_else(|| LookupError::MissingParameter {
            field: "zip".to_string(),
        })?;
        let address = address.ok_or_else(|| LookupError::MissingParameter {
            field: "address".to_string(),
        })?;
        if fields.is_empty() {
            return Err(LookupError::MissingParameter {
                field: "fields".to_string(),
            });
        }

        Self::new(&zip, &address, fields)
    }
}

/// Flat view of a provider payload after parsing and normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub data: HashMap<String, serde_json::Value>,
}

impl PropertyRecord {
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.data.get(field)
    }
}

impl FromIterator<(String, serde_json::Value)> for PropertyRecord {
    fn from_iter<T: IntoIterator<Item = (String, serde_json::Value)>>(iter: T) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

/// Requested fields that were found, serialized as a bare JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupResult {
    pub fields: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Provider already answers with a flat object of property fields
    Passthrough,
    #[default]
    HouseCanary,
}
