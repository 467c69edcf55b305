// 與資料來源無關的通用欄位與欄位值。
// 各 provider 的 normalize 步驟都應輸出這裡定義的名稱與值。

use crate::domain::model::PropertyRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericField {
    Sewer,
}

impl GenericField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sewer => "sewer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericSewer {
    Septic,
    Municipal,
    Storm,
    /// Sewer exists but its type is not reported
    TypeUnknown,
    /// Provider value was missing or unrecognized
    ExistenceUnknown,
    NoSewer,
}

impl GenericSewer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Septic => "septic",
            Self::Municipal => "municipal",
            Self::Storm => "storm",
            Self::TypeUnknown => "type_unknown",
            Self::ExistenceUnknown => "existence_unknown",
            Self::NoSewer => "no_sewer",
        }
    }
}

/// 由其他已正規化欄位推導出的欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructedField {
    HasSeptic,
}

impl ConstructedField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HasSeptic => "has_septic",
        }
    }

    /// Returns `None` when the fields this one depends on are absent.
    pub fn construct(&self, record: &PropertyRecord) -> Option<serde_json::Value> {
        match self {
            Self::HasSeptic => record
                .get(GenericField::Sewer.name())
                .map(|sewer| serde_json::Value::Bool(sewer == GenericSewer::Septic.as_str())),
        }
    }
}
