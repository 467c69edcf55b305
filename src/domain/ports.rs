use crate::domain::mappings::ConstructedField;
use crate::domain::model::{LookupRequest, PropertyRecord, ProviderKind};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listen_address(&self) -> &str;
    fn provider_kind(&self) -> ProviderKind;
    fn provider_endpoint(&self) -> &str;
    /// Basic auth `(api_key, api_secret)` sent to the provider, if configured
    fn credentials(&self) -> Option<(&str, &str)>;
    fn timeout_seconds(&self) -> u64;
    fn snapshot_path(&self) -> Option<&str>;
}

/// One external property-data provider.
///
/// `fetch` performs the single outbound call; `parse` and `normalize` are
/// pure and turn the raw payload into generic field names and values.
#[async_trait]
pub trait HomeDataSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, request: &LookupRequest) -> Result<serde_json::Value>;

    fn parse(&self, payload: serde_json::Value) -> Result<PropertyRecord>;

    fn normalize(&self, record: PropertyRecord) -> Result<PropertyRecord>;

    fn constructed_fields(&self) -> &[ConstructedField] {
        &[]
    }
}
