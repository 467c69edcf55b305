pub mod house_canary;
pub mod lookup;
pub mod passthrough;
pub mod projection;

pub use crate::domain::model::{LookupRequest, LookupResult, PropertyRecord, ProviderKind};
pub use crate::domain::ports::{ConfigProvider, HomeDataSource, Storage};
pub use crate::utils::error::Result;

use crate::adapters::http::ProviderClient;

/// 依設定選擇資料來源
pub fn build_source<C: ConfigProvider + ?Sized>(config: &C) -> Box<dyn HomeDataSource> {
    let client = ProviderClient::from_config(config);
    match config.provider_kind() {
        ProviderKind::Passthrough => Box::new(passthrough::PassthroughSource::new(client)),
        ProviderKind::HouseCanary => Box::new(house_canary::HouseCanarySource::new(client)),
    }
}
