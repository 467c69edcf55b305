use crate::core::projection::{missing_keys, project};
use crate::domain::model::{LookupRequest, LookupResult, PropertyRecord};
use crate::domain::ports::{HomeDataSource, Storage};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// Runs one lookup: fetch, snapshot, parse, normalize, construct, project.
pub struct LookupEngine<S: Storage> {
    source: Box<dyn HomeDataSource>,
    snapshots: Option<S>,
    snapshot_seq: AtomicU64,
}

impl<S: Storage> LookupEngine<S> {
    pub fn new(source: Box<dyn HomeDataSource>) -> Self {
        Self {
            source,
            snapshots: None,
            snapshot_seq: AtomicU64::new(0),
        }
    }

    /// Write every raw provider payload to `storage` before parsing.
    pub fn with_snapshots(mut self, storage: S) -> Self {
        self.snapshots = Some(storage);
        self
    }

    pub async fn run(&self, request: &LookupRequest) -> Result<LookupResult> {
        let name = self.source.name();
        tracing::info!(
            "🔍 {}: Lookup for zip {} ({} fields requested)",
            name,
            request.zip,
            request.fields.len()
        );

        let payload = self.source.fetch(request).await?;
        self.save_snapshot(request, &payload).await;

        let parsed = self.source.parse(payload)?;
        let normalized = self.source.normalize(parsed)?;
        let record = self.build_constructed_fields(normalized);

        let fields = project(record.data, &request.fields);

        let missing = missing_keys(&request.fields, &fields);
        if !missing.is_empty() {
            tracing::debug!("{}: Requested fields not in provider data: {:?}", name, missing);
        }
        tracing::info!("✅ {}: Returning {} fields", name, fields.len());

        Ok(LookupResult { fields })
    }

    /// 計算衍生欄位；相依欄位缺失時略過，不影響其他資料
    fn build_constructed_fields(&self, mut record: PropertyRecord) -> PropertyRecord {
        for constructed in self.source.constructed_fields() {
            match constructed.construct(&record) {
                Some(value) => {
                    record.data.insert(constructed.name().to_string(), value);
                }
                None => {
                    tracing::debug!(
                        "{}: Skipping constructed field '{}', dependencies missing",
                        self.source.name(),
                        constructed.name()
                    );
                }
            }
        }
        record
    }

    async fn save_snapshot(&self, request: &LookupRequest, payload: &serde_json::Value) {
        let Some(storage) = &self.snapshots else {
            return;
        };

        // 序號避免同一毫秒內相同郵遞區號互相覆蓋
        let seq = self.snapshot_seq.fetch_add(1, Ordering::Relaxed);
        let path = format!(
            "{}/{}_{}_{}.json",
            self.source.name(),
            chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ"),
            request.zip,
            seq
        );

        let data = match serde_json::to_vec_pretty(payload) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("⚠️ Could not serialize snapshot {}: {}", path, e);
                return;
            }
        };

        match storage.write_file(&path, &data).await {
            Ok(()) => tracing::debug!("Saved provider snapshot to {}", path),
            Err(e) => tracing::warn!("⚠️ Could not save provider snapshot {}: {}", path, e),
        }
    }
}
