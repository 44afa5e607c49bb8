use anyhow::Result;
use async_trait::async_trait;

use crate::cost::model::{CostRecord, RecordStatus};

#[async_trait]
pub trait CostRecordRepository: Send + Sync {
    /// Latest record for a shed by start date; feeds the period resolver.
    async fn most_recent_by_shed(&self, shed_id: i64) -> Result<Option<CostRecord>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<CostRecord>>;

    /// Persists a new record and returns it with the store-assigned id.
    async fn insert(&self, record: &CostRecord) -> Result<CostRecord>;

    /// Overwrites an existing record in place; the record must carry an id.
    async fn update(&self, record: &CostRecord) -> Result<CostRecord>;

    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// All records in the given status, ordered by id ascending.
    async fn list_by_status(&self, status: RecordStatus) -> Result<Vec<CostRecord>>;

    /// Active records whose week number contains the fragment,
    /// case-insensitively.
    async fn list_by_week_number_contains(&self, fragment: &str) -> Result<Vec<CostRecord>>;
}
