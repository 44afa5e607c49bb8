use std::sync::Arc;

use tracing::{info, instrument};

use crate::cost::model::{CostRecord, RecordStatus};
use crate::cost::repository::CostRecordRepository;
use crate::error::CostError;

/// Status transitions and status-filtered queries over existing records.
/// Every operation checks existence first; each is a single-record,
/// single-write step with no cascading effects.
pub struct CostLifecycleService {
    repo: Arc<dyn CostRecordRepository>,
}

impl CostLifecycleService {
    pub fn new(repo: Arc<dyn CostRecordRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_active(&self) -> Result<Vec<CostRecord>, CostError> {
        Ok(self.repo.list_by_status(RecordStatus::Active).await?)
    }

    pub async fn list_inactive(&self) -> Result<Vec<CostRecord>, CostError> {
        Ok(self.repo.list_by_status(RecordStatus::Inactive).await?)
    }

    pub async fn search_by_week(&self, fragment: &str) -> Result<Vec<CostRecord>, CostError> {
        Ok(self.repo.list_by_week_number_contains(fragment).await?)
    }

    /// Soft delete: Active -> Inactive, conflict if already inactive.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i64) -> Result<CostRecord, CostError> {
        let mut record = self.require(id).await?;

        match record.status {
            RecordStatus::Active => {
                record.status = RecordStatus::Inactive;
                let saved = self.repo.update(&record).await?;
                info!(id, "cost record soft-deleted");
                Ok(saved)
            }
            RecordStatus::Inactive => Err(CostError::AlreadyInactive(id)),
        }
    }

    /// Restore: Inactive -> Active, conflict if already active.
    #[instrument(skip(self))]
    pub async fn restore(&self, id: i64) -> Result<CostRecord, CostError> {
        let mut record = self.require(id).await?;

        match record.status {
            RecordStatus::Inactive => {
                record.status = RecordStatus::Active;
                let saved = self.repo.update(&record).await?;
                info!(id, "cost record restored");
                Ok(saved)
            }
            RecordStatus::Active => Err(CostError::AlreadyActive(id)),
        }
    }

    /// Physical delete: removes the row regardless of status. Irreversible.
    #[instrument(skip(self))]
    pub async fn delete_physically(&self, id: i64) -> Result<(), CostError> {
        self.require(id).await?;
        self.repo.delete_by_id(id).await?;
        info!(id, "cost record physically deleted");
        Ok(())
    }

    async fn require(&self, id: i64) -> Result<CostRecord, CostError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CostError::RecordNotFound(id))
    }
}
