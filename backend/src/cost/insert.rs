use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::clients::{FeedDirectory, FeedInfo, FlockDirectory, FlockInfo};
use crate::cost::arithmetic::{self, CostBreakdown};
use crate::cost::model::{AllocationRequest, CostRecord};
use crate::cost::period::{PeriodDecision, resolve_period};
use crate::cost::repository::CostRecordRepository;
use crate::cost::shed_lock::ShedLocks;
use crate::error::CostError;
use crate::logger::warn_if_slow;

/// Result of one creation attempt. A skip is a success: the caller observes
/// completion even though nothing was written.
#[derive(Debug)]
pub enum InsertOutcome {
    Created(CostRecord),
    AlreadyRecorded,
}

/// Creation orchestrator: lookups, validation, arithmetic, period
/// resolution and the single insert, in that order. Nothing is persisted
/// until every preceding step has succeeded.
pub struct InsertCostService {
    feed: Arc<dyn FeedDirectory>,
    flock: Arc<dyn FlockDirectory>,
    repo: Arc<dyn CostRecordRepository>,
    shed_locks: Arc<ShedLocks>,
}

impl InsertCostService {
    pub fn new(
        feed: Arc<dyn FeedDirectory>,
        flock: Arc<dyn FlockDirectory>,
        repo: Arc<dyn CostRecordRepository>,
        shed_locks: Arc<ShedLocks>,
    ) -> Self {
        Self {
            feed,
            flock,
            repo,
            shed_locks,
        }
    }

    #[instrument(
        skip(self, request),
        fields(food_id = request.food_id, flock_id = request.flock_id)
    )]
    pub async fn add_cost(&self, request: &AllocationRequest) -> Result<InsertOutcome, CostError> {
        let (feed, flock) = self.fetch_feed_and_flock(request).await?;

        let available = arithmetic::validate_available_amount(request.food_id, feed.available_amount)?;

        let costs = arithmetic::compute(
            request.grams_per_chicken,
            request.quantity,
            request.unit_price,
            available,
        );
        debug!(
            total_weight_kg = %costs.total_weight_kg,
            cost_per_kg = %costs.cost_per_kg,
            total_cost = %costs.total_cost,
            "allocation cost computed"
        );

        // Serialize resolve+insert per shed so two concurrent submissions
        // cannot both read the same most-recent record and write
        // overlapping periods.
        let lock = self.shed_locks.lock_for(flock.shed_id);
        let _guard = lock.lock().await;

        self.resolve_and_persist(request, &flock, &costs).await
    }

    async fn fetch_feed_and_flock(
        &self,
        request: &AllocationRequest,
    ) -> Result<(FeedInfo, FlockInfo), CostError> {
        let (feed, flock) = tokio::try_join!(
            async {
                self.feed
                    .find_feed_by_id(request.food_id)
                    .await
                    .map_err(|source| CostError::Upstream {
                        collaborator: "feed",
                        source,
                    })
            },
            async {
                self.flock
                    .find_flock_by_id(request.flock_id)
                    .await
                    .map_err(|source| CostError::Upstream {
                        collaborator: "flock",
                        source,
                    })
            },
        )?;

        let feed = feed.ok_or(CostError::FoodNotFound(request.food_id))?;
        let flock = flock.ok_or(CostError::FlockNotFound(request.flock_id))?;

        Ok((feed, flock))
    }

    async fn resolve_and_persist(
        &self,
        request: &AllocationRequest,
        flock: &FlockInfo,
        costs: &CostBreakdown,
    ) -> Result<InsertOutcome, CostError> {
        let most_recent = warn_if_slow("db_most_recent_by_shed", Duration::from_millis(100), async {
            self.repo.most_recent_by_shed(flock.shed_id).await
        })
        .await?;

        match resolve_period(most_recent.as_ref(), flock.arrival_date) {
            PeriodDecision::AlreadyRecorded => {
                info!(shed_id = flock.shed_id, "period already recorded; skipping insert");
                Ok(InsertOutcome::AlreadyRecorded)
            }
            PeriodDecision::NewPeriod(period) => {
                let record = CostRecord::assemble(request, period, costs, flock.shed_id);

                let saved = warn_if_slow("db_insert_cost_record", Duration::from_millis(100), async {
                    self.repo.insert(&record).await
                })
                .await?;

                info!(
                    id = ?saved.id,
                    shed_id = flock.shed_id,
                    start_date = %period.start_date,
                    end_date = %period.end_date,
                    "cost record created"
                );
                Ok(InsertOutcome::Created(saved))
            }
        }
    }
}
