use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::clients::{FeedDirectory, FeedInfo, FlockDirectory, FlockInfo};
use crate::cost::arithmetic;
use crate::cost::model::{AllocationRequest, CostRecord};
use crate::cost::repository::CostRecordRepository;
use crate::error::CostError;
use crate::logger::warn_if_slow;

/// Update orchestrator. Recomputes the derived figures from a fresh
/// allocation but trusts the record's existing period window: identifier,
/// start/end dates and status are immutable here.
pub struct UpdateCostService {
    feed: Arc<dyn FeedDirectory>,
    flock: Arc<dyn FlockDirectory>,
    repo: Arc<dyn CostRecordRepository>,
}

impl UpdateCostService {
    pub fn new(
        feed: Arc<dyn FeedDirectory>,
        flock: Arc<dyn FlockDirectory>,
        repo: Arc<dyn CostRecordRepository>,
    ) -> Self {
        Self { feed, flock, repo }
    }

    #[instrument(
        skip(self, request),
        fields(food_id = request.food_id, flock_id = request.flock_id)
    )]
    pub async fn update_cost(
        &self,
        id: i64,
        request: &AllocationRequest,
    ) -> Result<CostRecord, CostError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CostError::RecordNotFound(id))?;

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
            total_cost = %costs.total_cost,
            "allocation cost recomputed"
        );

        let updated = existing.with_allocation(request, &costs, flock.shed_id);

        let saved = warn_if_slow("db_update_cost_record", Duration::from_millis(100), async {
            self.repo.update(&updated).await
        })
        .await?;

        info!(id, shed_id = saved.shed_id, "cost record updated");
        Ok(saved)
    }

    async fn fetch_feed_and_flock(
        &self,
        request: &AllocationRequest,
    ) -> Result<(FeedInfo, FlockInfo), CostError> {
        // Unlike the insert path, a missing feed is reported as its own
        // not-found error here; flock failures stay upstream failures.
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
}
