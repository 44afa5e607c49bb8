use thiserror::Error;

use crate::clients::ClientError;

/// Terminal failures of a single cost-record operation. There is no local
/// recovery; the HTTP layer maps each variant to a response status.
#[derive(Error, Debug)]
pub enum CostError {
    #[error("cost record not found: {0}")]
    RecordNotFound(i64),

    #[error("feed not found: {0}")]
    FoodNotFound(i64),

    #[error("flock not found: {0}")]
    FlockNotFound(i64),

    #[error("invalid allocation: available amount for feed {0} is missing or zero")]
    InvalidAllocation(i64),

    #[error("cost record {0} is already inactive")]
    AlreadyInactive(i64),

    #[error("cost record {0} is already active")]
    AlreadyActive(i64),

    #[error("{collaborator} lookup failed")]
    Upstream {
        collaborator: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
