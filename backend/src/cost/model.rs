use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cost::arithmetic::CostBreakdown;
use crate::cost::period::FeedingPeriod;

/// Record lifecycle status. Stored as the single-character codes 'A' / 'I';
/// every transition point matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn code(self) -> &'static str {
        match self {
            RecordStatus::Active => "A",
            RecordStatus::Inactive => "I",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(RecordStatus::Active),
            "I" => Some(RecordStatus::Inactive),
            _ => None,
        }
    }
}

/// One feeding-cost period for one shed.
///
/// `total_weight_kg` and `total_cost` are always derived from the allocation
/// arithmetic, never caller-supplied. `start_date`/`end_date` span an
/// inclusive 7-day window and are fixed once the record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    /// Store-assigned identifier; `None` until first persisted.
    pub id: Option<i64>,
    pub week_number: String,
    pub food_type: String,
    pub grams_per_chicken: Decimal,
    pub total_weight_kg: Decimal,
    pub total_cost: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub shed_name: String,
    pub shed_id: i64,
    pub flock_id: i64,
    pub status: RecordStatus,
}

/// A feed allocation submitted for one shed's flock over one period.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub week_number: String,
    pub food_type: String,
    pub grams_per_chicken: Decimal,
    pub unit_price: Decimal,
    pub shed_name: String,
    pub quantity: u32,
    pub food_id: i64,
    pub flock_id: i64,
}

impl CostRecord {
    /// Assembles a new record from the request, the resolved period and the
    /// computed costs. Pure construction: no I/O, status always Active,
    /// id assigned later by the store.
    pub fn assemble(
        request: &AllocationRequest,
        period: FeedingPeriod,
        costs: &CostBreakdown,
        shed_id: i64,
    ) -> Self {
        Self {
            id: None,
            week_number: request.week_number.clone(),
            food_type: request.food_type.clone(),
            grams_per_chicken: request.grams_per_chicken,
            total_weight_kg: costs.total_weight_kg,
            total_cost: costs.total_cost,
            start_date: period.start_date,
            end_date: period.end_date,
            shed_name: request.shed_name.clone(),
            shed_id,
            flock_id: request.flock_id,
            status: RecordStatus::Active,
        }
    }

    /// Returns a copy with the mutable fields overwritten from a new
    /// allocation. Identifier, period window and status never change here.
    pub fn with_allocation(
        &self,
        request: &AllocationRequest,
        costs: &CostBreakdown,
        shed_id: i64,
    ) -> Self {
        Self {
            id: self.id,
            week_number: request.week_number.clone(),
            food_type: request.food_type.clone(),
            grams_per_chicken: request.grams_per_chicken,
            total_weight_kg: costs.total_weight_kg,
            total_cost: costs.total_cost,
            start_date: self.start_date,
            end_date: self.end_date,
            shed_name: request.shed_name.clone(),
            shed_id,
            flock_id: request.flock_id,
            status: self.status,
        }
    }

    /// True when the two records share at least one calendar date.
    pub fn overlaps(&self, other: &CostRecord) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}
