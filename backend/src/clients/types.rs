use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// One feed-inventory row as served by the feed service listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedInfo {
    #[serde(rename = "idFood")]
    pub id: i64,

    /// Stock quantity on hand. The upstream service omits the field for
    /// depleted feeds, so absence and zero are both "nothing available".
    #[serde(rename = "amount", default)]
    pub available_amount: Option<Decimal>,
}

/// One flock batch as served by the flock directory listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlockInfo {
    pub id: i64,
    pub arrival_date: NaiveDate,
    pub shed_id: i64,
}
