use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{AnyPool, Row};

use crate::cost::model::{CostRecord, RecordStatus};
use crate::cost::repository::CostRecordRepository;

const RECORD_COLUMNS: &str = r#"
  id, week_number, food_type, grams_per_chicken, total_weight_kg,
  total_cost, start_date, end_date, shed_name, shed_id, flock_id, status
"#;

/// SQLx-backed implementation of CostRecordRepository.
/// Responsible only for persistence and row mapping.
pub struct SqlxCostRecordRepository {
    pool: AnyPool,
}

impl SqlxCostRecordRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CostRecordRepository for SqlxCostRecordRepository {
    async fn most_recent_by_shed(&self, shed_id: i64) -> anyhow::Result<Option<CostRecord>> {
        let row = sqlx::query(&format!(
            r#"
SELECT {RECORD_COLUMNS}
FROM cost_records
WHERE shed_id = ?
ORDER BY start_date DESC
LIMIT 1;
"#
        ))
        .bind(shed_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(row_to_record(&r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<CostRecord>> {
        let row = sqlx::query(&format!(
            r#"
SELECT {RECORD_COLUMNS}
FROM cost_records
WHERE id = ?;
"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(row_to_record(&r)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, record: &CostRecord) -> anyhow::Result<CostRecord> {
        let row = sqlx::query(
            r#"
INSERT INTO cost_records (
  week_number, food_type, grams_per_chicken, total_weight_kg, total_cost,
  start_date, end_date, shed_name, shed_id, flock_id, status
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
RETURNING id;
"#,
        )
        .bind(&record.week_number)
        .bind(&record.food_type)
        .bind(record.grams_per_chicken.to_string())
        .bind(record.total_weight_kg.to_string())
        .bind(record.total_cost.to_string())
        .bind(record.start_date.to_string())
        .bind(record.end_date.to_string())
        .bind(&record.shed_name)
        .bind(record.shed_id)
        .bind(record.flock_id)
        .bind(record.status.code())
        .fetch_one(&self.pool)
        .await
        .context("insert cost record failed")?;

        let id: i64 = row.get("id");

        let mut saved = record.clone();
        saved.id = Some(id);
        Ok(saved)
    }

    async fn update(&self, record: &CostRecord) -> anyhow::Result<CostRecord> {
        let id = record
            .id
            .ok_or_else(|| anyhow!("cannot update a cost record without an id"))?;

        let result = sqlx::query(
            r#"
UPDATE cost_records
SET week_number = ?, food_type = ?, grams_per_chicken = ?,
    total_weight_kg = ?, total_cost = ?, start_date = ?, end_date = ?,
    shed_name = ?, shed_id = ?, flock_id = ?, status = ?
WHERE id = ?;
"#,
        )
        .bind(&record.week_number)
        .bind(&record.food_type)
        .bind(record.grams_per_chicken.to_string())
        .bind(record.total_weight_kg.to_string())
        .bind(record.total_cost.to_string())
        .bind(record.start_date.to_string())
        .bind(record.end_date.to_string())
        .bind(&record.shed_name)
        .bind(record.shed_id)
        .bind(record.flock_id)
        .bind(record.status.code())
        .bind(id)
        .execute(&self.pool)
        .await
        .context("update cost record failed")?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("no cost record with id {id} to update"));
        }

        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM cost_records WHERE id = ?;"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete cost record failed")?;

        Ok(())
    }

    async fn list_by_status(&self, status: RecordStatus) -> anyhow::Result<Vec<CostRecord>> {
        let rows = sqlx::query(&format!(
            r#"
SELECT {RECORD_COLUMNS}
FROM cost_records
WHERE status = ?
ORDER BY id ASC;
"#
        ))
        .bind(status.code())
        .fetch_all(&self.pool)
        .await?;

        collect_records(rows)
    }

    async fn list_by_week_number_contains(
        &self,
        fragment: &str,
    ) -> anyhow::Result<Vec<CostRecord>> {
        let rows = sqlx::query(&format!(
            r#"
SELECT {RECORD_COLUMNS}
FROM cost_records
WHERE LOWER(week_number) LIKE '%' || LOWER(?) || '%' AND status = 'A'
ORDER BY id ASC;
"#
        ))
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;

        collect_records(rows)
    }
}

/* =========================
Row mapping + conversions
========================= */

fn collect_records(rows: Vec<sqlx::any::AnyRow>) -> anyhow::Result<Vec<CostRecord>> {
    let mut out = Vec::with_capacity(rows.len());
    for r in &rows {
        match row_to_record(r) {
            Ok(record) => out.push(record),
            Err(e) => {
                // poison-row resilience: skip but don't fail the listing
                tracing::warn!(error = %e, "skipping malformed cost record row");
            }
        }
    }
    Ok(out)
}

fn row_to_record(r: &sqlx::any::AnyRow) -> anyhow::Result<CostRecord> {
    let status_code: String = r.get("status");
    let status = RecordStatus::from_code(&status_code)
        .ok_or_else(|| anyhow!("unknown status code: {status_code}"))?;

    Ok(CostRecord {
        id: Some(r.get::<i64, _>("id")),
        week_number: r.get::<String, _>("week_number"),
        food_type: r.get::<String, _>("food_type"),
        grams_per_chicken: parse_decimal(r, "grams_per_chicken")?,
        total_weight_kg: parse_decimal(r, "total_weight_kg")?,
        total_cost: parse_decimal(r, "total_cost")?,
        start_date: parse_date(r, "start_date")?,
        end_date: parse_date(r, "end_date")?,
        shed_name: r.get::<String, _>("shed_name"),
        shed_id: r.get::<i64, _>("shed_id"),
        flock_id: r.get::<i64, _>("flock_id"),
        status,
    })
}

fn parse_decimal(r: &sqlx::any::AnyRow, column: &str) -> anyhow::Result<Decimal> {
    r.get::<String, _>(column)
        .parse::<Decimal>()
        .with_context(|| format!("invalid decimal in column {column}"))
}

fn parse_date(r: &sqlx::any::AnyRow, column: &str) -> anyhow::Result<NaiveDate> {
    r.get::<String, _>(column)
        .parse::<NaiveDate>()
        .with_context(|| format!("invalid date in column {column}"))
}
