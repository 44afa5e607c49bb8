use sqlx::AnyPool;

pub async fn migrate(pool: &AnyPool) -> anyhow::Result<()> {
    // Cost records. Monetary and weight columns are stored as TEXT at a
    // fixed 2-decimal scale; dates are ISO-8601 TEXT; status is the
    // single-character code 'A' / 'I'.
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS cost_records (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  week_number TEXT NOT NULL,
  food_type TEXT NOT NULL,
  grams_per_chicken TEXT NOT NULL,
  total_weight_kg TEXT NOT NULL,
  total_cost TEXT NOT NULL,
  start_date TEXT NOT NULL,
  end_date TEXT NOT NULL,
  shed_name TEXT NOT NULL,
  shed_id BIGINT NOT NULL,
  flock_id BIGINT NOT NULL,
  status TEXT NOT NULL CHECK (status IN ('A','I'))
);
"#,
    )
    .execute(pool)
    .await?;

    // The period resolver reads "most recent record for a shed" on every
    // insert; this index backs that query.
    sqlx::query(
        r#"CREATE INDEX IF NOT EXISTS idx_cost_records_shed_start ON cost_records(shed_id, start_date);"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(r#"CREATE INDEX IF NOT EXISTS idx_cost_records_status ON cost_records(status);"#)
        .execute(pool)
        .await?;

    Ok(())
}
