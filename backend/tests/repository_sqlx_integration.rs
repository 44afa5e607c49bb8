use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use uuid::Uuid;

use backend::cost::model::{CostRecord, RecordStatus};
use backend::cost::repository::CostRecordRepository;
use backend::cost::repository_sqlx::SqlxCostRecordRepository;
use backend::db::schema;

/// Helper to setup an isolated, unique in-memory SQLite database.
/// Using a unique name in the connection string prevents "Table already
/// exists" errors during parallel test execution while still allowing
/// shared cache access.
async fn setup_db() -> AnyPool {
    sqlx::any::install_default_drivers();

    let db_name = Uuid::new_v4().to_string();
    let conn_str = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);

    let pool = AnyPoolOptions::new()
        .max_connections(5)
        .connect(&conn_str)
        .await
        .unwrap();

    schema::migrate(&pool).await.unwrap();

    pool
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn mk_record(shed_id: i64, start: &str, week: &str, status: RecordStatus) -> CostRecord {
    let start_date = date(start);
    CostRecord {
        id: None,
        week_number: week.to_string(),
        food_type: "Starter".to_string(),
        grams_per_chicken: dec("150"),
        total_weight_kg: dec("10.50"),
        total_cost: dec("42.00"),
        start_date,
        end_date: start_date + chrono::Duration::days(6),
        shed_name: "Shed North".to_string(),
        shed_id,
        flock_id: 4,
        status,
    }
}

#[tokio::test]
async fn insert_assigns_id_and_round_trips() {
    let pool = setup_db().await;
    let repo = SqlxCostRecordRepository::new(pool);

    let record = mk_record(3, "2025-02-10", "Week 1", RecordStatus::Active);
    let saved = repo.insert(&record).await.unwrap();

    let id = saved.id.expect("store must assign an id");

    let loaded = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.grams_per_chicken, dec("150"));
    assert_eq!(loaded.total_weight_kg, dec("10.50"));
    assert_eq!(loaded.total_cost, dec("42.00"));
    assert_eq!(loaded.start_date, date("2025-02-10"));
    assert_eq!(loaded.end_date, date("2025-02-16"));
    assert_eq!(loaded.status, RecordStatus::Active);
}

#[tokio::test]
async fn find_by_id_returns_none_when_absent() {
    let pool = setup_db().await;
    let repo = SqlxCostRecordRepository::new(pool);

    assert!(repo.find_by_id(404).await.unwrap().is_none());
}

#[tokio::test]
async fn most_recent_by_shed_orders_by_start_date() {
    let pool = setup_db().await;
    let repo = SqlxCostRecordRepository::new(pool);

    repo.insert(&mk_record(3, "2025-02-10", "Week 1", RecordStatus::Active))
        .await
        .unwrap();
    repo.insert(&mk_record(3, "2025-02-17", "Week 2", RecordStatus::Active))
        .await
        .unwrap();
    // Other shed; must not be visible for shed 3.
    repo.insert(&mk_record(9, "2025-03-01", "Week 1", RecordStatus::Active))
        .await
        .unwrap();

    let latest = repo.most_recent_by_shed(3).await.unwrap().unwrap();
    assert_eq!(latest.start_date, date("2025-02-17"));
    assert_eq!(latest.week_number, "Week 2");

    assert!(repo.most_recent_by_shed(77).await.unwrap().is_none());
}

#[tokio::test]
async fn list_by_status_filters_and_orders_by_id() {
    let pool = setup_db().await;
    let repo = SqlxCostRecordRepository::new(pool);

    let a = repo
        .insert(&mk_record(1, "2025-02-10", "Week 1", RecordStatus::Active))
        .await
        .unwrap();
    let i = repo
        .insert(&mk_record(1, "2025-02-17", "Week 2", RecordStatus::Inactive))
        .await
        .unwrap();
    let b = repo
        .insert(&mk_record(2, "2025-02-10", "Week 1", RecordStatus::Active))
        .await
        .unwrap();

    let actives = repo.list_by_status(RecordStatus::Active).await.unwrap();
    let active_ids: Vec<_> = actives.iter().map(|r| r.id).collect();
    assert_eq!(active_ids, vec![a.id, b.id]);

    let inactives = repo.list_by_status(RecordStatus::Inactive).await.unwrap();
    assert_eq!(inactives.len(), 1);
    assert_eq!(inactives[0].id, i.id);
}

#[tokio::test]
async fn week_search_is_case_insensitive_and_active_only() {
    let pool = setup_db().await;
    let repo = SqlxCostRecordRepository::new(pool);

    repo.insert(&mk_record(1, "2025-02-10", "Week 7", RecordStatus::Active))
        .await
        .unwrap();
    repo.insert(&mk_record(1, "2025-02-17", "WEEK 17", RecordStatus::Active))
        .await
        .unwrap();
    repo.insert(&mk_record(1, "2025-02-24", "week 7 extra", RecordStatus::Inactive))
        .await
        .unwrap();

    let hits = repo.list_by_week_number_contains("week 7").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].week_number, "Week 7");

    let hits = repo.list_by_week_number_contains("EEK 1").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].week_number, "WEEK 17");
}

#[tokio::test]
async fn update_overwrites_row_in_place() {
    let pool = setup_db().await;
    let repo = SqlxCostRecordRepository::new(pool);

    let saved = repo
        .insert(&mk_record(3, "2025-02-10", "Week 1", RecordStatus::Active))
        .await
        .unwrap();

    let mut changed = saved.clone();
    changed.week_number = "Week 1 (revised)".to_string();
    changed.total_cost = dec("55.13");
    changed.status = RecordStatus::Inactive;

    repo.update(&changed).await.unwrap();

    let loaded = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(loaded.week_number, "Week 1 (revised)");
    assert_eq!(loaded.total_cost, dec("55.13"));
    assert_eq!(loaded.status, RecordStatus::Inactive);
    // Window untouched by a field update.
    assert_eq!(loaded.start_date, date("2025-02-10"));
    assert_eq!(loaded.end_date, date("2025-02-16"));
}

#[tokio::test]
async fn update_without_matching_row_errors() {
    let pool = setup_db().await;
    let repo = SqlxCostRecordRepository::new(pool);

    let mut ghost = mk_record(3, "2025-02-10", "Week 1", RecordStatus::Active);
    ghost.id = Some(12345);

    assert!(repo.update(&ghost).await.is_err());
}

#[tokio::test]
async fn delete_by_id_removes_row() {
    let pool = setup_db().await;
    let repo = SqlxCostRecordRepository::new(pool);

    let saved = repo
        .insert(&mk_record(3, "2025-02-10", "Week 1", RecordStatus::Inactive))
        .await
        .unwrap();
    let id = saved.id.unwrap();

    repo.delete_by_id(id).await.unwrap();

    assert!(repo.find_by_id(id).await.unwrap().is_none());
}
