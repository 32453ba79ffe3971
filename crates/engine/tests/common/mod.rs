use std::path::PathBuf;

use sea_orm::{Database, DatabaseConnection};

use engine::Engine;
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    connect("sqlite::memory:").await
}

/// A migrated SQLite file under `target/`, for tests that need several
/// pooled connections.
#[allow(dead_code)]
pub async fn engine_with_file_db() -> (Engine, DatabaseConnection) {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}.db", uuid::Uuid::new_v4()));
    connect(&format!("sqlite:{}?mode=rwc", path.display())).await
}

async fn connect(url: &str) -> (Engine, DatabaseConnection) {
    let db = Database::connect(url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build().await;
    (engine, db)
}
