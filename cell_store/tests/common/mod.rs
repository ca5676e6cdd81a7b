#![allow(dead_code)]

use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// A fresh sqlite database file inside a temporary directory. The directory
/// is removed when the returned `TempDir` is dropped.
pub fn sqlite_url() -> anyhow::Result<(TempDir, String)> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("location.db").display()
    );
    Ok((dir, url))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn count(session: &mut cell_store::Session, table: &str) -> anyhow::Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(session.connection())
        .await?;
    Ok(count)
}
