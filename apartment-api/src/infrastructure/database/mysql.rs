use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::config::DatabaseConfig;
use crate::error::AppError;

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS apartments (
        flat_no INT NOT NULL PRIMARY KEY,
        owner_name VARCHAR(255) NOT NULL DEFAULT '',
        owner_surname VARCHAR(255) NOT NULL DEFAULT '',
        mail VARCHAR(255) NULL UNIQUE,
        password TEXT NOT NULL,
        dues_count INT NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS announcements (
        announcement_id INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS merchants (
        merchant_id VARCHAR(64) NOT NULL PRIMARY KEY,
        email VARCHAR(255) NOT NULL,
        settled BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
];

pub async fn init_mysql(config: &DatabaseConfig) -> Result<MySqlPool, AppError> {
    tracing::info!("Initializing MySQL connection pool");

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    ensure_schema(&pool).await?;

    Ok(pool)
}

/// 建表，已存在则跳过
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), AppError> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    // 旧库的 merchants 表没有 settled 列
    let (columns,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM information_schema.COLUMNS
        WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = 'merchants' AND COLUMN_NAME = 'settled'
        "#,
    )
    .fetch_one(pool)
    .await?;

    if columns == 0 {
        tracing::info!("Adding settled column to merchants");
        sqlx::query("ALTER TABLE merchants ADD COLUMN settled BOOLEAN NOT NULL DEFAULT FALSE")
            .execute(pool)
            .await?;
    }

    tracing::debug!("Database schema ready");
    Ok(())
}
