//! Database Module
//!
//! Handles the SQLite connection pool, migrations and initial data.

pub mod repository;

use shared::AppError;
use shared::models::{LOYAL_ROLE, NORMAL_ROLE};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Create a new database service with WAL mode
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        // Build connection options: WAL, foreign keys, normal sync.
        // busy_timeout 在每个连接上生效: 写冲突时等待 5s 而非立即失败
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        // Run migrations (ignore previously applied but now removed migrations)
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        seed_default_users(&pool).await?;

        Ok(Self { pool })
    }
}

/// Seed default accounts on first start (empty user table only).
///
/// Password hashes must be produced at runtime: argon2 salts are random,
/// so they cannot live in a migration file.
async fn seed_default_users(pool: &SqlitePool) -> Result<(), AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count users: {e}")))?;

    if count > 0 {
        return Ok(());
    }

    for (username, password, role) in [("alice", "password", LOYAL_ROLE), ("bob", "password", NORMAL_ROLE)]
    {
        let hash = repository::user::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

        sqlx::query(
            "INSERT INTO user (username, password_hash, role_id)
             SELECT ?, ?, role_id FROM role WHERE name = ?",
        )
        .bind(username)
        .bind(hash)
        .bind(role)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to seed user {username}: {e}")))?;
    }

    tracing::info!("Seeded default users (alice/loyal, bob/normal)");
    Ok(())
}
