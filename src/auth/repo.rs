use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};

/// Access to the credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Append a user row. Never checks for an existing email.
    async fn create(&self, user: NewUser<'_>) -> anyhow::Result<User>;
    /// All rows with exactly this email, oldest first.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Vec<User>>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser<'_>) -> anyhow::Result<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(email)
        .fetch_all(&self.db)
        .await
        .context("find users by email")?;
        Ok(rows)
    }
}

/// In-process store for tests and database-less runs.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored row.
    pub fn rows(&self) -> Vec<User> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser<'_>) -> anyhow::Result<User> {
        let row = User {
            id: Uuid::new_v4(),
            name: user.name.to_string(),
            email: user.email.to_string(),
            password_hash: user.password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| anyhow::anyhow!("user store lock poisoned"))?;
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Vec<User>> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| anyhow::anyhow!("user store lock poisoned"))?;
        Ok(rows.iter().filter(|u| u.email == email).cloned().collect())
    }
}
