//! Postgres implementation of the directory store.

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::domain::records::{DoctorRow, NewDoctorRow, NewQuestionRow, QuestionRow};
use crate::infra::config;
use crate::storage::directory::DirectoryStore;

/// Directory mirror backed by a PostgreSQL connection pool.
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    /// Connects using `DATABASE_URL` and creates the tables when missing.
    pub async fn new() -> Result<Self> {
        let database_url = config::database_url();

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;

        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS doctors (
                wallet TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                specialization TEXT NOT NULL,
                is_verified BOOLEAN NOT NULL DEFAULT FALSE,
                rating BIGINT NOT NULL DEFAULT 0,
                review_count BIGINT NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS questions (
                id BIGSERIAL PRIMARY KEY,
                author_wallet TEXT NOT NULL,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                bounty_lamports BIGINT NOT NULL DEFAULT 0,
                is_answered BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl DirectoryStore for PostgresDirectory {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_doctors(&self) -> Result<Vec<DoctorRow>> {
        let rows = sqlx::query(
            "SELECT wallet, name, specialization, is_verified, rating, review_count, created_at
             FROM doctors ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut doctors = Vec::with_capacity(rows.len());
        for row in rows {
            doctors.push(DoctorRow {
                wallet: row.try_get("wallet")?,
                name: row.try_get("name")?,
                specialization: row.try_get("specialization")?,
                is_verified: row.try_get("is_verified")?,
                rating: row.try_get("rating")?,
                review_count: row.try_get("review_count")?,
                created_at: row.try_get("created_at")?,
            });
        }
        Ok(doctors)
    }

    async fn insert_doctor(&self, row: &NewDoctorRow) -> Result<()> {
        sqlx::query("INSERT INTO doctors (wallet, name, specialization) VALUES ($1, $2, $3)")
            .bind(&row.wallet)
            .bind(&row.name)
            .bind(&row.specialization)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_verified(&self, wallet: &str) -> Result<()> {
        sqlx::query("UPDATE doctors SET is_verified = TRUE WHERE wallet = $1")
            .bind(wallet)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRow>> {
        let rows = sqlx::query(
            "SELECT id, author_wallet, title, content, bounty_lamports, is_answered, created_at
             FROM questions ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(QuestionRow {
                id: row.try_get("id")?,
                author_wallet: row.try_get("author_wallet")?,
                title: row.try_get("title")?,
                content: row.try_get("content")?,
                bounty_lamports: row.try_get("bounty_lamports")?,
                is_answered: row.try_get("is_answered")?,
                created_at: row.try_get("created_at")?,
            });
        }
        Ok(questions)
    }

    async fn insert_question(&self, row: &NewQuestionRow) -> Result<()> {
        sqlx::query(
            "INSERT INTO questions (author_wallet, title, content, bounty_lamports)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&row.author_wallet)
        .bind(&row.title)
        .bind(&row.content)
        .bind(row.bounty_lamports)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
