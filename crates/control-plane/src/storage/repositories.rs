// Repository layer for PostgreSQL
//
// Attendees live in event_attendees; EventRow.attendees is aggregated from it
// in join order.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::*;

/// Columns selected for every EventRow, attendees aggregated in join order
const EVENT_COLUMNS: &str = r#"
    e.id, e.name, e.description, e.date, e.location, e.category_id, e.creator_id,
    COALESCE(
        (SELECT array_agg(a.user_id ORDER BY a.joined_at, a.user_id)
         FROM event_attendees a
         WHERE a.event_id = e.id),
        '{}'::uuid[]
    ) AS attendees,
    e.created_at, e.updated_at
"#;

/// Insert or refresh a mirrored user profile
const UPSERT_USER: &str = r#"
    INSERT INTO users (id, email, name)
    VALUES ($1, $2, $3)
    ON CONFLICT (id) DO UPDATE
    SET email = EXCLUDED.email, name = EXCLUDED.name, updated_at = NOW()
    RETURNING id, email, name, created_at, updated_at
"#;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ============================================
    // Users
    // ============================================

    pub async fn upsert_user(&self, input: UpsertUserRow) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(UPSERT_USER)
            .bind(input.id)
            .bind(&input.email)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Categories
    // ============================================

    pub async fn create_category(&self, input: CreateCategoryRow) -> Result<CategoryRow> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Option<CategoryRow>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryRow>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        let id = Uuid::now_v7();
        sqlx::query(
            r#"
            INSERT INTO events (id, name, description, date, location, category_id, creator_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.date)
        .bind(&input.location)
        .bind(input.category_id)
        .bind(input.creator_id)
        .execute(&self.pool)
        .await?;

        self.get_event(id)
            .await?
            .context("Event vanished right after insert")
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.id = $1");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list_events(&self, filter: EventFilter) -> Result<Vec<EventRow>> {
        let sql = format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events e
            WHERE ($1::uuid IS NULL OR e.category_id = $1)
              AND ($2::uuid IS NULL OR e.creator_id = $2)
              AND ($3::uuid IS NULL OR EXISTS (
                    SELECT 1 FROM event_attendees a
                    WHERE a.event_id = e.id AND a.user_id = $3))
            ORDER BY e.created_at ASC, e.id ASC
            "#
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(filter.category_id)
            .bind(filter.creator_id)
            .bind(filter.attendee_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn update_event(&self, id: Uuid, input: UpdateEventRow) -> Result<Option<EventRow>> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET name = $2, description = $3, date = $4, location = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.date)
        .bind(&input.location)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_event(id).await
    }

    pub async fn delete_event(&self, id: Uuid) -> Result<bool> {
        // Attendee rows go with the event (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append a user to the attendee list in one transaction.
    /// The event row is locked and the primary key on event_attendees
    /// rejects duplicates, so concurrent attends cannot double-insert.
    /// The user is mirrored only once the event is known to exist.
    pub async fn add_attendee(&self, event_id: Uuid, user: UpsertUserRow) -> Result<AttendOutcome> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM events WHERE id = $1 FOR UPDATE")
            .bind(event_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(AttendOutcome::EventNotFound);
        }

        let user_id = sqlx::query_as::<_, UserRow>(UPSERT_USER)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.name)
            .fetch_one(&mut *tx)
            .await?
            .id;

        let inserted = sqlx::query(
            r#"
            INSERT INTO event_attendees (event_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (event_id, user_id) DO NOTHING
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            return Ok(AttendOutcome::AlreadyAttending);
        }

        let sql = format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.id = $1");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(AttendOutcome::Added(row))
    }
}
