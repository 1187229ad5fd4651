//! Persistent developer and game stores backed by PostgreSQL.
//!
//! Both stores share one `PgPool`. Games keep the developer snapshot as a JSONB
//! document next to a plain `developer_id` column used for filtering.

use crate::domain::error::{LibraryError, Result};
use crate::domain::model::{Developer, DeveloperInput, EntityId, Game, GameDraft};
use crate::domain::store::{DeveloperStore, GameStore};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::{Json, Uuid};
use sqlx::{PgPool, Row};

/// Connects a pool to `database_url`.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the `developers` and `games` tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS developers (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            headquarters TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS developers_name_idx ON developers (name)")
        .execute(pool)
        .await?;

    // No foreign key on developer_id: the library service enforces the reference.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS games (
            id UUID PRIMARY KEY,
            title TEXT NOT NULL,
            genre TEXT NOT NULL,
            publication_year INTEGER NOT NULL,
            available BOOLEAN NOT NULL,
            developer_id UUID NOT NULL,
            developer JSONB NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS games_developer_id_idx ON games (developer_id)")
        .execute(pool)
        .await?;

    Ok(())
}

fn developer_from_row(row: &PgRow) -> Result<Developer> {
    let id: Uuid = row.try_get("id")?;
    Ok(Developer {
        id: EntityId::from_uuid(id),
        name: row.try_get("name")?,
        headquarters: row.try_get("headquarters")?,
    })
}

fn game_from_row(row: &PgRow) -> Result<Game> {
    let id: Uuid = row.try_get("id")?;
    let developer: Json<Developer> = row.try_get("developer")?;
    Ok(Game {
        id: EntityId::from_uuid(id),
        title: row.try_get("title")?,
        genre: row.try_get("genre")?,
        publication_year: row.try_get("publication_year")?,
        available: row.try_get("available")?,
        developer: developer.0,
    })
}

#[derive(Clone)]
pub struct PgDeveloperStore {
    pool: PgPool,
}

impl PgDeveloperStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeveloperStore for PgDeveloperStore {
    async fn get_all(&self) -> Result<Vec<Developer>> {
        let rows = sqlx::query("SELECT id, name, headquarters FROM developers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(developer_from_row).collect()
    }

    async fn get_by_id(&self, id: &EntityId) -> Result<Developer> {
        let row = sqlx::query("SELECT id, name, headquarters FROM developers WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => developer_from_row(&row),
            None => Err(LibraryError::not_found("developer", id)),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Developer>> {
        let row = sqlx::query(
            "SELECT id, name, headquarters FROM developers WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(developer_from_row).transpose()
    }

    async fn insert(&self, developer: DeveloperInput) -> Result<Developer> {
        let developer = developer.into_developer(EntityId::generate());
        sqlx::query("INSERT INTO developers (id, name, headquarters) VALUES ($1, $2, $3)")
            .bind(developer.id.as_uuid())
            .bind(&developer.name)
            .bind(&developer.headquarters)
            .execute(&self.pool)
            .await?;
        Ok(developer)
    }

    async fn update_by_id(&self, id: &EntityId, developer: DeveloperInput) -> Result<()> {
        let result =
            sqlx::query("UPDATE developers SET name = $2, headquarters = $3 WHERE id = $1")
                .bind(id.as_uuid())
                .bind(&developer.name)
                .bind(&developer.headquarters)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(LibraryError::not_found("developer", id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &EntityId) -> Result<()> {
        let result = sqlx::query("DELETE FROM developers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(LibraryError::not_found("developer", id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgGameStore {
    pool: PgPool,
}

impl PgGameStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const GAME_COLUMNS: &str = "id, title, genre, publication_year, available, developer";

#[async_trait]
impl GameStore for PgGameStore {
    async fn get_all(&self) -> Result<Vec<Game>> {
        let rows = sqlx::query(&format!("SELECT {} FROM games ORDER BY id", GAME_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(game_from_row).collect()
    }

    async fn get_by_id(&self, id: &EntityId) -> Result<Game> {
        let row = sqlx::query(&format!("SELECT {} FROM games WHERE id = $1", GAME_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => game_from_row(&row),
            None => Err(LibraryError::not_found("game", id)),
        }
    }

    async fn insert(&self, game: GameDraft) -> Result<Game> {
        let game = game.into_game(EntityId::generate());
        sqlx::query(
            "INSERT INTO games (id, title, genre, publication_year, available, developer_id, developer)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(game.id.as_uuid())
        .bind(&game.title)
        .bind(&game.genre)
        .bind(game.publication_year)
        .bind(game.available)
        .bind(game.developer.id.as_uuid())
        .bind(Json(&game.developer))
        .execute(&self.pool)
        .await?;
        Ok(game)
    }

    async fn update_availability(&self, id: &EntityId) -> Result<Game> {
        let current = self.get_by_id(id).await?;
        let available = !current.available;

        let result = sqlx::query("UPDATE games SET available = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(available)
            .execute(&self.pool)
            .await?;
        // Deleted between the read and the write.
        if result.rows_affected() == 0 {
            return Err(LibraryError::not_found("game", id));
        }
        Ok(Game {
            available,
            ..current
        })
    }

    async fn delete_by_id(&self, id: &EntityId) -> Result<()> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(LibraryError::not_found("game", id));
        }
        Ok(())
    }

    async fn find_by_developer_id(&self, developer_id: &EntityId) -> Result<Vec<Game>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM games WHERE developer_id = $1 ORDER BY id",
            GAME_COLUMNS
        ))
        .bind(developer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(game_from_row).collect()
    }

    async fn delete_all_by_developer_id(&self, developer_id: &EntityId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM games WHERE developer_id = $1")
            .bind(developer_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
