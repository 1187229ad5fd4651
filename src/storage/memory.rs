//! In-memory stores with the same observable behavior as the PostgreSQL ones.

use crate::domain::error::{LibraryError, Result};
use crate::domain::model::{Developer, DeveloperInput, EntityId, Game, GameDraft};
use crate::domain::store::{DeveloperStore, GameStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryDeveloperStore {
    developers: RwLock<BTreeMap<EntityId, Developer>>,
}

impl MemoryDeveloperStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeveloperStore for MemoryDeveloperStore {
    async fn get_all(&self) -> Result<Vec<Developer>> {
        Ok(self.developers.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &EntityId) -> Result<Developer> {
        self.developers
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| LibraryError::not_found("developer", id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Developer>> {
        // BTreeMap iterates in id order, so the first hit has the lowest id.
        Ok(self
            .developers
            .read()
            .await
            .values()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn insert(&self, developer: DeveloperInput) -> Result<Developer> {
        let developer = developer.into_developer(EntityId::generate());
        self.developers
            .write()
            .await
            .insert(developer.id, developer.clone());
        Ok(developer)
    }

    async fn update_by_id(&self, id: &EntityId, developer: DeveloperInput) -> Result<()> {
        let mut developers = self.developers.write().await;
        let slot = developers
            .get_mut(id)
            .ok_or_else(|| LibraryError::not_found("developer", id))?;
        *slot = developer.into_developer(*id);
        Ok(())
    }

    async fn delete_by_id(&self, id: &EntityId) -> Result<()> {
        self.developers
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| LibraryError::not_found("developer", id))
    }
}

#[derive(Default)]
pub struct MemoryGameStore {
    games: RwLock<BTreeMap<EntityId, Game>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn get_all(&self) -> Result<Vec<Game>> {
        Ok(self.games.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &EntityId) -> Result<Game> {
        self.games
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| LibraryError::not_found("game", id))
    }

    async fn insert(&self, game: GameDraft) -> Result<Game> {
        let game = game.into_game(EntityId::generate());
        self.games.write().await.insert(game.id, game.clone());
        Ok(game)
    }

    async fn update_availability(&self, id: &EntityId) -> Result<Game> {
        // Read and write take the lock separately, mirroring the two storage
        // round trips of the PostgreSQL store.
        let current = self.get_by_id(id).await?;
        let available = !current.available;

        let mut games = self.games.write().await;
        let game = games
            .get_mut(id)
            .ok_or_else(|| LibraryError::not_found("game", id))?;
        game.available = available;
        Ok(game.clone())
    }

    async fn delete_by_id(&self, id: &EntityId) -> Result<()> {
        self.games
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| LibraryError::not_found("game", id))
    }

    async fn find_by_developer_id(&self, developer_id: &EntityId) -> Result<Vec<Game>> {
        Ok(self
            .games
            .read()
            .await
            .values()
            .filter(|g| g.developer.id == *developer_id)
            .cloned()
            .collect())
    }

    async fn delete_all_by_developer_id(&self, developer_id: &EntityId) -> Result<u64> {
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|_, g| g.developer.id != *developer_id);
        Ok((before - games.len()) as u64)
    }
}
