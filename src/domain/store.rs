//! Capability traits for developer and game storage.
//!
//! The library service only ever sees these traits. Implementations live in
//! [`crate::storage`]: a PostgreSQL-backed one and an in-memory one.

use crate::domain::error::Result;
use crate::domain::model::{Developer, DeveloperInput, EntityId, Game, GameDraft};
use async_trait::async_trait;

/// CRUD over developer records.
#[async_trait]
pub trait DeveloperStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Developer>>;

    /// Returns `NotFound` if no developer has this id.
    async fn get_by_id(&self, id: &EntityId) -> Result<Developer>;

    /// Exact name match. When several developers share the name, the one
    /// with the lowest id is returned.
    async fn find_by_name(&self, name: &str) -> Result<Option<Developer>>;

    /// Stores a new developer under a freshly generated id.
    async fn insert(&self, developer: DeveloperInput) -> Result<Developer>;

    /// Overwrites every attribute of the developer. The id is never changed.
    async fn update_by_id(&self, id: &EntityId, developer: DeveloperInput) -> Result<()>;

    async fn delete_by_id(&self, id: &EntityId) -> Result<()>;

    /// Storage liveness check.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// CRUD over game records plus developer-scoped queries.
///
/// `insert` does not check that the embedded developer exists; that is done
/// by the library service.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Game>>;

    async fn get_by_id(&self, id: &EntityId) -> Result<Game>;

    async fn insert(&self, game: GameDraft) -> Result<Game>;

    /// Flips `available` and returns the updated game.
    ///
    /// This is a read followed by a separate write of the `available` field,
    /// not an atomic toggle: two concurrent calls on the same game can both
    /// read the same value, and one flip is then lost.
    async fn update_availability(&self, id: &EntityId) -> Result<Game>;

    async fn delete_by_id(&self, id: &EntityId) -> Result<()>;

    async fn find_by_developer_id(&self, developer_id: &EntityId) -> Result<Vec<Game>>;

    /// Removes every game whose embedded developer has this id and returns how many were removed.
    async fn delete_all_by_developer_id(&self, developer_id: &EntityId) -> Result<u64>;
}
