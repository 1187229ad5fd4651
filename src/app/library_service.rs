//! The library service.
//!
//! Sits between the HTTP handlers and the two stores and owns every decision
//! that spans developers and games:
//! 1.  A game may only be created for a developer that exists at that moment.
//! 2.  Deleting a developer first deletes its games, then the developer.
//! 3.  Games are looked up by developer name through the developer store.
//!
//! None of this is transactional. Each operation awaits its storage calls one
//! after another, in a fixed order, and reports the first failure unchanged
//! (annotated with the step for multi-step operations). Nothing is retried or
//! rolled back here.

use crate::domain::error::{ErrorKind, LibraryError, OperationStep, Result};
use crate::domain::model::{Developer, DeveloperInput, EntityId, Game, GameDraft, NewGame};
use crate::domain::store::{DeveloperStore, GameStore};
use std::future::Future;
use std::sync::Arc;
use tracing::instrument::WithSubscriber;
use tracing::Dispatch;

pub struct LibraryService {
    developers: Arc<dyn DeveloperStore>,
    games: Arc<dyn GameStore>,
    logger: Dispatch,
}

impl LibraryService {
    /// `logger` receives every event the service emits. Pass `Dispatch::none()` to silence it.
    pub fn new(
        developers: Arc<dyn DeveloperStore>,
        games: Arc<dyn GameStore>,
        logger: Dispatch,
    ) -> Self {
        Self {
            developers,
            games,
            logger,
        }
    }

    /// Runs `fut` with the service's logger as the default subscriber.
    async fn logged<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        fut.with_subscriber(self.logger.clone()).await
    }

    pub async fn health(&self) -> Result<()> {
        self.logged(async {
            self.developers
                .ping()
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "storage ping failed"))
        })
        .await
    }

    // --- Developers ---

    pub async fn list_developers(&self) -> Result<Vec<Developer>> {
        self.logged(async {
            self.developers
                .get_all()
                .await
                .inspect_err(|e| tracing::error!(error = %e, "error getting all developers"))
        })
        .await
    }

    pub async fn get_developer(&self, id: &str) -> Result<Developer> {
        self.logged(async {
            let id: EntityId = id.parse()?;
            self.developers.get_by_id(&id).await.inspect_err(|e| {
                tracing::error!(developer_id = %id, error = %e, "error getting developer by id")
            })
        })
        .await
    }

    pub async fn create_developer(&self, developer: DeveloperInput) -> Result<Developer> {
        self.logged(async {
            let created = self
                .developers
                .insert(developer)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "error adding developer"))?;
            tracing::info!(developer_id = %created.id, name = %created.name, "developer created");
            Ok(created)
        })
        .await
    }

    /// Replaces the developer's attributes. The id always comes from `id`,
    /// never from the body. Games keep the developer snapshot they were created with.
    pub async fn update_developer(&self, id: &str, developer: DeveloperInput) -> Result<()> {
        self.logged(async {
            let id: EntityId = id.parse()?;
            self.developers
                .update_by_id(&id, developer)
                .await
                .inspect_err(|e| {
                    tracing::error!(developer_id = %id, error = %e, "error updating developer")
                })
        })
        .await
    }

    /// Deletes the developer and all of its games, returning how many games were removed.
    ///
    /// Games go first. If that fails the developer is untouched and the call
    /// can simply be repeated. If the games are gone but the developer delete
    /// fails, the developer is left without games, which is harmless; the
    /// reverse order could leave games pointing at a deleted developer.
    pub async fn delete_developer(&self, id: &str) -> Result<u64> {
        self.logged(async {
            let id: EntityId = id.parse()?;

            let games_removed = self
                .games
                .delete_all_by_developer_id(&id)
                .await
                .map_err(|e| {
                    tracing::error!(developer_id = %id, error = %e, "error deleting games by developer");
                    e.during(OperationStep::DeleteDeveloperGames)
                })?;
            tracing::debug!(developer_id = %id, games_removed, "developer games deleted");

            self.developers.delete_by_id(&id).await.map_err(|e| {
                tracing::error!(
                    developer_id = %id,
                    games_removed,
                    error = %e,
                    "error deleting developer after its games were removed"
                );
                e.during(OperationStep::DeleteDeveloper)
            })?;

            tracing::info!(developer_id = %id, games_removed, "developer deleted");
            Ok(games_removed)
        })
        .await
    }

    // --- Games ---

    pub async fn list_games(&self) -> Result<Vec<Game>> {
        self.logged(async {
            self.games
                .get_all()
                .await
                .inspect_err(|e| tracing::error!(error = %e, "error getting all games"))
        })
        .await
    }

    pub async fn get_game(&self, id: &str) -> Result<Game> {
        self.logged(async {
            let id: EntityId = id.parse()?;
            self.games.get_by_id(&id).await.inspect_err(|e| {
                tracing::error!(game_id = %id, error = %e, "error getting game by id")
            })
        })
        .await
    }

    /// Creates a game for an existing developer.
    ///
    /// The stored game embeds the developer record as read here, not the
    /// developer object from the request. Fails with
    /// `ReferentialIntegrityViolation` and writes nothing if the developer
    /// does not exist.
    pub async fn create_game(&self, game: NewGame) -> Result<Game> {
        self.logged(async {
            let developer_id: EntityId = game.developer.id.parse()?;

            let developer = match self.developers.get_by_id(&developer_id).await {
                Ok(developer) => developer,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!(developer_id = %developer_id, "game rejected: developer does not exist");
                    return Err(LibraryError::ReferentialIntegrityViolation(format!(
                        "developer '{}' does not exist",
                        developer_id
                    )));
                }
                Err(e) => {
                    tracing::error!(developer_id = %developer_id, error = %e, "error resolving developer for new game");
                    return Err(e.during(OperationStep::ResolveDeveloper));
                }
            };

            // Known race: the developer can be deleted between the lookup above
            // and this insert, leaving a game whose developer no longer exists.
            let created = self
                .games
                .insert(GameDraft::new(game, developer))
                .await
                .map_err(|e| {
                    tracing::error!(developer_id = %developer_id, error = %e, "error adding game");
                    e.during(OperationStep::InsertGame)
                })?;

            tracing::info!(game_id = %created.id, developer_id = %developer_id, "game created");
            Ok(created)
        })
        .await
    }

    /// Flips the game's availability and returns the updated game.
    /// Concurrent toggles of the same game can lose an update.
    pub async fn toggle_availability(&self, id: &str) -> Result<Game> {
        self.logged(async {
            let id: EntityId = id.parse()?;
            let game = self.games.update_availability(&id).await.inspect_err(|e| {
                tracing::error!(game_id = %id, error = %e, "error updating game availability")
            })?;
            tracing::info!(game_id = %id, available = game.available, "game availability toggled");
            Ok(game)
        })
        .await
    }

    pub async fn delete_game(&self, id: &str) -> Result<()> {
        self.logged(async {
            let id: EntityId = id.parse()?;
            self.games.delete_by_id(&id).await.inspect_err(|e| {
                tracing::error!(game_id = %id, error = %e, "error deleting game")
            })
        })
        .await
    }

    /// Lists the games of the developer called `name` (exact match).
    ///
    /// Developer names are not unique; when several share `name`, the one with
    /// the lowest id is used.
    pub async fn find_games_by_developer_name(&self, name: &str) -> Result<Vec<Game>> {
        self.logged(async {
            let developer = self
                .developers
                .find_by_name(name)
                .await
                .inspect_err(|e| {
                    tracing::error!(developer_name = %name, error = %e, "error resolving developer name")
                })?
                .ok_or_else(|| LibraryError::not_found("developer", name))?;

            self.games
                .find_by_developer_id(&developer.id)
                .await
                .inspect_err(|e| {
                    tracing::error!(developer_name = %name, error = %e, "error finding games by developer")
                })
        })
        .await
    }
}
