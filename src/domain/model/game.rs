use crate::domain::model::{Developer, EntityId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored game record.
///
/// `developer` is a snapshot of the developer taken when the game was created.
/// Later changes to the developer record are not reflected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[schema(value_type = String, format = Uuid)]
    pub id: EntityId,
    pub title: String,
    pub genre: String,
    pub publication_year: i32,
    pub available: bool,
    pub developer: Developer,
}

/// Request body for creating a game.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub title: String,
    pub genre: String,
    pub publication_year: i32,
    #[serde(default)]
    pub available: bool,
    pub developer: DeveloperRef,
}

/// The embedded developer of a [`NewGame`] body. Only the id is read; the
/// stored game embeds the developer record as it exists at creation time.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DeveloperRef {
    pub id: String,
}

/// A validated game ready to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDraft {
    pub title: String,
    pub genre: String,
    pub publication_year: i32,
    pub available: bool,
    pub developer: Developer,
}

impl GameDraft {
    pub fn new(game: NewGame, developer: Developer) -> Self {
        Self {
            title: game.title,
            genre: game.genre,
            publication_year: game.publication_year,
            available: game.available,
            developer,
        }
    }

    pub fn into_game(self, id: EntityId) -> Game {
        Game {
            id,
            title: self.title,
            genre: self.genre,
            publication_year: self.publication_year,
            available: self.available,
            developer: self.developer,
        }
    }
}
