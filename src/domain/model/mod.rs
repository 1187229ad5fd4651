//! Domain model for the game library: developers, games and their identifiers.

pub mod developer;
pub mod game;
pub mod id;

pub use developer::{Developer, DeveloperInput};
pub use game::{DeveloperRef, Game, GameDraft, NewGame};
pub use id::EntityId;
