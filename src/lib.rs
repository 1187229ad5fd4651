pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::LibraryService;
pub use domain::error::{ErrorKind, LibraryError, OperationStep};
pub use domain::model::{Developer, DeveloperInput, DeveloperRef, EntityId, Game, NewGame};
pub use domain::store::{DeveloperStore, GameStore};
pub use infra::config::AppConfig;
pub use storage::Stores;
