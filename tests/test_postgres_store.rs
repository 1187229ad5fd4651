//! Store behavior against a real PostgreSQL.
//!
//! Runs only when DATABASE_URL is set (a `.env` file works too); otherwise it
//! returns early. Each run uses fresh ids and only cleans up what it created.

use game_library_api::domain::model::GameDraft;
use game_library_api::storage::postgres;
use game_library_api::storage::{PgDeveloperStore, PgGameStore};
use game_library_api::{DeveloperInput, DeveloperStore, EntityId, ErrorKind, GameStore};
use std::env;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_stores() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping PostgreSQL store test");
        return Ok(());
    };

    let pool = postgres::connect(&database_url, 2).await?;
    postgres::ensure_schema(&pool).await?;
    // Idempotent.
    postgres::ensure_schema(&pool).await?;

    let developers = PgDeveloperStore::new(pool.clone());
    let games = PgGameStore::new(pool);
    developers.ping().await?;

    let name = format!("pg-test-{}", EntityId::generate());
    let dev = developers
        .insert(DeveloperInput {
            name: name.clone(),
            headquarters: "Kyoto".to_string(),
        })
        .await?;
    assert_eq!(developers.get_by_id(&dev.id).await?, dev);
    assert_eq!(developers.find_by_name(&name).await?, Some(dev.clone()));

    developers
        .update_by_id(
            &dev.id,
            DeveloperInput {
                name: name.clone(),
                headquarters: "Tokyo".to_string(),
            },
        )
        .await?;
    assert_eq!(developers.get_by_id(&dev.id).await?.headquarters, "Tokyo");

    let game = games
        .insert(GameDraft {
            title: "Zelda".to_string(),
            genre: "adventure".to_string(),
            publication_year: 1986,
            available: false,
            developer: dev.clone(),
        })
        .await?;
    assert_eq!(games.get_by_id(&game.id).await?, game);

    let toggled = games.update_availability(&game.id).await?;
    assert!(toggled.available);
    assert!(games.get_by_id(&game.id).await?.available);

    assert_eq!(games.find_by_developer_id(&dev.id).await?, vec![toggled]);
    assert_eq!(games.delete_all_by_developer_id(&dev.id).await?, 1);
    assert!(games.find_by_developer_id(&dev.id).await?.is_empty());

    developers.delete_by_id(&dev.id).await?;
    let err = developers.get_by_id(&dev.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = developers.delete_by_id(&dev.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    Ok(())
}
