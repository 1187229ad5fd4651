//! End-to-end HTTP test over in-memory stores:
//! starts the real router on an ephemeral port and drives every route with reqwest.

use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use game_library_api::{transport, LibraryService, Stores};

async fn start_server() -> Result<(String, tokio::task::JoinHandle<()>), Box<dyn std::error::Error>> {
    let stores = Stores::in_memory();
    let state = transport::http::AppState {
        library: Arc::new(LibraryService::new(
            stores.developers,
            stores.games,
            tracing::Dispatch::none(),
        )),
        request_timeout: Duration::from_secs(5),
    };
    let router = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok((format!("http://{}", addr), server))
}

async fn create_developer(
    client: &reqwest::Client,
    base: &str,
    name: &str,
    hq: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let resp = client
        .post(format!("{}/developers", base))
        .json(&json!({ "name": name, "headquarters": hq }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = resp.json::<Value>().await?;
    Ok(body["data"]["id"].as_str().unwrap().to_string())
}

async fn create_game(
    client: &reqwest::Client,
    base: &str,
    title: &str,
    developer_id: &str,
    available: bool,
) -> Result<reqwest::Response, Box<dyn std::error::Error>> {
    Ok(client
        .post(format!("{}/games", base))
        .json(&json!({
            "title": title,
            "genre": "adventure",
            "publicationYear": 1986,
            "available": available,
            "developer": { "id": developer_id }
        }))
        .send()
        .await?)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_developer_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let (base, server) = start_server().await?;
    let client = reqwest::Client::new();

    // Create: generated id, stored record matches input.
    let id = create_developer(&client, &base, "Nintendo", "Kyoto").await?;
    let got = client
        .get(format!("{}/developers/{}", base, id))
        .send()
        .await?;
    assert_eq!(got.status(), StatusCode::OK);
    let got = got.json::<Value>().await?;
    assert_eq!(
        got["data"],
        json!({ "id": id, "name": "Nintendo", "headquarters": "Kyoto" })
    );

    // Update with a different id in the body: the path id wins.
    let other_id = "00000000-0000-4000-8000-000000000000";
    let updated = client
        .put(format!("{}/developers/{}", base, id))
        .json(&json!({ "id": other_id, "name": "Nintendo EPD", "headquarters": "Tokyo" }))
        .send()
        .await?;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = updated.json::<Value>().await?;
    assert!(updated["success"].as_bool().unwrap_or(false));
    assert!(updated.get("data").is_none());

    let list = client
        .get(format!("{}/developers", base))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let list = list["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["headquarters"], "Tokyo");

    let missing = client
        .get(format!("{}/developers/{}", base, other_id))
        .send()
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let malformed = client
        .get(format!("{}/developers/not-an-id", base))
        .send()
        .await?;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

    let bad_body = client
        .post(format!("{}/developers", base))
        .header("content-type", "application/json")
        .body("{\"name\": 42}")
        .send()
        .await?;
    assert_eq!(bad_body.status(), StatusCode::BAD_REQUEST);

    server.abort();
    let _ = server.await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_game_referential_integrity_and_toggle() -> Result<(), Box<dyn std::error::Error>> {
    let (base, server) = start_server().await?;
    let client = reqwest::Client::new();

    // Unknown developer: rejected, nothing stored.
    let rejected = create_game(
        &client,
        &base,
        "Zelda",
        "11111111-1111-4111-8111-111111111111",
        true,
    )
    .await?;
    assert_eq!(rejected.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let rejected = rejected.json::<Value>().await?;
    assert_eq!(rejected["data"]["kind"], "referential_integrity_violation");
    let games = client
        .get(format!("{}/games", base))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(games["data"], json!([]));

    // Known developer: created with the stored developer embedded.
    let dev_id = create_developer(&client, &base, "Nintendo", "Kyoto").await?;
    let created = create_game(&client, &base, "Zelda", &dev_id, false).await?;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = created.json::<Value>().await?;
    let game_id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["developer"]["name"], "Nintendo");
    assert_eq!(created["data"]["available"], false);

    // Toggle twice.
    for expected in [true, false] {
        let toggled = client
            .put(format!("{}/games/{}", base, game_id))
            .send()
            .await?;
        assert_eq!(toggled.status(), StatusCode::OK);
        let got = client
            .get(format!("{}/games/{}", base, game_id))
            .send()
            .await?
            .json::<Value>()
            .await?;
        assert_eq!(got["data"]["available"], expected);
    }

    // Delete the game, then it is gone.
    let deleted = client
        .delete(format!("{}/games/{}", base, game_id))
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let again = client
        .delete(format!("{}/games/{}", base, game_id))
        .send()
        .await?;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    server.abort();
    let _ = server.await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cascade_delete_and_games_by_developer() -> Result<(), Box<dyn std::error::Error>> {
    let (base, server) = start_server().await?;
    let client = reqwest::Client::new();

    let a = create_developer(&client, &base, "A", "Osaka").await?;
    let b = create_developer(&client, &base, "B", "Seattle").await?;
    for title in ["first", "second"] {
        let resp = create_game(&client, &base, title, &a, true).await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    let resp = create_game(&client, &base, "other", &b, true).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let by_a = client
        .get(format!("{}/games/developer/A", base))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(by_a["data"].as_array().unwrap().len(), 2);

    let deleted = client
        .delete(format!("{}/developers/{}", base, a))
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // Developer gone, its games gone, B untouched.
    let gone = client
        .get(format!("{}/developers/{}", base, a))
        .send()
        .await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let games = client
        .get(format!("{}/games", base))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let games = games["data"].as_array().unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0]["developer"]["id"], b);

    let by_a = client
        .get(format!("{}/games/developer/A", base))
        .send()
        .await?;
    assert_eq!(by_a.status(), StatusCode::NOT_FOUND);
    let by_a = by_a.json::<Value>().await?;
    assert_eq!(by_a["data"]["kind"], "not_found");

    // Deleting again reports the failed cascade step.
    let again = client
        .delete(format!("{}/developers/{}", base, a))
        .send()
        .await?;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    let again = again.json::<Value>().await?;
    assert_eq!(again["data"]["step"], "delete_developer");

    let health = client.get(format!("{}/health", base)).send().await?;
    assert_eq!(health.status(), StatusCode::OK);

    server.abort();
    let _ = server.await;
    Ok(())
}
