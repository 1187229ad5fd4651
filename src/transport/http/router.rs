use crate::domain::model::{Developer, DeveloperInput, DeveloperRef, Game, NewGame};
use crate::transport::http::handlers::{developers, games, health};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        developers::list_developers_handler,
        developers::get_developer_handler,
        developers::create_developer_handler,
        developers::update_developer_handler,
        developers::delete_developer_handler,
        games::list_games_handler,
        games::get_game_handler,
        games::create_game_handler,
        games::toggle_availability_handler,
        games::delete_game_handler,
        games::games_by_developer_handler
    ),
    components(schemas(ApiResponse, Developer, DeveloperInput, Game, NewGame, DeveloperRef))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/developers",
            get(developers::list_developers_handler).post(developers::create_developer_handler),
        )
        .route(
            "/developers/:id",
            get(developers::get_developer_handler)
                .put(developers::update_developer_handler)
                .delete(developers::delete_developer_handler),
        )
        .route(
            "/games",
            get(games::list_games_handler).post(games::create_game_handler),
        )
        .route(
            "/games/:id",
            get(games::get_game_handler)
                .put(games::toggle_availability_handler)
                .delete(games::delete_game_handler),
        )
        .route(
            "/games/developer/:name",
            get(games::games_by_developer_handler),
        )
        .with_state(app_state)
}
