use crate::domain::model::NewGame;
use crate::transport::http::handlers::common::{data_response, error_response, within_deadline};
use crate::transport::http::types::{json_400, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const GAME_BODY: &str = "{\"title\": string, \"genre\": string, \"publicationYear\": int, \"available\"?: bool, \"developer\": {\"id\": string}}";

#[utoipa::path(
    get,
    path = "/games",
    responses(
        (status = 200, description = "All games", body = ApiResponse),
        (status = 500, description = "Storage error", body = ApiResponse)
    )
)]
pub async fn list_games_handler(State(state): State<AppState>) -> Response {
    match within_deadline(&state, state.library.list_games()).await {
        Ok(games) => data_response(StatusCode::OK, &games),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    get,
    path = "/games/{id}",
    params(
        ("id" = String, Path, description = "Game id")
    ),
    responses(
        (status = 200, description = "The game", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "No such game", body = ApiResponse)
    )
)]
pub async fn get_game_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match within_deadline(&state, state.library.get_game(&id)).await {
        Ok(game) => data_response(StatusCode::OK, &game),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    post,
    path = "/games",
    request_body = NewGame,
    responses(
        (status = 201, description = "Game created; data carries the generated id", body = ApiResponse),
        (status = 400, description = "Invalid JSON body or malformed developer id", body = ApiResponse),
        (status = 500, description = "Referenced developer does not exist (data.kind = referential_integrity_violation) or storage error (data.step names the failed step)", body = ApiResponse)
    )
)]
pub async fn create_game_handler(
    State(state): State<AppState>,
    request: Result<Json<NewGame>, JsonRejection>,
) -> Response {
    let Json(game) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, GAME_BODY).into_response(),
    };

    match within_deadline(&state, state.library.create_game(game)).await {
        Ok(created) => data_response(StatusCode::CREATED, &created),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    put,
    path = "/games/{id}",
    params(
        ("id" = String, Path, description = "Game id")
    ),
    responses(
        (status = 200, description = "Availability flipped; data carries the updated game", body = ApiResponse),
        (status = 404, description = "No such game", body = ApiResponse),
        (status = 500, description = "Storage error", body = ApiResponse)
    )
)]
pub async fn toggle_availability_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match within_deadline(&state, state.library.toggle_availability(&id)).await {
        Ok(game) => data_response(StatusCode::OK, &game),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    delete,
    path = "/games/{id}",
    params(
        ("id" = String, Path, description = "Game id")
    ),
    responses(
        (status = 204, description = "Game deleted"),
        (status = 404, description = "No such game", body = ApiResponse),
        (status = 500, description = "Storage error", body = ApiResponse)
    )
)]
pub async fn delete_game_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match within_deadline(&state, state.library.delete_game(&id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    get,
    path = "/games/developer/{name}",
    params(
        ("name" = String, Path, description = "Exact developer name")
    ),
    responses(
        (status = 200, description = "Games of the developer", body = ApiResponse),
        (status = 404, description = "No developer has this name", body = ApiResponse),
        (status = 500, description = "Storage error", body = ApiResponse)
    )
)]
pub async fn games_by_developer_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match within_deadline(&state, state.library.find_games_by_developer_name(&name)).await {
        Ok(games) => data_response(StatusCode::OK, &games),
        Err(e) => error_response(&e),
    }
}
