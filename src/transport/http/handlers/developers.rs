use crate::domain::model::DeveloperInput;
use crate::transport::http::handlers::common::{
    data_response, empty_response, error_response, within_deadline,
};
use crate::transport::http::types::{json_400, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const DEVELOPER_BODY: &str = "{\"name\": string, \"headquarters\": string}";

#[utoipa::path(
    get,
    path = "/developers",
    responses(
        (status = 200, description = "All developers", body = ApiResponse),
        (status = 500, description = "Storage error", body = ApiResponse)
    )
)]
pub async fn list_developers_handler(State(state): State<AppState>) -> Response {
    match within_deadline(&state, state.library.list_developers()).await {
        Ok(developers) => data_response(StatusCode::OK, &developers),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    get,
    path = "/developers/{id}",
    params(
        ("id" = String, Path, description = "Developer id")
    ),
    responses(
        (status = 200, description = "The developer", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "No such developer", body = ApiResponse)
    )
)]
pub async fn get_developer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match within_deadline(&state, state.library.get_developer(&id)).await {
        Ok(developer) => data_response(StatusCode::OK, &developer),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    post,
    path = "/developers",
    request_body = DeveloperInput,
    responses(
        (status = 201, description = "Developer created; data carries the generated id", body = ApiResponse),
        (status = 400, description = "Invalid JSON body", body = ApiResponse),
        (status = 500, description = "Storage error", body = ApiResponse)
    )
)]
pub async fn create_developer_handler(
    State(state): State<AppState>,
    request: Result<Json<DeveloperInput>, JsonRejection>,
) -> Response {
    let Json(developer) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, DEVELOPER_BODY).into_response(),
    };

    match within_deadline(&state, state.library.create_developer(developer)).await {
        Ok(created) => data_response(StatusCode::CREATED, &created),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    put,
    path = "/developers/{id}",
    params(
        ("id" = String, Path, description = "Developer id; any id in the body is ignored")
    ),
    request_body = DeveloperInput,
    responses(
        (status = 200, description = "Developer replaced", body = ApiResponse),
        (status = 400, description = "Invalid JSON body or malformed id", body = ApiResponse),
        (status = 404, description = "No such developer", body = ApiResponse),
        (status = 500, description = "Storage error", body = ApiResponse)
    )
)]
pub async fn update_developer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<DeveloperInput>, JsonRejection>,
) -> Response {
    let Json(developer) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, DEVELOPER_BODY).into_response(),
    };

    match within_deadline(&state, state.library.update_developer(&id, developer)).await {
        Ok(()) => empty_response(StatusCode::OK),
        Err(e) => error_response(&e),
    }
}

#[utoipa::path(
    delete,
    path = "/developers/{id}",
    params(
        ("id" = String, Path, description = "Developer id")
    ),
    responses(
        (status = 204, description = "Developer and all of its games deleted"),
        (status = 404, description = "No such developer", body = ApiResponse),
        (status = 500, description = "A cascade step failed; data.step names it", body = ApiResponse)
    )
)]
pub async fn delete_developer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match within_deadline(&state, state.library.delete_developer(&id)).await {
        Ok(_games_removed) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}
