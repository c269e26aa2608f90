use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::tasks::use_cases::guest_tasks::handler::GuestTaskError;
use crate::shared::core::primitives::ClientId;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct AddGuestTaskBody {
    pub text: String,
}

fn error_response(err: GuestTaskError) -> axum::response::Response {
    match err {
        GuestTaskError::EmptyText => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        GuestTaskError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        GuestTaskError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

pub async fn list(State(state): State<AppState>, client: ClientId) -> impl IntoResponse {
    Json(state.guest_tasks.list(client.as_str()))
}

pub async fn add(
    State(state): State<AppState>,
    client: ClientId,
    body: Result<Json<AddGuestTaskBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    match state.guest_tasks.add(client.as_str(), &body.text).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn toggle(
    State(state): State<AppState>,
    client: ClientId,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.guest_tasks.toggle(client.as_str(), &id).await {
        Ok(task) => Json(task).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    client: ClientId,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.guest_tasks.delete(client.as_str(), &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod guest_tasks_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::{delete as delete_route, get, post},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::shell::state::AppState;
    use crate::tests::fixtures::state::make_test_state;

    use super::{add, delete, list, toggle};

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/guest/tasks", get(list).post(add))
            .route("/guest/tasks/{id}/toggle", post(toggle))
            .route("/guest/tasks/{id}", delete_route(delete))
            .with_state(state)
    }

    fn request(method: &str, uri: &str, client: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("x-client-id", client)
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    async fn json_of(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn it_should_work_without_a_signed_in_user() {
        let app = app(make_test_state());

        let created = app
            .clone()
            .oneshot(request(
                "POST",
                "/guest/tasks",
                "tab-1",
                Body::from(r#"{"text":"Revise OS notes"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let id = json_of(created).await["id"].as_str().unwrap().to_string();

        let toggled = app
            .clone()
            .oneshot(request(
                "POST",
                &format!("/guest/tasks/{id}/toggle"),
                "tab-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(toggled.status(), StatusCode::OK);

        let listed = app
            .clone()
            .oneshot(request("GET", "/guest/tasks", "tab-1", Body::empty()))
            .await
            .unwrap();
        assert_eq!(json_of(listed).await[0]["done"], true);

        let deleted = app
            .clone()
            .oneshot(request(
                "DELETE",
                &format!("/guest/tasks/{id}"),
                "tab-1",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn it_should_not_share_lists_between_clients() {
        let app = app(make_test_state());

        app.clone()
            .oneshot(request(
                "POST",
                "/guest/tasks",
                "tab-1",
                Body::from(r#"{"text":"Revise OS notes"}"#),
            ))
            .await
            .unwrap();

        let other = app
            .clone()
            .oneshot(request("GET", "/guest/tasks", "tab-2", Body::empty()))
            .await
            .unwrap();
        assert_eq!(json_of(other).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn it_should_return_401_without_a_client() {
        let response = app(make_test_state())
            .oneshot(Request::get("/guest/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn it_should_return_404_for_unknown_ids() {
        let response = app(make_test_state())
            .oneshot(request("DELETE", "/guest/tasks/nope", "tab-1", Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
