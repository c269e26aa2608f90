use axum::{extract::FromRequestParts, http::StatusCode, http::request::Parts};

use crate::shared::core::primitives::{ClientId, CurrentUser};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const CLIENT_ID_HEADER: &str = "x-client-id";

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// The caller is whoever the `x-user-id` header names. Requests without
/// it are rejected with `401`.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header_value(parts, USER_ID_HEADER).ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(CurrentUser::new(id, header_value(parts, USER_NAME_HEADER)))
    }
}

/// The browsing session is named by `x-client-id`. Signed-in callers that
/// send no client id are scoped by their user id; anything else is `401`.
impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        header_value(parts, CLIENT_ID_HEADER)
            .or_else(|| header_value(parts, USER_ID_HEADER))
            .map(ClientId)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod identity_tests {
    use super::*;
    use axum::http::Request;
    use rstest::rstest;

    async fn extract(request: Request<()>) -> Result<CurrentUser, StatusCode> {
        let (mut parts, _) = request.into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_read_the_caller_from_headers() {
        let request = Request::builder()
            .header(USER_ID_HEADER, " user-fixed-0001 ")
            .header(USER_NAME_HEADER, "Ada")
            .body(())
            .unwrap();

        let user = extract(request).await.unwrap();

        assert_eq!(user, CurrentUser::new("user-fixed-0001", Some("Ada".into())));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_default_the_display_name() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "user-fixed-0001")
            .body(())
            .unwrap();

        assert_eq!(extract(request).await.unwrap().display_name, "Guest");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   "))]
    #[tokio::test]
    async fn it_should_reject_missing_identities(#[case] id: Option<&str>) {
        let mut builder = Request::builder();
        if let Some(id) = id {
            builder = builder.header(USER_ID_HEADER, id);
        }

        let result = extract(builder.body(()).unwrap()).await;

        assert_eq!(result, Err(StatusCode::UNAUTHORIZED));
    }

    #[rstest]
    #[case(Some("tab-1"), Some("user-1"), Ok(ClientId("tab-1".into())))]
    #[case(None, Some("user-1"), Ok(ClientId("user-1".into())))]
    #[case(Some("  "), None, Err(StatusCode::UNAUTHORIZED))]
    #[case(None, None, Err(StatusCode::UNAUTHORIZED))]
    #[tokio::test]
    async fn it_should_resolve_the_client(
        #[case] client: Option<&str>,
        #[case] user: Option<&str>,
        #[case] expected: Result<ClientId, StatusCode>,
    ) {
        let mut builder = Request::builder();
        if let Some(client) = client {
            builder = builder.header(CLIENT_ID_HEADER, client);
        }
        if let Some(user) = user {
            builder = builder.header(USER_ID_HEADER, user);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();

        let result = ClientId::from_request_parts(&mut parts, &()).await;

        assert_eq!(result, expected);
    }
}
