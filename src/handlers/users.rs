use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use billing::{FieldValue, NewUser};
use model::UserProfile;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, Span};
use utoipa::ToSchema;

use crate::extract::Fields;
use crate::schemas::{ApiError, AppState};

/// Request body for creating a new user
#[derive(Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Display name
    #[schema(value_type = Option<String>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<FieldValue>,
    /// Contact email
    #[schema(value_type = Option<String>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldValue>,
    /// Plaintext password, hashed before storage
    #[schema(value_type = Option<String>, format = Password)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<FieldValue>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserProfile),
        (status = 400, description = "Missing required fields or malformed body", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    Fields(request): Fields<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    trace!("Entering create_user function");

    // Password hashing is CPU bound; keep it off the async workers.
    let store = Arc::clone(&state.store);
    let span = Span::current();
    let profile =
        tokio::task::spawn_blocking(move || span.in_scope(|| store.create_user(request.into())))
            .await??;

    info!("User created successfully with ID: {}", profile.id);
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = Vec<UserProfile>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>, ApiError> {
    trace!("Entering get_users function");
    let users = state.store.list_users()?;
    debug!("Retrieved {} users", users.len());
    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use serde_json::json;
    use tracing::{Event, Subscriber};
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        registry::LookupSpan,
        Layer,
    };

    use crate::test_utils::test_utils::setup_test_server;

    /// Span names, outermost first, around each event logged by the identity store.
    #[derive(Clone, Default)]
    struct StoreEventScopes(Arc<Mutex<Vec<Vec<String>>>>);

    impl<S> Layer<S> for StoreEventScopes
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            if event.metadata().target() != "billing::identity" {
                return;
            }
            let names = ctx
                .event_scope(event)
                .map(|scope| scope.from_root().map(|span| span.name().to_string()).collect())
                .unwrap_or_default();
            self.0.lock().unwrap().push(names);
        }
    }

    #[tokio::test]
    async fn store_logs_inherit_the_handler_span() {
        let scopes = StoreEventScopes::default();
        // Blocking-pool threads have no thread-local subscriber.
        let subscriber = tracing_subscriber::registry().with(scopes.clone());
        tracing::subscriber::set_global_default(subscriber)
            .expect("no other test installs a global subscriber");

        let server = setup_test_server();
        server
            .post("/api/users")
            .json(&json!({ "username": "spanned", "email": "s@example.com", "password": "pw" }))
            .await
            .assert_status(StatusCode::CREATED);

        let recorded = scopes.0.lock().unwrap();
        assert!(!recorded.is_empty());
        assert!(recorded
            .iter()
            .any(|names| names.ends_with(&["create_user".to_string(), "create_user".to_string()])));
    }
}
