use std::sync::Arc;

use super::*;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::error::{ApiError, ErrorCode};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    users: Arc<Mutex<Vec<UserRecord>>>,
    removed: Arc<Mutex<Vec<String>>>,
    reject_writes: Arc<Mutex<bool>>,
}

async fn list_users(State(state): State<ServerState>) -> Json<UserListResponse> {
    Json(UserListResponse {
        users: state.users.lock().await.clone(),
    })
}

async fn add_user(
    State(state): State<ServerState>,
    Json(user): Json<UserRecord>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    if *state.reject_writes.lock().await {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiError::new(ErrorCode::Conflict, "email already registered")),
        ));
    }
    state.users.lock().await.push(user);
    Ok(StatusCode::CREATED)
}

async fn edit_user(
    State(state): State<ServerState>,
    Json(user): Json<UserRecord>,
) -> StatusCode {
    let mut users = state.users.lock().await;
    match users.iter_mut().find(|existing| existing.email == user.email) {
        Some(existing) => {
            *existing = user;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn remove_user(
    State(state): State<ServerState>,
    Json(request): Json<RemoveUserRequest>,
) -> StatusCode {
    state.users.lock().await.retain(|user| user.email != request.email);
    state.removed.lock().await.push(request.email);
    StatusCode::NO_CONTENT
}

async fn spawn_user_server(seed: Vec<UserRecord>) -> Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState {
        users: Arc::new(Mutex::new(seed)),
        ..ServerState::default()
    };
    let app = Router::new()
        .route(
            "/api/users",
            get(list_users)
                .post(add_user)
                .put(edit_user)
                .delete(remove_user),
        )
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api"), state))
}

fn gateway(api_url: &str) -> HttpUserGateway {
    HttpUserGateway::new(api_url, Duration::from_secs(5)).expect("gateway")
}

#[tokio::test]
async fn list_users_returns_records_in_server_order() {
    let (api_url, _state) = spawn_user_server(vec![
        UserRecord::new("corwin", "corwin@amber.com").with_role("merchant"),
        UserRecord::new("bleys", "bleys@amber.com"),
    ])
    .await
    .expect("spawn server");

    let users = gateway(&api_url).list_users().await.expect("list users");

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "corwin");
    assert_eq!(users[0].role, "merchant");
    assert_eq!(users[1].email, "bleys@amber.com");
}

#[tokio::test]
async fn add_edit_and_remove_hit_distinct_endpoints() {
    let (api_url, state) = spawn_user_server(Vec::new()).await.expect("spawn server");
    let gateway = gateway(&api_url);

    let user = UserRecord::new("Random", "random@amber.com").with_role("alchemist");
    gateway.add_user(&user).await.expect("add user");
    assert_eq!(state.users.lock().await.len(), 1);

    let edited = user.clone().with_role("blacksmith");
    gateway.edit_user(&edited).await.expect("edit user");
    assert_eq!(state.users.lock().await[0].role, "blacksmith");

    gateway.remove_user(&edited).await.expect("remove user");
    assert!(state.users.lock().await.is_empty());
    assert_eq!(
        state.removed.lock().await.as_slice(),
        ["random@amber.com".to_string()]
    );
}

#[tokio::test]
async fn api_errors_surface_as_api_exceptions() {
    let (api_url, state) = spawn_user_server(Vec::new()).await.expect("spawn server");
    *state.reject_writes.lock().await = true;

    let err = gateway(&api_url)
        .add_user(&UserRecord::new("Eric", "eric@amber.com"))
        .await
        .expect_err("conflict");

    let api = err.downcast_ref::<ApiException>().expect("api exception");
    assert_eq!(api.status, 409);
    assert_eq!(api.code, shared::error::ErrorCode::Conflict);
    assert_eq!(api.message, "email already registered");
}

#[tokio::test]
async fn editing_unknown_user_reports_not_found() {
    let (api_url, _state) = spawn_user_server(Vec::new()).await.expect("spawn server");

    let err = gateway(&api_url)
        .edit_user(&UserRecord::new("Oberon", "oberon@amber.com"))
        .await
        .expect_err("not found");

    let api = err.downcast_ref::<ApiException>().expect("api exception");
    assert_eq!(api.code, shared::error::ErrorCode::NotFound);
}

#[tokio::test]
async fn unreachable_server_is_an_error_not_a_panic() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let result = gateway(&format!("http://{addr}/api")).list_users().await;
    assert!(result.is_err());
}

#[test]
fn api_url_is_validated_and_trimmed() {
    let gateway = gateway(" http://127.0.0.1:9000/api/ ");
    assert_eq!(gateway.api_url(), "http://127.0.0.1:9000/api");
    assert_eq!(gateway.users_url(), "http://127.0.0.1:9000/api/users");

    assert!(HttpUserGateway::new("not a url", Duration::from_secs(1)).is_err());
    let err = HttpUserGateway::new("ftp://amber/api", Duration::from_secs(1))
        .expect_err("unsupported scheme");
    assert!(err.to_string().contains("http or https"));
}

#[test]
fn configured_roles_preserve_order() {
    let settings = ClientSettings {
        roles: vec!["merchant".into(), "blacksmith".into(), "alchemist".into()],
        ..ClientSettings::default()
    };
    let roles = ConfiguredRoles::from_settings(&settings);
    assert_eq!(roles.roles(), vec!["merchant", "blacksmith", "alchemist"]);
}
