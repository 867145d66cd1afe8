//! In-memory stand-in for the Incapsula user-management API.
//!
//! Routes, casing and reply shapes follow the remote service closely enough
//! for the client's integration tests: credentials travel as `api_id` /
//! `api_key` query parameters, every success is HTTP 200, and deletes answer
//! with a `{code, message, debug_info}` envelope.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const ROLES_ROUTE: &str = "/user-management/v1/roles";
pub const ROLE_ROUTE: &str = "/user-management/v1/roles/{roleId}";
pub const USERS_ROUTE: &str = "/user-management/v1/users";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub api_id: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_id: u64,
    pub role_name: String,
    pub role_description: String,
    pub account_id: u64,
    pub account_name: String,
    pub role_abilities: Vec<String>,
    pub user_assignment: Vec<UserAssignment>,
    pub update_date: String,
    pub is_editable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignment {
    pub user_email: String,
    pub account_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRole {
    pub role_name: String,
    #[serde(default)]
    pub role_description: String,
    pub account_id: u64,
    #[serde(default)]
    pub role_abilities: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRole {
    pub role_name: String,
    #[serde(default)]
    pub role_description: String,
    #[serde(default)]
    pub role_abilities: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: u64,
    pub account_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub user_email: String,
    pub roles_details: Vec<RoleSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub role_id: u64,
    pub role_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub account_id: u64,
    pub user_email: String,
    #[serde(default)]
    pub role_ids: Vec<u64>,
    #[serde(default)]
    pub role_names: Vec<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Default)]
struct Store {
    next_role_id: u64,
    next_user_id: u64,
    roles: BTreeMap<u64, Role>,
    users: BTreeMap<(String, u64), User>,
}

#[derive(Clone)]
pub struct AppState {
    credentials: Arc<Credentials>,
    store: Arc<RwLock<Store>>,
}

type Params = Query<HashMap<String, String>>;

/// Failure reply in the remote API's error shape.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    error_code: u32,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, error_code: u32, message: impl Into<String>) -> Self {
        Self {
            status,
            error_code,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, 1002, message)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({ "errorCode": self.error_code, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

pub fn app(credentials: Credentials) -> Router {
    let state = AppState {
        credentials: Arc::new(credentials),
        store: Arc::new(RwLock::new(Store {
            next_role_id: 1000,
            next_user_id: 1,
            ..Store::default()
        })),
    };
    Router::new()
        .route(ROLES_ROUTE, post(create_role))
        .route(ROLE_ROUTE, get(get_role).put(update_role).delete(delete_role))
        .route(USERS_ROUTE, get(get_user).post(create_user).delete(delete_user))
        .with_state(state)
}

pub async fn run(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    axum::serve(listener, app(credentials)).await
}

fn authorize(state: &AppState, params: &HashMap<String, String>) -> Result<(), ApiFailure> {
    let id = params.get("api_id").map(String::as_str);
    let key = params.get("api_key").map(String::as_str);
    if id == Some(state.credentials.api_id.as_str()) && key == Some(state.credentials.api_key.as_str())
    {
        return Ok(());
    }
    tracing::warn!("rejecting request with invalid credentials");
    Err(ApiFailure::new(
        StatusCode::UNAUTHORIZED,
        1,
        "Authentication missing or invalid",
    ))
}

fn user_key(params: &HashMap<String, String>) -> Result<(String, u64), ApiFailure> {
    let email = params
        .get("userEmail")
        .cloned()
        .ok_or_else(|| ApiFailure::new(StatusCode::BAD_REQUEST, 3, "userEmail is required"))?;
    let account_id = params
        .get("accountId")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ApiFailure::new(StatusCode::BAD_REQUEST, 3, "accountId is required"))?;
    Ok((email, account_id))
}

fn envelope(code: u16, message: &str) -> Json<serde_json::Value> {
    Json(json!({ "code": code, "message": message, "debug_info": {} }))
}

async fn create_role(
    State(state): State<AppState>,
    Query(params): Params,
    Json(input): Json<CreateRole>,
) -> Result<Json<Role>, ApiFailure> {
    authorize(&state, &params)?;
    let mut store = state.store.write().await;
    let role_id = store.next_role_id;
    store.next_role_id += 1;
    let role = Role {
        role_id,
        role_name: input.role_name,
        role_description: input.role_description,
        account_id: input.account_id,
        account_name: format!("Account {}", input.account_id),
        role_abilities: input.role_abilities,
        user_assignment: Vec::new(),
        update_date: String::new(),
        is_editable: true,
    };
    store.roles.insert(role_id, role.clone());
    Ok(Json(role))
}

async fn get_role(
    State(state): State<AppState>,
    Path(role_id): Path<u64>,
    Query(params): Params,
) -> Result<Json<Role>, ApiFailure> {
    authorize(&state, &params)?;
    let store = state.store.read().await;
    store
        .roles
        .get(&role_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found(format!("Role {role_id} not found")))
}

async fn update_role(
    State(state): State<AppState>,
    Path(role_id): Path<u64>,
    Query(params): Params,
    Json(input): Json<UpdateRole>,
) -> Result<Json<Role>, ApiFailure> {
    authorize(&state, &params)?;
    let mut store = state.store.write().await;
    let role = store
        .roles
        .get_mut(&role_id)
        .ok_or_else(|| ApiFailure::not_found(format!("Role {role_id} not found")))?;
    role.role_name = input.role_name;
    role.role_description = input.role_description;
    role.role_abilities = input.role_abilities;
    Ok(Json(role.clone()))
}

async fn delete_role(
    State(state): State<AppState>,
    Path(role_id): Path<u64>,
    Query(params): Params,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    authorize(&state, &params)?;
    let mut store = state.store.write().await;
    let assigned = store
        .roles
        .get(&role_id)
        .map(|role| !role.user_assignment.is_empty())
        .ok_or_else(|| ApiFailure::not_found(format!("Role {role_id} not found")))?;
    if assigned {
        // The remote API reports this refusal inside a 200 reply.
        return Ok(envelope(409, "Role is assigned to users"));
    }
    store.roles.remove(&role_id);
    Ok(envelope(200, "OK"))
}

async fn create_user(
    State(state): State<AppState>,
    Query(params): Params,
    Json(input): Json<CreateUser>,
) -> Result<Json<User>, ApiFailure> {
    authorize(&state, &params)?;
    let mut store = state.store.write().await;
    let key = (input.user_email.clone(), input.account_id);
    if store.users.contains_key(&key) {
        return Err(ApiFailure::new(
            StatusCode::CONFLICT,
            1005,
            format!("User {} already exists", input.user_email),
        ));
    }

    if let Some(unknown) = input.role_ids.iter().find(|id| !store.roles.contains_key(*id)) {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            3,
            format!("Unknown role id {unknown}"),
        ));
    }
    if let Some(unknown) = input
        .role_names
        .iter()
        .find(|name| !store.roles.values().any(|role| &role.role_name == *name))
    {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            3,
            format!("Unknown role name {unknown}"),
        ));
    }

    let mut roles_details = Vec::new();
    for role in store.roles.values() {
        if input.role_ids.contains(&role.role_id) || input.role_names.contains(&role.role_name) {
            roles_details.push(RoleSummary {
                role_id: role.role_id,
                role_name: role.role_name.clone(),
            });
        }
    }
    for summary in &roles_details {
        if let Some(role) = store.roles.get_mut(&summary.role_id) {
            role.user_assignment.push(UserAssignment {
                user_email: input.user_email.clone(),
                account_id: input.account_id,
            });
        }
    }

    let user = User {
        user_id: store.next_user_id,
        account_id: input.account_id,
        first_name: input.first_name,
        last_name: input.last_name,
        user_email: input.user_email,
        roles_details,
    };
    store.next_user_id += 1;
    store.users.insert(key, user.clone());
    Ok(Json(user))
}

async fn get_user(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<Json<User>, ApiFailure> {
    authorize(&state, &params)?;
    let key = user_key(&params)?;
    let store = state.store.read().await;
    store
        .users
        .get(&key)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found(format!("User {} not found", key.0)))
}

async fn delete_user(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    authorize(&state, &params)?;
    let key = user_key(&params)?;
    let mut store = state.store.write().await;
    store
        .users
        .remove(&key)
        .ok_or_else(|| ApiFailure::not_found(format!("User {} not found", key.0)))?;
    for role in store.roles.values_mut() {
        role.user_assignment
            .retain(|a| !(a.user_email == key.0 && a.account_id == key.1));
    }
    Ok(envelope(200, "OK"))
}
