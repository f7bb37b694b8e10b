// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User creation and listing routes.

use crate::error::Result;
use crate::models::User;
use crate::AppState;
use axum::{extract::State, routing::post, Form, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users", post(create_user).get(list_users))
}

/// Form body for user creation.
#[derive(Deserialize)]
struct CreateUserForm {
    username: String,
}

/// User summary on the wire; the exercise log is omitted.
#[derive(Serialize)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
        }
    }
}

/// Create a new user with an empty exercise log.
///
/// Usernames are free text; emptiness and duplicates are not rejected.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateUserForm>,
) -> Result<Json<UserResponse>> {
    let user = state.db.create_user(&form.username).await?;
    tracing::debug!(user_id = %user.id, "User created");
    Ok(Json(user.into()))
}

/// List all users, projecting id and username only.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.db.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
