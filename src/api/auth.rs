// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login endpoints. Neither requires a token.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::CredentialStore,
    error::ApiError,
    models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserSummary},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Blank field or invalid email"),
        (status = 409, description = "Username or email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let store = CredentialStore::new(&state.db, &state.tokens);
    let user = store.register(&request.username, &request.password, &request.email)?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registration successful.".to_string(),
            user: UserSummary::from(user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Blank username or password"),
        (status = 401, description = "Invalid username or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let store = CredentialStore::new(&state.db, &state.tokens);
    let token = store.authenticate(&request.username, &request.password)?;

    tracing::info!(username = %request.username.trim(), "User logged in");

    Ok(Json(LoginResponse {
        message: "You logged in successfully.".to_string(),
        token,
    }))
}
