// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::require_auth,
    models::{
        BucketList, BucketListItem, BucketListListing, BucketListPage, CreateBucketListRequest,
        CreateBucketListResponse, CreateItemRequest, LoginRequest, LoginResponse,
        MessageResponse, RegisterRequest, RegisterResponse, UpdateBucketListRequest,
        UpdateItemRequest, UserSummary,
    },
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod items;
pub mod lists;

/// Path the pagination links point back to.
pub const BUCKETLISTS_ENDPOINT: &str = "/api/v1/bucketlists";

pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/bucketlists",
            get(lists::list_bucketlists).post(lists::create_bucketlist),
        )
        .route(
            "/bucketlists/{id}",
            get(lists::get_bucketlist)
                .put(lists::update_bucketlist)
                .delete(lists::delete_bucketlist),
        )
        .route(
            "/bucketlists/{id}/items",
            get(items::list_items).post(items::create_item),
        )
        .route(
            "/bucketlists/{id}/items/{item_id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let v1_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(protected_routes);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .nest("/api/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Registers the bearer scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        auth::register,
        auth::login,
        lists::create_bucketlist,
        lists::list_bucketlists,
        lists::get_bucketlist,
        lists::update_bucketlist,
        lists::delete_bucketlist,
        items::list_items,
        items::create_item,
        items::get_item,
        items::update_item,
        items::delete_item
    ),
    components(
        schemas(
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            UserSummary,
            BucketList,
            BucketListItem,
            BucketListPage,
            BucketListListing,
            CreateBucketListRequest,
            CreateBucketListResponse,
            UpdateBucketListRequest,
            CreateItemRequest,
            UpdateItemRequest,
            MessageResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Auth", description = "Registration and login"),
        (name = "Bucketlists", description = "Owned bucketlists"),
        (name = "Items", description = "Items within a bucketlist")
    )
)]
struct ApiDoc;
