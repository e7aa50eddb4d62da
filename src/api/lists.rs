// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bucketlist endpoints. Every handler is scoped to the token's subject.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    listing::{Listing, ListingEngine, ListingRequest},
    models::{
        BucketList, BucketListListing, CreateBucketListRequest, CreateBucketListResponse,
        ListingParams, MessageResponse, UpdateBucketListRequest,
    },
    state::AppState,
    storage::{ItemRepository, ListCreation, ListRepository, StorageError},
};

use super::BUCKETLISTS_ENDPOINT;

const BLANK_NAME: &str = "Bucketlist name cannot be empty";

#[utoipa::path(
    post,
    path = "/api/v1/bucketlists",
    request_body = CreateBucketListRequest,
    tag = "Bucketlists",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Bucketlist created", body = BucketList),
        (status = 200, description = "Owner already has a bucketlist by that name", body = MessageResponse),
        (status = 400, description = "Blank name"),
        (status = 401, description = "Missing, expired or invalid token"),
    )
)]
pub async fn create_bucketlist(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreateBucketListRequest>,
) -> Result<(StatusCode, Json<CreateBucketListResponse>), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation(BLANK_NAME));
    }

    match ListRepository::new(&state.db).create(user.user_id, name)? {
        ListCreation::Created(list) => {
            tracing::info!(user_id = user.user_id, bucketlist_id = list.id, "Bucketlist created");
            Ok((
                StatusCode::CREATED,
                Json(CreateBucketListResponse::Created(BucketList::with_items(
                    list,
                    Vec::new(),
                ))),
            ))
        }
        ListCreation::AlreadyExists(list) => {
            tracing::debug!(user_id = user.user_id, bucketlist_id = list.id, "Bucketlist name taken");
            Ok((
                StatusCode::OK,
                Json(CreateBucketListResponse::AlreadyExists(MessageResponse::new(
                    "User already has a bucketlist by that name",
                ))),
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/bucketlists",
    params(ListingParams),
    tag = "Bucketlists",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "A page of bucketlists, or the matches of a search", body = BucketListListing),
        (status = 400, description = "Invalid limit"),
        (status = 401, description = "Missing, expired or invalid token"),
        (status = 404, description = "Search matched nothing"),
    )
)]
pub async fn list_bucketlists(
    State(state): State<AppState>,
    Auth(user): Auth,
    Query(params): Query<ListingParams>,
) -> Result<Json<BucketListListing>, ApiError> {
    let request = ListingRequest::from_params(
        params.q.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
    )?;

    let listing = ListingEngine::new(&state.db, BUCKETLISTS_ENDPOINT).run(user.user_id, request)?;
    Ok(Json(match listing {
        Listing::Search(matches) => {
            BucketListListing::Matches(matches.into_iter().map(BucketList::from).collect())
        }
        Listing::Page(page) => BucketListListing::Page(page.into()),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/bucketlists/{id}",
    params(("id" = u64, Path, description = "Bucketlist ID")),
    tag = "Bucketlists",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The bucketlist with its items", body = BucketList),
        (status = 401, description = "Missing, expired or invalid token"),
        (status = 404, description = "Bucketlist absent or owned by someone else"),
    )
)]
pub async fn get_bucketlist(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<u64>,
) -> Result<Json<BucketList>, ApiError> {
    let list = ListRepository::new(&state.db).get(user.user_id, id)?;
    let items = ItemRepository::new(&state.db).list_by_list(user.user_id, id)?;
    Ok(Json(BucketList::with_items(list, items)))
}

#[utoipa::path(
    put,
    path = "/api/v1/bucketlists/{id}",
    params(("id" = u64, Path, description = "Bucketlist ID")),
    request_body = UpdateBucketListRequest,
    tag = "Bucketlists",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Bucketlist renamed", body = BucketList),
        (status = 400, description = "Blank name"),
        (status = 401, description = "Missing, expired or invalid token"),
        (status = 404, description = "Bucketlist absent or owned by someone else"),
        (status = 409, description = "Owner already has a bucketlist by that name"),
    )
)]
pub async fn update_bucketlist(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<u64>,
    Json(request): Json<UpdateBucketListRequest>,
) -> Result<(StatusCode, Json<BucketList>), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation(BLANK_NAME));
    }

    let list = match ListRepository::new(&state.db).update(user.user_id, id, name) {
        Ok(list) => list,
        Err(StorageError::AlreadyExists(_)) => {
            return Err(ApiError::conflict(
                "User already has a bucketlist by that name",
            ))
        }
        Err(e) => return Err(e.into()),
    };
    let items = ItemRepository::new(&state.db).list_by_list(user.user_id, id)?;

    tracing::info!(user_id = user.user_id, bucketlist_id = id, "Bucketlist updated");
    Ok((StatusCode::CREATED, Json(BucketList::with_items(list, items))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bucketlists/{id}",
    params(("id" = u64, Path, description = "Bucketlist ID")),
    tag = "Bucketlists",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Bucketlist and its items deleted", body = MessageResponse),
        (status = 401, description = "Missing, expired or invalid token"),
        (status = 404, description = "Bucketlist absent or owned by someone else"),
    )
)]
pub async fn delete_bucketlist(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let list = ListRepository::new(&state.db).delete(user.user_id, id)?;

    tracing::info!(user_id = user.user_id, bucketlist_id = list.id, "Bucketlist deleted");
    Ok(Json(MessageResponse::new(format!(
        "bucketlist {} deleted successfully",
        list.id
    ))))
}
