// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bucketlist item endpoints. Items are only reachable through a
//! bucketlist the caller owns.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{BucketListItem, CreateItemRequest, MessageResponse, UpdateItemRequest},
    state::AppState,
    storage::{ItemRepository, ItemUpdate},
};

impl UpdateItemRequest {
    /// Pick the single update to apply. A non-blank name wins over `done`.
    fn into_update(self) -> Option<ItemUpdate> {
        match (self.name.as_deref().map(str::trim), self.done) {
            (Some(name), _) if !name.is_empty() => Some(ItemUpdate::Rename(name.to_string())),
            (_, Some(done)) => Some(ItemUpdate::SetDone(done)),
            _ => None,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/bucketlists/{id}/items",
    params(("id" = u64, Path, description = "Bucketlist ID")),
    tag = "Items",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Items in creation order", body = [BucketListItem]),
        (status = 401, description = "Missing, expired or invalid token"),
        (status = 404, description = "Bucketlist absent or owned by someone else"),
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<u64>,
) -> Result<Json<Vec<BucketListItem>>, ApiError> {
    let items = ItemRepository::new(&state.db).list_by_list(user.user_id, id)?;
    Ok(Json(items.into_iter().map(BucketListItem::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/bucketlists/{id}/items",
    params(("id" = u64, Path, description = "Bucketlist ID")),
    request_body = CreateItemRequest,
    tag = "Items",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Item created", body = BucketListItem),
        (status = 400, description = "Blank name"),
        (status = 401, description = "Missing, expired or invalid token"),
        (status = 404, description = "Bucketlist absent or owned by someone else"),
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<u64>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<BucketListItem>), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Item name cannot be empty"));
    }

    let item = ItemRepository::new(&state.db).create(user.user_id, id, name)?;

    tracing::info!(user_id = user.user_id, bucketlist_id = id, item_id = item.id, "Item created");
    Ok((StatusCode::CREATED, Json(item.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/bucketlists/{id}/items/{item_id}",
    params(
        ("id" = u64, Path, description = "Bucketlist ID"),
        ("item_id" = u64, Path, description = "Item ID")
    ),
    tag = "Items",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The item", body = BucketListItem),
        (status = 401, description = "Missing, expired or invalid token"),
        (status = 404, description = "Item or bucketlist absent, or not owned"),
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path((id, item_id)): Path<(u64, u64)>,
) -> Result<Json<BucketListItem>, ApiError> {
    let item = ItemRepository::new(&state.db).get(user.user_id, id, item_id)?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/bucketlists/{id}/items/{item_id}",
    params(
        ("id" = u64, Path, description = "Bucketlist ID"),
        ("item_id" = u64, Path, description = "Item ID")
    ),
    request_body = UpdateItemRequest,
    tag = "Items",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Item renamed", body = BucketListItem),
        (status = 200, description = "Completion updated", body = BucketListItem),
        (status = 400, description = "Neither name nor done supplied"),
        (status = 401, description = "Missing, expired or invalid token"),
        (status = 404, description = "Item or bucketlist absent, or not owned"),
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path((id, item_id)): Path<(u64, u64)>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<(StatusCode, Json<BucketListItem>), ApiError> {
    let update = request
        .into_update()
        .ok_or_else(|| ApiError::validation("Provide a name or done value to update"))?;
    let status = match update {
        ItemUpdate::Rename(_) => StatusCode::CREATED,
        ItemUpdate::SetDone(_) => StatusCode::OK,
    };

    let item = ItemRepository::new(&state.db).update(user.user_id, id, item_id, update)?;

    tracing::info!(user_id = user.user_id, bucketlist_id = id, item_id, "Item updated");
    Ok((status, Json(item.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bucketlists/{id}/items/{item_id}",
    params(
        ("id" = u64, Path, description = "Bucketlist ID"),
        ("item_id" = u64, Path, description = "Item ID")
    ),
    tag = "Items",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 401, description = "Missing, expired or invalid token"),
        (status = 404, description = "Item or bucketlist absent, or not owned"),
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path((id, item_id)): Path<(u64, u64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let item = ItemRepository::new(&state.db).delete(user.user_id, id, item_id)?;

    tracing::info!(user_id = user.user_id, bucketlist_id = id, item_id, "Item deleted");
    Ok(Json(MessageResponse::new(format!(
        "Item {} has been successfully deleted",
        item.name
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::error::ErrorKind;
    use crate::state::test_state;
    use crate::storage::{ListCreation, ListRepository};

    fn auth(user_id: u64) -> Auth {
        Auth(AuthenticatedUser {
            user_id,
            issued_at: 0,
            expires_at: 0,
        })
    }

    fn seed_list(state: &AppState, owner: u64) -> u64 {
        match ListRepository::new(&state.db).create(owner, "Trips").unwrap() {
            ListCreation::Created(list) => list.id,
            ListCreation::AlreadyExists(list) => list.id,
        }
    }

    async fn add(state: &AppState, owner: u64, list_id: u64, name: &str) -> BucketListItem {
        let (status, Json(item)) = create_item(
            State(state.clone()),
            auth(owner),
            Path(list_id),
            Json(CreateItemRequest { name: name.into() }),
        )
        .await
        .expect("item creation succeeds");
        assert_eq!(status, StatusCode::CREATED);
        item
    }

    #[test]
    fn name_takes_precedence_over_done() {
        let both = UpdateItemRequest {
            name: Some("Renamed".into()),
            done: Some(true),
        };
        assert_eq!(both.into_update(), Some(ItemUpdate::Rename("Renamed".into())));

        let blank_name = UpdateItemRequest {
            name: Some("  ".into()),
            done: Some(true),
        };
        assert_eq!(blank_name.into_update(), Some(ItemUpdate::SetDone(true)));

        assert_eq!(UpdateItemRequest::default().into_update(), None);
    }

    #[tokio::test]
    async fn create_and_list_items() {
        let (state, _dir) = test_state();
        let list_id = seed_list(&state, 1);

        let first = add(&state, 1, list_id, "Nairobi").await;
        add(&state, 1, list_id, "Lagos").await;
        assert!(!first.done);
        assert_eq!(first.bucketlist_id, list_id);

        let Json(items) = list_items(State(state), auth(1), Path(list_id)).await.unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Nairobi", "Lagos"]);
    }

    #[tokio::test]
    async fn create_item_in_foreign_list_is_not_found() {
        let (state, _dir) = test_state();
        let list_id = seed_list(&state, 1);

        let err = create_item(
            State(state),
            auth(2),
            Path(list_id),
            Json(CreateItemRequest { name: "Sneaky".into() }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn update_item_status_codes() {
        let (state, _dir) = test_state();
        let list_id = seed_list(&state, 1);
        let item = add(&state, 1, list_id, "Nairobi").await;

        let (status, Json(renamed)) = update_item(
            State(state.clone()),
            auth(1),
            Path((list_id, item.id)),
            Json(UpdateItemRequest {
                name: Some("Mombasa".into()),
                done: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(renamed.name, "Mombasa");

        let (status, Json(done)) = update_item(
            State(state.clone()),
            auth(1),
            Path((list_id, item.id)),
            Json(UpdateItemRequest {
                name: None,
                done: Some(true),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(done.done);
        assert_eq!(done.name, "Mombasa");

        let err = update_item(
            State(state),
            auth(1),
            Path((list_id, item.id)),
            Json(UpdateItemRequest::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn delete_item_confirms_by_name() {
        let (state, _dir) = test_state();
        let list_id = seed_list(&state, 1);
        let item = add(&state, 1, list_id, "Nairobi").await;

        let Json(body) = delete_item(State(state.clone()), auth(1), Path((list_id, item.id)))
            .await
            .unwrap();
        assert_eq!(body.message, "Item Nairobi has been successfully deleted");

        let err = get_item(State(state), auth(1), Path((list_id, item.id)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
