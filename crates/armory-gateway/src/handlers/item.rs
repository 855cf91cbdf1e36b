use crate::error::{AppError, Result};
use crate::model::ItemRequest;
use crate::state::AppState;
use armory_core::{Item, ItemId, ItemInput};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};
use tracing::trace;

/// Request body as extracted by axum; anything but a JSON object is rejected.
type ItemBody = std::result::Result<Json<Map<String, Value>>, JsonRejection>;

/// Parses the path segment into an item id.
///
/// Ids are integers, so anything else cannot name an existing item and is
/// answered as not found without touching storage.
fn parse_id(raw: &str) -> Result<ItemId> {
    raw.parse::<ItemId>().map_err(|err| {
        trace!(error = %err, "rejecting non-numeric item id");
        AppError::NotFound
    })
}

fn validate(payload: ItemBody) -> Result<ItemInput> {
    let Json(fields) = payload?;
    ItemRequest::from(fields)
        .validate()
        .map_err(AppError::Validation)
}

pub async fn list_items_handler(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    let items = state.catalog().list().await?;
    Ok(Json(items))
}

pub async fn get_item_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Item>> {
    let id = parse_id(&id)?;
    let item = state.catalog().get(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(item))
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    payload: ItemBody,
) -> Result<(StatusCode, Json<Item>)> {
    let input = validate(payload)?;
    let item = state.catalog().create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: ItemBody,
) -> Result<Json<Item>> {
    let input = validate(payload)?;
    let id = parse_id(&id)?;
    let item = state
        .catalog()
        .update(id, input)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(item))
}

pub async fn delete_item_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    if state.catalog().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
