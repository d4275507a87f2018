use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::entities::{
    farm_species,
    order,
    order_item::{self, Entity as OrderItemEntity},
};
use crate::middleware::logging::ApiError;

//ROUTERS
pub fn order_items_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route(
            "/orders/:order_id/order_items",
            post(create_order_item).get(list_order_items),
        )
        .route(
            "/orders/:order_id/order_items/:order_item_id",
            get(get_order_item)
                .patch(patch_order_item)
                .delete(delete_order_item),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_order_item(
    Path(order_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateOrderItem>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(
        "->> Called `create_order_item()` with payload: {:?}",
        payload
    );

    let txn = db.begin().await?;

    if order::Entity::find_by_id(order_id).one(&txn).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "No order with {} id was found.",
            order_id
        )));
    }
    if farm_species::Entity::find_by_id(payload.farm_species_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "No farm species with {} id was found.",
            payload.farm_species_id
        )));
    }

    let new_item = order_item::ActiveModel {
        order_id: Set(order_id),
        farm_species_id: Set(payload.farm_species_id),
        quantity: Set(payload.quantity),
        price: Set(payload.price),
        total_price: Set(f64::from(payload.quantity) * payload.price),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let item = new_item.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(item)))
}

async fn list_order_items(
    Path(order_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let items = OrderItemEntity::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(&txn)
        .await?;

    Ok(Json(items))
}

async fn get_order_item(
    Path((order_id, order_item_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let item = find_scoped_item(&txn, order_id, order_item_id).await?;

    Ok(Json(item))
}

async fn patch_order_item(
    Path((order_id, order_item_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchOrderItem>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let item = find_scoped_item(&txn, order_id, order_item_id).await?;
    let mut active: order_item::ActiveModel = item.clone().into();

    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }

    // total_price always reflects the post-update pair.
    if payload.quantity.is_some() || payload.price.is_some() {
        let quantity = payload.quantity.unwrap_or(item.quantity);
        let price = payload.price.unwrap_or(item.price);
        active.total_price = Set(f64::from(quantity) * price);
    }

    let item = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(item))
}

async fn delete_order_item(
    Path((order_id, order_item_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let item = find_scoped_item(&txn, order_id, order_item_id).await?;

    let item: order_item::ActiveModel = item.into();
    item.delete(&txn).await?;
    txn.commit().await?;

    Ok(Json(json!({
        "message": "Resource deleted successfully."
    })))
}

//UTILS
async fn find_scoped_item(
    txn: &DatabaseTransaction,
    order_id: i32,
    order_item_id: i32,
) -> Result<order_item::Model, ApiError> {
    OrderItemEntity::find_by_id(order_item_id)
        .filter(order_item::Column::OrderId.eq(order_id))
        .one(txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No order item with {} id was found.", order_item_id))
        })
}

//Structs
#[derive(Deserialize, Debug)]
struct CreateOrderItem {
    farm_species_id: i32,
    quantity: i32,
    price: f64,
}

#[derive(Deserialize)]
struct PatchOrderItem {
    quantity: Option<i32>,
    price: Option<f64>,
}
