use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::entities::{
    order::{self, Entity as OrderEntity},
    user,
};
use crate::middleware::logging::ApiError;

//ROUTERS
pub fn orders_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route(
            "/orders/:order_id",
            get(get_order).patch(patch_order).delete(delete_order),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_order(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateOrder>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("->> Called `create_order()` with payload: {:?}", payload);

    let txn = db.begin().await?;

    // The farmer must exist; their role is not checked here.
    if user::Entity::find_by_id(payload.farmer_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "No user with {} id was found.",
            payload.farmer_id
        )));
    }

    let new_order = order::ActiveModel {
        farmer_id: Set(payload.farmer_id),
        name: Set(payload.name),
        description: Set(payload.description),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let order = new_order.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_orders(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let orders = OrderEntity::find().all(&txn).await?;

    Ok(Json(orders))
}

async fn get_order(
    Path(order_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let order = OrderEntity::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No order with {} id was found.", order_id)))?;

    Ok(Json(order))
}

async fn patch_order(
    Path(order_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchOrder>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let order = OrderEntity::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No order with {} id was found.", order_id)))?;
    let mut order: order::ActiveModel = order.into();

    if let Some(name) = payload.name {
        order.name = Set(name);
    }
    if let Some(description) = payload.description {
        order.description = Set(description);
    }

    let order = order.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(order))
}

async fn delete_order(
    Path(order_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let order = OrderEntity::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No order with {} id was found.", order_id)))?;

    let order: order::ActiveModel = order.into();
    order.delete(&txn).await?;
    txn.commit().await?;

    Ok(Json(json!({
        "message": "Resource deleted successfully."
    })))
}

//Structs
#[derive(Deserialize, Debug)]
struct CreateOrder {
    farmer_id: i32,
    name: String,
    description: String,
}

#[derive(Deserialize)]
struct PatchOrder {
    name: Option<String>,
    description: Option<String>,
}
