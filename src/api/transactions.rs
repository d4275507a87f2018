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
    farm, order,
    transaction::{self, Entity as TransactionEntity},
    user,
};
use crate::middleware::logging::ApiError;

//ROUTERS
pub fn transactions_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route(
            "/transactions",
            post(create_transaction).get(list_transactions),
        )
        .route(
            "/transactions/:transaction_id",
            get(get_transaction)
                .patch(patch_transaction)
                .delete(delete_transaction),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_transaction(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(
        "->> Called `create_transaction()` with payload: {:?}",
        payload
    );

    let txn = db.begin().await?;

    if user::Entity::find_by_id(payload.buyer_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "No user with {} id was found.",
            payload.buyer_id
        )));
    }
    if farm::Entity::find_by_id(payload.farm_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "No farm with {} id was found.",
            payload.farm_id
        )));
    }
    if order::Entity::find_by_id(payload.order_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "No order with {} id was found.",
            payload.order_id
        )));
    }

    let new_transaction = transaction::ActiveModel {
        buyer_id: Set(payload.buyer_id),
        farm_id: Set(payload.farm_id),
        order_id: Set(payload.order_id),
        total_amount: Set(payload.total_amount),
        status: Set(payload.status),
        payment_method: Set(payload.payment_method),
        transaction_date: Set(Utc::now().into()),
        ..Default::default()
    };

    let transaction = new_transaction.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn list_transactions(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let transactions = TransactionEntity::find().all(&txn).await?;

    Ok(Json(transactions))
}

async fn get_transaction(
    Path(transaction_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let transaction = TransactionEntity::find_by_id(transaction_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No transaction with {} id was found.",
                transaction_id
            ))
        })?;

    Ok(Json(transaction))
}

async fn patch_transaction(
    Path(transaction_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let transaction = TransactionEntity::find_by_id(transaction_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No transaction with {} id was found.",
                transaction_id
            ))
        })?;
    let mut transaction: transaction::ActiveModel = transaction.into();

    if let Some(total_amount) = payload.total_amount {
        transaction.total_amount = Set(total_amount);
    }
    // Status is free text; no transition rules are enforced.
    if let Some(status) = payload.status {
        transaction.status = Set(status);
    }
    if let Some(payment_method) = payload.payment_method {
        transaction.payment_method = Set(payment_method);
    }

    let transaction = transaction.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(transaction))
}

async fn delete_transaction(
    Path(transaction_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let transaction = TransactionEntity::find_by_id(transaction_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No transaction with {} id was found.",
                transaction_id
            ))
        })?;

    let transaction: transaction::ActiveModel = transaction.into();
    transaction.delete(&txn).await?;
    txn.commit().await?;

    Ok(Json(json!({
        "message": "Resource deleted successfully."
    })))
}

//Structs
#[derive(Deserialize, Debug)]
struct CreateTransaction {
    buyer_id: i32,
    farm_id: i32,
    order_id: i32,
    total_amount: f64,
    status: String,
    payment_method: String,
}

#[derive(Deserialize)]
struct PatchTransaction {
    total_amount: Option<f64>,
    status: Option<String>,
    payment_method: Option<String>,
}
