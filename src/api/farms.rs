use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::entities::{
    farm::{self, Entity as FarmEntity, FarmType},
    user::{Entity as UserEntity, Role},
};
use crate::middleware::logging::ApiError;

//ROUTERS
pub fn farms_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/users/:user_id/farms", post(create_farm).get(list_farms))
        .route(
            "/users/:user_id/farms/:farm_id",
            get(get_farm).patch(patch_farm).delete(delete_farm),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_farm(
    Path(user_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateFarm>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("->> Called `create_farm()` with payload: {:?}", payload);

    let txn = db.begin().await?;

    let owner = UserEntity::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user with {} id was found.", user_id)))?;

    // Only users with the farmer role can own farms.
    if owner.role != Role::Farmer {
        return Err(ApiError::PermissionDenied(format!(
            "User {} is not a farmer and cannot create farms.",
            owner.id
        )));
    }

    let new_farm = farm::ActiveModel {
        user_id: Set(owner.id),
        farm_type: Set(payload.farm_type.unwrap_or(FarmType::Farm)),
        name: Set(payload.name),
        description: Set(payload.description),
        latitude: Set(payload.latitude),
        longitude: Set(payload.longitude),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let farm = new_farm.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(farm)))
}

async fn list_farms(
    Path(user_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let farms = FarmEntity::find()
        .filter(farm::Column::UserId.eq(user_id))
        .all(&txn)
        .await?;

    Ok(Json(farms))
}

async fn get_farm(
    Path((user_id, farm_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let farm = FarmEntity::find_by_id(farm_id)
        .filter(farm::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No farm with {} id was found.", farm_id)))?;

    Ok(Json(farm))
}

async fn patch_farm(
    Path((user_id, farm_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchFarm>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let farm = FarmEntity::find_by_id(farm_id)
        .filter(farm::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No farm with {} id was found.", farm_id)))?;
    let mut farm: farm::ActiveModel = farm.into();

    if let Some(farm_type) = payload.farm_type {
        farm.farm_type = Set(farm_type);
    }
    if let Some(name) = payload.name {
        farm.name = Set(name);
    }
    if let Some(description) = payload.description {
        farm.description = Set(Some(description));
    }
    if let Some(latitude) = payload.latitude {
        farm.latitude = Set(latitude);
    }
    if let Some(longitude) = payload.longitude {
        farm.longitude = Set(longitude);
    }

    let farm = farm.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(farm))
}

async fn delete_farm(
    Path((user_id, farm_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let farm = FarmEntity::find_by_id(farm_id)
        .filter(farm::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No farm with {} id was found.", farm_id)))?;

    let farm: farm::ActiveModel = farm.into();
    farm.delete(&txn).await?;
    txn.commit().await?;

    Ok(Json(json!({
        "message": "Resource deleted successfully."
    })))
}

//Structs
#[derive(Deserialize, Debug)]
struct CreateFarm {
    #[serde(rename = "type")]
    farm_type: Option<FarmType>,
    name: String,
    description: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct PatchFarm {
    #[serde(rename = "type")]
    farm_type: Option<FarmType>,
    name: Option<String>,
    description: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}
