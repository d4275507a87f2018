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
    farm::{self, Entity as FarmEntity},
    farm_species::{self, Entity as FarmSpeciesEntity},
    sub_species,
};
use crate::middleware::logging::ApiError;

//ROUTERS
pub fn farm_species_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route(
            "/users/:user_id/farms/:farm_id/farm_species",
            post(create_farm_species).get(list_farm_species),
        )
        .route(
            "/users/:user_id/farms/:farm_id/farm_species/:farm_species_id",
            get(get_farm_species)
                .patch(patch_farm_species)
                .delete(delete_farm_species),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_farm_species(
    Path((user_id, farm_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateFarmSpecies>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(
        "->> Called `create_farm_species()` with payload: {:?}",
        payload
    );

    let txn = db.begin().await?;

    let farm = find_scoped_farm(&txn, user_id, farm_id).await?;

    if sub_species::Entity::find_by_id(payload.sub_species_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "No sub species with {} id was found.",
            payload.sub_species_id
        )));
    }

    let new_offering = farm_species::ActiveModel {
        farm_id: Set(farm.id),
        sub_species_id: Set(payload.sub_species_id),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        available_quantity: Set(payload.available_quantity),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let offering = new_offering.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(offering)))
}

async fn list_farm_species(
    Path((user_id, farm_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let farm = find_scoped_farm(&txn, user_id, farm_id).await?;

    let offerings = FarmSpeciesEntity::find()
        .filter(farm_species::Column::FarmId.eq(farm.id))
        .all(&txn)
        .await?;

    Ok(Json(offerings))
}

async fn get_farm_species(
    Path((user_id, farm_id, farm_species_id)): Path<(i32, i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let farm = find_scoped_farm(&txn, user_id, farm_id).await?;
    let offering = find_scoped_offering(&txn, farm.id, farm_species_id).await?;

    Ok(Json(offering))
}

async fn patch_farm_species(
    Path((user_id, farm_id, farm_species_id)): Path<(i32, i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchFarmSpecies>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let farm = find_scoped_farm(&txn, user_id, farm_id).await?;
    let offering = find_scoped_offering(&txn, farm.id, farm_species_id).await?;
    let mut offering: farm_species::ActiveModel = offering.into();

    if let Some(name) = payload.name {
        offering.name = Set(name);
    }
    if let Some(description) = payload.description {
        offering.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        offering.price = Set(price);
    }
    if let Some(available_quantity) = payload.available_quantity {
        offering.available_quantity = Set(available_quantity);
    }

    let offering = offering.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(offering))
}

async fn delete_farm_species(
    Path((user_id, farm_id, farm_species_id)): Path<(i32, i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let farm = find_scoped_farm(&txn, user_id, farm_id).await?;
    let offering = find_scoped_offering(&txn, farm.id, farm_species_id).await?;

    let offering: farm_species::ActiveModel = offering.into();
    offering.delete(&txn).await?;
    txn.commit().await?;

    Ok(Json(json!({
        "message": "Resource deleted successfully."
    })))
}

//UTILS

/// An existing farm under a different owner is the same NotFound as a
/// missing one.
async fn find_scoped_farm(
    txn: &DatabaseTransaction,
    user_id: i32,
    farm_id: i32,
) -> Result<farm::Model, ApiError> {
    FarmEntity::find_by_id(farm_id)
        .filter(farm::Column::UserId.eq(user_id))
        .one(txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No farm with {} id was found.", farm_id)))
}

async fn find_scoped_offering(
    txn: &DatabaseTransaction,
    farm_id: i32,
    farm_species_id: i32,
) -> Result<farm_species::Model, ApiError> {
    FarmSpeciesEntity::find_by_id(farm_species_id)
        .filter(farm_species::Column::FarmId.eq(farm_id))
        .one(txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No farm species with {} id was found.",
                farm_species_id
            ))
        })
}

//Structs
#[derive(Deserialize, Debug)]
struct CreateFarmSpecies {
    sub_species_id: i32,
    name: String,
    description: Option<String>,
    price: f64,
    available_quantity: i32,
}

#[derive(Deserialize)]
struct PatchFarmSpecies {
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    available_quantity: Option<i32>,
}
