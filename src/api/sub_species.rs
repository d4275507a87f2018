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
    species,
    sub_species::{self, Entity as SubSpeciesEntity},
};
use crate::middleware::logging::ApiError;

//ROUTERS
pub fn sub_species_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route(
            "/species/:species_id/sub_species",
            post(create_sub_species).get(list_sub_species),
        )
        .route(
            "/species/:species_id/sub_species/:sub_species_id",
            get(get_sub_species)
                .patch(patch_sub_species)
                .delete(delete_sub_species),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_sub_species(
    Path(species_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateSubSpecies>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(
        "->> Called `create_sub_species()` with payload: {:?}",
        payload
    );

    let txn = db.begin().await?;

    if species::Entity::find_by_id(species_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "No species with {} id was found.",
            species_id
        )));
    }

    let new_sub_species = sub_species::ActiveModel {
        species_id: Set(species_id),
        name: Set(payload.name),
        common_name: Set(payload.common_name),
        description: Set(payload.description),
        growth_rate: Set(payload.growth_rate),
        unique_traits: Set(payload.unique_traits),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let sub_species = new_sub_species.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(sub_species)))
}

async fn list_sub_species(
    Path(species_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let sub_species = SubSpeciesEntity::find()
        .filter(sub_species::Column::SpeciesId.eq(species_id))
        .all(&txn)
        .await?;

    Ok(Json(sub_species))
}

async fn get_sub_species(
    Path((species_id, sub_species_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let sub_species = find_scoped_sub_species(&txn, species_id, sub_species_id).await?;

    Ok(Json(sub_species))
}

async fn patch_sub_species(
    Path((species_id, sub_species_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchSubSpecies>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let sub_species = find_scoped_sub_species(&txn, species_id, sub_species_id).await?;
    let mut sub_species: sub_species::ActiveModel = sub_species.into();

    if let Some(name) = payload.name {
        sub_species.name = Set(name);
    }
    if let Some(common_name) = payload.common_name {
        sub_species.common_name = Set(common_name);
    }
    if let Some(description) = payload.description {
        sub_species.description = Set(description);
    }
    if let Some(growth_rate) = payload.growth_rate {
        sub_species.growth_rate = Set(growth_rate);
    }
    if let Some(unique_traits) = payload.unique_traits {
        sub_species.unique_traits = Set(unique_traits);
    }

    let sub_species = sub_species.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(sub_species))
}

async fn delete_sub_species(
    Path((species_id, sub_species_id)): Path<(i32, i32)>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let sub_species = find_scoped_sub_species(&txn, species_id, sub_species_id).await?;

    let sub_species: sub_species::ActiveModel = sub_species.into();
    sub_species.delete(&txn).await?;
    txn.commit().await?;

    Ok(Json(json!({
        "message": "Resource deleted successfully."
    })))
}

//UTILS
async fn find_scoped_sub_species(
    txn: &DatabaseTransaction,
    species_id: i32,
    sub_species_id: i32,
) -> Result<sub_species::Model, ApiError> {
    SubSpeciesEntity::find_by_id(sub_species_id)
        .filter(sub_species::Column::SpeciesId.eq(species_id))
        .one(txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No sub species with {} id was found.",
                sub_species_id
            ))
        })
}

//Structs
#[derive(Deserialize, Debug)]
struct CreateSubSpecies {
    name: String,
    common_name: String,
    description: String,
    growth_rate: String,
    unique_traits: String,
}

#[derive(Deserialize)]
struct PatchSubSpecies {
    name: Option<String>,
    common_name: Option<String>,
    description: Option<String>,
    growth_rate: Option<String>,
    unique_traits: Option<String>,
}
