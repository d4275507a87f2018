use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::entities::{
    category,
    species::{self, Entity as SpeciesEntity},
};
use crate::middleware::logging::ApiError;

//ROUTERS
pub fn species_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/species", post(create_species).get(list_species))
        .route(
            "/species/:species_id",
            get(get_species).patch(patch_species).delete(delete_species),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_species(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateSpecies>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("->> Called `create_species()` with payload: {:?}", payload);

    let txn = db.begin().await?;

    ensure_category(&txn, &payload.category_name).await?;

    let new_species = species::ActiveModel {
        category_name: Set(payload.category_name),
        common_name: Set(payload.common_name),
        scientific_name: Set(payload.scientific_name),
        description: Set(payload.description),
        genus: Set(payload.genus),
        family: Set(payload.family),
        optimal_temperature_min: Set(payload.optimal_temperature_min),
        optimal_temperature_max: Set(payload.optimal_temperature_max),
        optimal_humidity: Set(payload.optimal_humidity),
        optimal_ph: Set(payload.optimal_ph),
        water_requirement_per_litre: Set(payload.water_requirement_per_litre),
        nutrient_requirement_per_kg: Set(payload.nutrient_requirement_per_kg),
        lifespan: Set(payload.lifespan),
        native_region: Set(payload.native_region),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let species = new_species.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(species)))
}

async fn list_species(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let species = SpeciesEntity::find().all(&txn).await?;

    Ok(Json(species))
}

async fn get_species(
    Path(species_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let species = SpeciesEntity::find_by_id(species_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No species with {} id was found.", species_id))
        })?;

    Ok(Json(species))
}

async fn patch_species(
    Path(species_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchSpecies>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let species = SpeciesEntity::find_by_id(species_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No species with {} id was found.", species_id))
        })?;
    let mut species: species::ActiveModel = species.into();

    if let Some(common_name) = payload.common_name {
        species.common_name = Set(common_name);
    }
    if let Some(scientific_name) = payload.scientific_name {
        species.scientific_name = Set(scientific_name);
    }
    if let Some(description) = payload.description {
        species.description = Set(description);
    }
    if let Some(genus) = payload.genus {
        species.genus = Set(genus);
    }
    if let Some(family) = payload.family {
        species.family = Set(family);
    }
    if let Some(optimal_temperature_min) = payload.optimal_temperature_min {
        species.optimal_temperature_min = Set(optimal_temperature_min);
    }
    if let Some(optimal_temperature_max) = payload.optimal_temperature_max {
        species.optimal_temperature_max = Set(optimal_temperature_max);
    }
    if let Some(optimal_humidity) = payload.optimal_humidity {
        species.optimal_humidity = Set(optimal_humidity);
    }
    if let Some(optimal_ph) = payload.optimal_ph {
        species.optimal_ph = Set(optimal_ph);
    }
    if let Some(water_requirement_per_litre) = payload.water_requirement_per_litre {
        species.water_requirement_per_litre = Set(water_requirement_per_litre);
    }
    if let Some(nutrient_requirement_per_kg) = payload.nutrient_requirement_per_kg {
        species.nutrient_requirement_per_kg = Set(nutrient_requirement_per_kg);
    }
    if let Some(lifespan) = payload.lifespan {
        species.lifespan = Set(lifespan);
    }
    if let Some(native_region) = payload.native_region {
        species.native_region = Set(native_region);
    }

    let species = species.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(species))
}

async fn delete_species(
    Path(species_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let species = SpeciesEntity::find_by_id(species_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No species with {} id was found.", species_id))
        })?;

    let species: species::ActiveModel = species.into();
    species.delete(&txn).await?;
    txn.commit().await?;

    Ok(Json(json!({
        "message": "Resource deleted successfully."
    })))
}

//UTILS

/// Categories are provisioned on demand; species creation never fails on a
/// missing category.
async fn ensure_category(txn: &DatabaseTransaction, name: &str) -> Result<(), ApiError> {
    if category::Entity::find_by_id(name.to_owned())
        .one(txn)
        .await?
        .is_none()
    {
        let new_category = category::ActiveModel {
            category: Set(name.to_owned()),
            description: Set(None),
        };
        category::Entity::insert(new_category).exec(txn).await?;
    }
    Ok(())
}

//Structs
#[derive(Deserialize, Debug)]
struct CreateSpecies {
    category_name: String,
    common_name: String,
    scientific_name: String,
    description: String,
    genus: String,
    family: String,
    optimal_temperature_min: f64,
    optimal_temperature_max: f64,
    optimal_humidity: f64,
    optimal_ph: f64,
    water_requirement_per_litre: f64,
    nutrient_requirement_per_kg: f64,
    lifespan: i32,
    native_region: String,
}

#[derive(Deserialize)]
struct PatchSpecies {
    common_name: Option<String>,
    scientific_name: Option<String>,
    description: Option<String>,
    genus: Option<String>,
    family: Option<String>,
    optimal_temperature_min: Option<f64>,
    optimal_temperature_max: Option<f64>,
    optimal_humidity: Option<f64>,
    optimal_ph: Option<f64>,
    water_requirement_per_litre: Option<f64>,
    nutrient_requirement_per_kg: Option<f64>,
    lifespan: Option<i32>,
    native_region: Option<String>,
}
