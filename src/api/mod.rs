pub mod farm_species;
pub mod farms;
pub mod order_items;
pub mod orders;
pub mod species;
pub mod sub_species;
pub mod transactions;
pub mod users;

use axum::{middleware::from_fn, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::middleware::logging::logging_middleware;

use farm_species::farm_species_router;
use farms::farms_router;
use order_items::order_items_router;
use orders::orders_router;
use species::species_router;
use sub_species::sub_species_router;
use transactions::transactions_router;
use users::users_router;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .nest("/api/v1", users_router(shared_db.clone()))
        .nest("/api/v1", farms_router(shared_db.clone()))
        .nest("/api/v1", farm_species_router(shared_db.clone()))
        .nest("/api/v1", species_router(shared_db.clone()))
        .nest("/api/v1", sub_species_router(shared_db.clone()))
        .nest("/api/v1", orders_router(shared_db.clone()))
        .nest("/api/v1", order_items_router(shared_db.clone()))
        .nest("/api/v1", transactions_router(shared_db))
        .layer(from_fn(logging_middleware))
}
