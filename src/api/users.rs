use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::entities::{
    phone,
    user::{self, Entity as UserEntity, Role},
};
use crate::middleware::logging::ApiError;

//ROUTERS
pub fn users_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/:user_id",
            get(get_user).patch(patch_user).delete(delete_user),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateUser>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("->> Called `create_user()` for email: {}", payload.email);

    if let Some(err) = payload.validate().err() {
        return Err(ApiError::Validation(err.to_string()));
    }

    let txn = db.begin().await?;

    ensure_phone(&txn, &payload.phone).await?;

    let new_user = user::ActiveModel {
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        password: Set(hash_password(&payload.password)?),
        role: Set(payload.role.unwrap_or(Role::Buyer)),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let user = new_user.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(UserResponse::new(user))))
}

async fn list_users(
    Query(params): Query<UsersQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let users = UserEntity::find()
        .order_by_asc(user::Column::Id)
        .offset(params.skip.unwrap_or(0))
        .limit(params.limit.unwrap_or(100))
        .all(&txn)
        .await?;

    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::new).collect();
    Ok(Json(response))
}

async fn get_user(
    Path(user_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let user = UserEntity::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user with {} id was found.", user_id)))?;

    Ok(Json(UserResponse::new(user)))
}

async fn patch_user(
    Path(user_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchUser>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(err) = payload.validate().err() {
        return Err(ApiError::Validation(err.to_string()));
    }

    let txn = db.begin().await?;

    let user = UserEntity::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user with {} id was found.", user_id)))?;
    let mut user: user::ActiveModel = user.into();

    if let Some(first_name) = payload.first_name {
        user.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        user.last_name = Set(last_name);
    }
    if let Some(email) = payload.email {
        user.email = Set(email);
    }
    if let Some(number) = payload.phone {
        ensure_phone(&txn, &number).await?;
        user.phone = Set(number);
    }
    if let Some(new_password) = payload.new_password {
        user.password = Set(hash_password(&new_password)?);
    }
    if let Some(role) = payload.role {
        user.role = Set(role);
    }

    let user = user.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(UserResponse::new(user)))
}

async fn delete_user(
    Path(user_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let user = UserEntity::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user with {} id was found.", user_id)))?;

    let user: user::ActiveModel = user.into();
    user.delete(&txn).await?;
    txn.commit().await?;

    Ok(Json(json!({
        "message": "Resource deleted successfully."
    })))
}

//UTILS

/// Missing phone contacts are provisioned transparently, both on user
/// creation and when a patch reassigns the number.
async fn ensure_phone(txn: &DatabaseTransaction, number: &str) -> Result<(), ApiError> {
    if phone::Entity::find_by_id(number.to_owned())
        .one(txn)
        .await?
        .is_none()
    {
        let new_phone = phone::ActiveModel {
            phone: Set(number.to_owned()),
            dnd: Set(None),
            whatsapp: Set(None),
        };
        phone::Entity::insert(new_phone).exec(txn).await?;
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ApiError::Internal)
}

//Structs
#[derive(Deserialize, Debug, Validate)]
struct CreateUser {
    first_name: String,
    last_name: String,
    #[validate(email)]
    email: String,
    phone: String,
    password: String,
    role: Option<Role>,
}

#[derive(Deserialize, Validate)]
struct PatchUser {
    first_name: Option<String>,
    last_name: Option<String>,
    #[validate(email)]
    email: Option<String>,
    phone: Option<String>,
    new_password: Option<String>,
    role: Option<Role>,
}

#[derive(Deserialize)]
struct UsersQuery {
    skip: Option<u64>,
    limit: Option<u64>,
}

#[derive(Serialize)]
struct UserResponse {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    role: Role,
    created_at: DateTimeWithTimeZone,
}

impl UserResponse {
    fn new(value: user::Model) -> UserResponse {
        UserResponse {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            role: value.role,
            created_at: value.created_at,
        }
    }
}
