use agromarket::{api::create_api_router, entities::phone, entities::setup_schema};
use reqwest::{Client, StatusCode};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait};
use std::sync::Arc;

async fn spawn_app() -> (String, Arc<DatabaseConnection>) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to connect to database");
    setup_schema(&db).await;
    let db = Arc::new(db);

    let app = create_api_router(db.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    (format!("http://{}", addr), db)
}

#[tokio::test]
async fn test_create_user() {
    let (base, db) = spawn_app().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "first_name": "Asha",
        "last_name": "Patel",
        "email": "asha@example.com",
        "phone": "+911234567890",
        "password": "Secret15",
        "role": "farmer"
    });

    let response = client
        .post(format!("{base}/api/v1/users"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["role"], "farmer");
    assert!(body["id"].as_i64().is_some());
    assert!(body["created_at"].as_str().is_some());
    // The password hash never leaves the service.
    assert!(body.get("password").is_none());

    // The referenced phone contact was provisioned on the fly.
    let contact = phone::Entity::find_by_id("+911234567890".to_owned())
        .one(&*db)
        .await
        .expect("Failed to query phones");
    assert!(contact.is_some());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "first_name": "Asha",
        "last_name": "Patel",
        "email": "asha@example.com",
        "phone": "+911234567890",
        "password": "Secret15"
    });

    let response = client
        .post(format!("{base}/api/v1/users"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(format!("{base}/api/v1/users"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "first_name": "Asha",
        "last_name": "Patel",
        "email": "not-an-email",
        "phone": "+911234567890",
        "password": "Secret15"
    });

    let response = client
        .post(format!("{base}/api/v1/users"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_default_role_is_buyer() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "first_name": "Ravi",
        "last_name": "Kumar",
        "email": "ravi@example.com",
        "phone": "+911111111111",
        "password": "Secret15"
    });

    let response = client
        .post(format!("{base}/api/v1/users"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body["role"], "buyer");
}

#[tokio::test]
async fn test_patch_user_partial_fields() {
    let (base, db) = spawn_app().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "first_name": "Asha",
        "last_name": "Patel",
        "email": "asha@example.com",
        "phone": "+911234567890",
        "password": "Secret15"
    });

    let response = client
        .post(format!("{base}/api/v1/users"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    let user_id = created["id"].as_i64().expect("User id missing");

    let patch = serde_json::json!({
        "first_name": "Aisha"
    });
    let response = client
        .patch(format!("{base}/api/v1/users/{user_id}"))
        .json(&patch)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body["first_name"], "Aisha");
    assert_eq!(body["last_name"], "Patel");
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["phone"], "+911234567890");

    // Reassigning the phone provisions the new contact as well.
    let patch = serde_json::json!({
        "phone": "+919999999999"
    });
    let response = client
        .patch(format!("{base}/api/v1/users/{user_id}"))
        .json(&patch)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let contact = phone::Entity::find_by_id("+919999999999".to_owned())
        .one(&*db)
        .await
        .expect("Failed to query phones");
    assert!(contact.is_some());
}

#[tokio::test]
async fn test_list_users_pagination() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    for n in 0..5 {
        let payload = serde_json::json!({
            "first_name": format!("User{n}"),
            "last_name": "Test",
            "email": format!("user{n}@example.com"),
            "phone": format!("+91000000000{n}"),
            "password": "Secret15"
        });
        let response = client
            .post(format!("{base}/api/v1/users"))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = client
        .get(format!("{base}/api/v1/users?skip=2&limit=2"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    let users = body.as_array().expect("Expected an array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "user2@example.com");

    // Defaults return everything below the 100 cap.
    let response = client
        .get(format!("{base}/api/v1/users"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body.as_array().expect("Expected an array").len(), 5);
}

#[tokio::test]
async fn test_get_missing_user() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{base}/api/v1/users/424242"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "first_name": "Asha",
        "last_name": "Patel",
        "email": "asha@example.com",
        "phone": "+911234567890",
        "password": "Secret15"
    });

    let response = client
        .post(format!("{base}/api/v1/users"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    let user_id = created["id"].as_i64().expect("User id missing");

    let response = client
        .delete(format!("{base}/api/v1/users/{user_id}"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body["message"], "Resource deleted successfully.");

    let response = client
        .get(format!("{base}/api/v1/users/{user_id}"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
