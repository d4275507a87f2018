use agromarket::{api::create_api_router, entities::setup_schema};
use reqwest::{Client, StatusCode};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
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

async fn post_created(client: &Client, url: String, payload: serde_json::Value) -> i64 {
    let response = client
        .post(url)
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    body["id"].as_i64().expect("Id missing")
}

/// A farmer with two farms and one offering listed under the first.
async fn seed(client: &Client, base: &str) -> (i64, i64, i64, i64) {
    let farmer_id = post_created(
        client,
        format!("{base}/api/v1/users"),
        serde_json::json!({
            "first_name": "Asha",
            "last_name": "Patel",
            "email": "farmer@example.com",
            "phone": "+911234567890",
            "password": "Secret15",
            "role": "farmer"
        }),
    )
    .await;

    let farm_id = post_created(
        client,
        format!("{base}/api/v1/users/{farmer_id}/farms"),
        serde_json::json!({
            "name": "Green Acres",
            "latitude": 10.0,
            "longitude": 20.0
        }),
    )
    .await;

    let other_farm_id = post_created(
        client,
        format!("{base}/api/v1/users/{farmer_id}/farms"),
        serde_json::json!({
            "name": "Hilltop Plot",
            "latitude": 11.0,
            "longitude": 21.0
        }),
    )
    .await;

    let species_id = post_created(
        client,
        format!("{base}/api/v1/species"),
        serde_json::json!({
            "category_name": "Fruit",
            "common_name": "Mango",
            "scientific_name": "Mangifera indica",
            "description": "Tropical fruit tree",
            "genus": "Mangifera",
            "family": "Anacardiaceae",
            "optimal_temperature_min": 24.0,
            "optimal_temperature_max": 30.0,
            "optimal_humidity": 60.0,
            "optimal_ph": 6.0,
            "water_requirement_per_litre": 40.0,
            "nutrient_requirement_per_kg": 2.5,
            "lifespan": 100,
            "native_region": "South Asia"
        }),
    )
    .await;

    let sub_species_id = post_created(
        client,
        format!("{base}/api/v1/species/{species_id}/sub_species"),
        serde_json::json!({
            "name": "Alphonso",
            "common_name": "Alphonso mango",
            "description": "Premium cultivar",
            "growth_rate": "slow",
            "unique_traits": "Saffron flesh"
        }),
    )
    .await;

    let farm_species_id = post_created(
        client,
        format!("{base}/api/v1/users/{farmer_id}/farms/{farm_id}/farm_species"),
        serde_json::json!({
            "sub_species_id": sub_species_id,
            "name": "Alphonso crate",
            "price": 12.0,
            "available_quantity": 40
        }),
    )
    .await;

    (farmer_id, farm_id, other_farm_id, farm_species_id)
}

#[tokio::test]
async fn test_create_requires_existing_sub_species() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    let (farmer_id, farm_id, _, _) = seed(&client, &base).await;

    let payload = serde_json::json!({
        "sub_species_id": 424242,
        "name": "Phantom crate",
        "price": 1.0,
        "available_quantity": 1
    });
    let response = client
        .post(format!(
            "{base}/api/v1/users/{farmer_id}/farms/{farm_id}/farm_species"
        ))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_read_scoped_to_owning_farm() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    let (farmer_id, farm_id, other_farm_id, farm_species_id) = seed(&client, &base).await;

    let response = client
        .get(format!(
            "{base}/api/v1/users/{farmer_id}/farms/{farm_id}/farm_species/{farm_species_id}"
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    // The id exists, but under a different farm: same NotFound outcome.
    let response = client
        .get(format!(
            "{base}/api/v1/users/{farmer_id}/farms/{other_farm_id}/farm_species/{farm_species_id}"
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_offering() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    let (farmer_id, farm_id, _, farm_species_id) = seed(&client, &base).await;

    let patch = serde_json::json!({
        "price": 15.0
    });
    let response = client
        .patch(format!(
            "{base}/api/v1/users/{farmer_id}/farms/{farm_id}/farm_species/{farm_species_id}"
        ))
        .json(&patch)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body["price"], 15.0);
    assert_eq!(body["name"], "Alphonso crate");
    assert_eq!(body["available_quantity"], 40);
}

#[tokio::test]
async fn test_list_scoped_to_farm() {
    let (base, _db) = spawn_app().await;
    let client = Client::new();

    let (farmer_id, farm_id, other_farm_id, _) = seed(&client, &base).await;

    let response = client
        .get(format!(
            "{base}/api/v1/users/{farmer_id}/farms/{farm_id}/farm_species"
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body.as_array().expect("Expected an array").len(), 1);

    let response = client
        .get(format!(
            "{base}/api/v1/users/{farmer_id}/farms/{other_farm_id}/farm_species"
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body.as_array().expect("Expected an array").len(), 0);
}
