//! HTTP routes for the Printloom backend

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{NewDesign, Role},
    state::AppState,
    validation::{validate_email, validate_password, validate_username},
};

/// Placeholder artwork returned while real generation stays out of scope.
const MOCK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1583336633292-2ec414d95204?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80";

/// Request for user registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    /// Email or username; both are accepted.
    pub identifier: String,
    pub password: String,
}

/// Response for user login
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub last_login: Option<DateTime<Utc>>,
}

/// Request for mock design generation
#[derive(Deserialize)]
pub struct GenerateDesignRequest {
    pub prompt: String,
    pub style: Option<String>,
}

/// Response for mock design generation
#[derive(Serialize)]
pub struct GenerateDesignResponse {
    pub success: bool,
    pub image_url: String,
    pub enhanced_prompt: String,
    pub design_id: Uuid,
}

/// Create the router for the backend
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/products", get(get_products))
        .route("/generate-design", post(generate_design))
        .with_state(state)
}

async fn root() -> &'static str {
    "Backend is running!"
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "printloom-api"
    }))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_username(&payload.username).map_err(ApiError::BadRequest)?;
    validate_email(&payload.email).map_err(ApiError::BadRequest)?;
    validate_password(&payload.password).map_err(ApiError::BadRequest)?;

    state
        .auth
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "User created successfully"})),
    ))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Login attempt for {}", payload.identifier);

    let outcome = state
        .auth
        .login(&payload.identifier, &payload.password)
        .await?;

    let user = outcome.user;
    Ok(Json(LoginResponse {
        token: outcome.token,
        user_id: user.id,
        username: user.username,
        role: user.role,
        last_login: user.last_login,
    }))
}

/// Catalog listing endpoint
pub async fn get_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state.products.list_all().await.map_err(|e| {
        error!("Failed to fetch products: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(products))
}

/// Mock design generation endpoint
pub async fn generate_design(
    State(state): State<AppState>,
    Json(payload): Json<GenerateDesignRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Received design prompt: {}", payload.prompt);

    let new_design = NewDesign {
        enhanced_prompt: format!(
            "Enhanced version of: {} - High quality, detailed, trending on artstation.",
            payload.prompt
        ),
        image_url: MOCK_IMAGE_URL.to_string(),
        style: payload.style.unwrap_or_else(|| "General".to_string()),
        prompt: payload.prompt,
    };

    let design = state.designs.create(&new_design).await.map_err(|e| {
        error!("Failed to save design: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(GenerateDesignResponse {
        success: true,
        image_url: design.image_url,
        enhanced_prompt: design.enhanced_prompt,
        design_id: design.id,
    }))
}
