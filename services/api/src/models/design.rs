//! Design model for generated artwork records

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted design generation record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Design {
    pub id: Uuid,
    pub prompt: String,
    pub enhanced_prompt: String,
    pub image_url: String,
    pub style: String,
    pub created_at: DateTime<Utc>,
}

/// New design creation payload
#[derive(Debug, Clone)]
pub struct NewDesign {
    pub prompt: String,
    pub enhanced_prompt: String,
    pub image_url: String,
    pub style: String,
}
