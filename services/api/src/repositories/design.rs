//! Design repository for generated artwork records

use anyhow::Result;
use sqlx::PgPool;

use crate::models::{Design, NewDesign};

/// Design repository for database operations
#[derive(Clone)]
pub struct DesignRepository {
    pool: PgPool,
}

impl DesignRepository {
    /// Create a new design repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a generated design record
    pub async fn create(&self, new_design: &NewDesign) -> Result<Design> {
        let design = sqlx::query_as::<_, Design>(
            r#"
            INSERT INTO designs (prompt, enhanced_prompt, image_url, style)
            VALUES ($1, $2, $3, $4)
            RETURNING id, prompt, enhanced_prompt, image_url, style, created_at
            "#,
        )
        .bind(&new_design.prompt)
        .bind(&new_design.enhanced_prompt)
        .bind(&new_design.image_url)
        .bind(&new_design.style)
        .fetch_one(&self.pool)
        .await?;

        Ok(design)
    }
}
