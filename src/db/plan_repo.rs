// src/db/plan_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{common::error::AppError, models::plan::Plan};

#[derive(Clone)]
pub struct PlanRepository {
    pool: PgPool,
}

impl PlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Plan>, AppError> {
        let plans = sqlx::query_as::<_, Plan>(
            "SELECT * FROM plans ORDER BY display_order ASC, name ASC",
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(plans)
    }

    pub async fn create(&self, name: &str, price: Decimal, display_order: i32) -> Result<Plan, AppError> {
        sqlx::query_as::<_, Plan>(
            r#"
            INSERT INTO plans (name, price, display_order)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
            .bind(name)
            .bind(price)
            .bind(display_order)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::PlanNameAlreadyExists(name.to_string());
                    }
                }
                e.into()
            })
    }
}
