// src/models/plan.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    #[schema(example = "Plano Familiar")]
    pub name: String,
    #[schema(example = 49.9)]
    pub price: Decimal,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Plano Individual")]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(example = 29.9)]
    pub price: Decimal,

    #[serde(default)]
    #[validate(range(min = 0, message = "A ordem de exibição não pode ser negativa"))]
    pub display_order: i32,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        let mut err = ValidationError::new("negative_price");
        err.message = Some("O preço não pode ser negativo".into());
        return Err(err);
    }
    Ok(())
}
