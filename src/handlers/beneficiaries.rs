// src/handlers/beneficiaries.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState};

// DELETE /api/beneficiaries/{id}
#[utoipa::path(
    delete,
    path = "/api/beneficiaries/{id}",
    tag = "Beneficiaries",
    params(
        ("id" = Uuid, Path, description = "ID do beneficiário")
    ),
    responses(
        (status = 204, description = "Beneficiário removido"),
        (status = 404, description = "Beneficiário não encontrado ou já removido")
    )
)]
pub async fn delete_beneficiary(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.beneficiary_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
