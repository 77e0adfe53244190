// src/handlers/plans.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::plan::{CreatePlanPayload, Plan},
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPlansResponse {
    pub loaded: usize,
}

// GET /api/plans
#[utoipa::path(
    get,
    path = "/api/plans",
    tag = "Plans",
    responses(
        (status = 200, description = "Planos em ordem de exibição", body = Vec<Plan>)
    )
)]
pub async fn list_plans(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let plans = app_state.plan_service.list_plans().await?;
    Ok((StatusCode::OK, Json(plans)))
}

// POST /api/plans
#[utoipa::path(
    post,
    path = "/api/plans",
    tag = "Plans",
    request_body = CreatePlanPayload,
    responses(
        (status = 201, description = "Plano criado", body = Plan),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Nome de plano já existe")
    )
)]
pub async fn create_plan(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePlanPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let plan = app_state.plan_service.create_plan(&payload).await?;

    // O catálogo da importação passa a enxergar o novo preço.
    let plans = app_state.plan_service.list_plans().await?;
    app_state.import_service.load_plans(plans).await;

    Ok((StatusCode::CREATED, Json(plan)))
}

// POST /api/plans/refresh
#[utoipa::path(
    post,
    path = "/api/plans/refresh",
    tag = "Plans",
    responses(
        (status = 200, description = "Catálogo de planos recarregado", body = RefreshPlansResponse)
    )
)]
pub async fn refresh_plans(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let plans = app_state.plan_service.list_plans().await?;
    let loaded = app_state.import_service.load_plans(plans).await;
    Ok((StatusCode::OK, Json(RefreshPlansResponse { loaded })))
}
