// src/handlers/companies.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{beneficiary::Beneficiary, company::Company},
};

// GET /api/companies
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    responses(
        (status = 200, description = "Empresas cadastradas", body = Vec<Company>)
    )
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state.company_service.list_companies().await?;
    Ok((StatusCode::OK, Json(companies)))
}

// GET /api/companies/{id}
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(
        ("id" = Uuid, Path, description = "ID da empresa")
    ),
    responses(
        (status = 200, description = "Empresa", body = Company),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_service.get_company(id).await?;
    Ok((StatusCode::OK, Json(company)))
}

// GET /api/companies/{id}/beneficiaries
#[utoipa::path(
    get,
    path = "/api/companies/{id}/beneficiaries",
    tag = "Companies",
    params(
        ("id" = Uuid, Path, description = "ID da empresa")
    ),
    responses(
        (status = 200, description = "Beneficiários ativos da empresa", body = Vec<Beneficiary>),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn list_company_beneficiaries(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let beneficiaries = app_state.company_service.list_beneficiaries(id).await?;
    Ok((StatusCode::OK, Json(beneficiaries)))
}
