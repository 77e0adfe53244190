// src/handlers/imports.rs

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::AppError,
    config::AppState,
    import::{report::export_csv, CancelFlag},
    models::import::{BenefitsMode, CompanyCachePolicy, ImportOptions, ImportReport},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

// Campos explícitos (sem `flatten`): o serde_urlencoded não converte bool/enum dentro de flatten.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ImportQuery {
    /// Nome original do arquivo; a extensão escolhe o leitor (.csv/.txt ou planilha).
    #[param(example = "empresas.xlsx")]
    pub file_name: String,
    pub format: Option<ReportFormat>,
    pub benefits_mode: Option<BenefitsMode>,
    pub cache_policy: Option<CompanyCachePolicy>,
    pub skip_blank_rows: Option<bool>,
}

impl ImportQuery {
    fn options(&self) -> ImportOptions {
        ImportOptions {
            benefits_mode: self.benefits_mode.unwrap_or_default(),
            cache_policy: self.cache_policy.unwrap_or_default(),
            skip_blank_rows: self.skip_blank_rows.unwrap_or(false),
        }
    }
}

// Se o cliente desistir da requisição, o future do handler é descartado
// e a importação para na próxima linha.
struct CancelOnDrop(CancelFlag);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

// POST /api/imports
#[utoipa::path(
    post,
    path = "/api/imports",
    tag = "Imports",
    params(ImportQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "Conteúdo bruto da planilha"),
    responses(
        (status = 200, description = "Relatório da importação (JSON, ou CSV com format=csv)", body = ImportReport),
        (status = 400, description = "Arquivo vazio, ilegível ou sem dados"),
        (status = 413, description = "Arquivo acima do limite")
    )
)]
pub async fn import_spreadsheet(
    State(app_state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: Bytes,
) -> Result<Response, AppError> {
    let cancel = CancelFlag::new();
    let _guard = CancelOnDrop(cancel.clone());

    let service = app_state.import_service.clone();
    let options = query.options();
    let file_name = query.file_name.clone();

    let report = tokio::spawn(async move {
        service.run_import(&file_name, &body, options, &cancel).await
    })
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))??;

    match query.format.unwrap_or_default() {
        ReportFormat::Json => Ok((StatusCode::OK, Json(report)).into_response()),
        ReportFormat::Csv => {
            let csv = export_csv(&report.rows)?;
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"relatorio-importacao.csv\""),
                ],
                csv,
            )
                .into_response())
        }
    }
}
