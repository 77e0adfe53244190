// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Falhas no nível do arquivo: abortam a importação inteira antes de qualquer linha.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("O arquivo enviado está vazio.")]
    EmptyFile,

    #[error("Não foi possível ler a planilha: {0}")]
    Unreadable(String),

    #[error("A planilha não possui abas.")]
    NoSheets,

    #[error("A planilha não possui linha de cabeçalho.")]
    MissingHeader,

    #[error("A planilha não possui linhas de dados.")]
    NoDataRows,

    #[error("O arquivo excede o limite de {0} bytes.")]
    TooLarge(usize),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Empresa não encontrada: {0}")]
    CompanyNotFound(Uuid),

    #[error("Beneficiário não encontrado: {0}")]
    BeneficiaryNotFound(Uuid),

    #[error("Já existe um plano com o nome '{0}'.")]
    PlanNameAlreadyExists(String),

    #[error("Já existe uma empresa com o CNPJ '{0}'.")]
    CnpjAlreadyExists(String),

    #[error("{0}")]
    Import(#[from] ImportError),

    // A mensagem do banco é preservada: ela vai parar no log da linha importada.
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Falha de persistência: {0}")]
    StoreError(String),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CompanyNotFound(_) | AppError::BeneficiaryNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::PlanNameAlreadyExists(_) | AppError::CnpjAlreadyExists(_) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            AppError::Import(ref e) => {
                tracing::warn!("Importação rejeitada: {}", e);
                let status = match e {
                    ImportError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, e.to_string())
            }

            // Todo o resto vira 500; o detalhe fica apenas no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
