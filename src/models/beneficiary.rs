// src/models/beneficiary.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeneficiaryStatus {
    Titular,
    Dependente,
    Other(String),
}

impl BeneficiaryStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BeneficiaryStatus::Titular => "titular",
            BeneficiaryStatus::Dependente => "dependente",
            BeneficiaryStatus::Other(s) => s,
        }
    }
}

// Colaborador (ou dependente) vinculado a uma empresa.
// `deleted_at` preenchido = removido logicamente; some das listagens mas fica para auditoria.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: Uuid,
    pub company_id: Option<Uuid>,

    #[schema(example = "12345678900")]
    pub cpf: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub dependents: Option<i32>,

    #[schema(example = "titular")]
    pub status: String,
    pub active: bool,

    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados de escrita de um beneficiário. `None` = coluna não veio na planilha,
// o valor gravado é mantido no update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeneficiaryFields {
    pub cpf: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub dependents: Option<i32>,
    pub status: Option<BeneficiaryStatus>,
    pub active: Option<bool>,
}
