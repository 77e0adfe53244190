// src/models/import.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Pending,
    Success,
    Partial,
    Failure,
}

impl RowStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RowStatus::Pending => "pending",
            RowStatus::Success => "success",
            RowStatus::Partial => "partial",
            RowStatus::Failure => "failure",
        }
    }
}

// O que fazer com os benefícios já gravados que a planilha não menciona.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BenefitsMode {
    /// Substitui o mapa inteiro pelo subconjunto reconhecido na linha.
    #[default]
    Replace,
    /// Sobrepõe as chaves da linha ao mapa já gravado.
    Merge,
}

// Comportamento quando um CNPJ já resolvido reaparece na mesma importação.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompanyCachePolicy {
    /// Reaproveita o id e não escreve nada.
    #[default]
    Skip,
    /// Reaproveita o id e reaplica os campos quando diferem da última escrita.
    Reapply,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    #[serde(default)]
    pub benefits_mode: BenefitsMode,
    #[serde(default)]
    pub cache_policy: CompanyCachePolicy,
    /// Linhas sem nenhum dado reconhecível são ignoradas em vez de contadas como falha.
    #[serde(default)]
    pub skip_blank_rows: bool,
}

// --- LOG DE LINHA ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowLog {
    /// Posição 1-based na ordem das linhas de dados da planilha.
    pub index: usize,
    pub cnpj: Option<String>,
    pub company_name: Option<String>,
    pub cpf: Option<String>,
    pub beneficiary_name: Option<String>,
    pub status: RowStatus,
    pub message: String,
}

impl ImportRowLog {
    pub fn pending(index: usize) -> Self {
        Self {
            index,
            cnpj: None,
            company_name: None,
            cpf: None,
            beneficiary_name: None,
            status: RowStatus::Pending,
            message: String::new(),
        }
    }

    /// Leva a linha ao seu estado terminal. Só pode acontecer uma vez.
    pub fn complete(&mut self, status: RowStatus, message: impl Into<String>) {
        debug_assert_eq!(self.status, RowStatus::Pending, "linha {} já finalizada", self.index);
        debug_assert_ne!(status, RowStatus::Pending);
        self.status = status;
        self.message = message.into();
    }
}

// --- RESUMO DA EXECUÇÃO ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_rows: usize,

    pub companies_succeeded: usize,
    pub companies_inserted: usize,
    pub companies_updated: usize,
    pub companies_cached: usize,

    pub beneficiaries_succeeded: usize,
    pub beneficiaries_inserted: usize,
    pub beneficiaries_updated: usize,

    pub successes: usize,
    pub partials: usize,
    pub failures: usize,

    pub skipped_rows: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub summary: ImportSummary,
    pub rows: Vec<ImportRowLog>,
}
