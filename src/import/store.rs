// src/import/store.rs
//
// O colaborador de persistência visto pelo pipeline de importação.
// Qualquer erro aqui é tratado como falha local da linha.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BeneficiaryRepository, CompanyRepository},
    models::{
        beneficiary::BeneficiaryFields,
        company::{Benefits, CompanyFields},
    },
};

#[async_trait]
pub trait ImportStore: Send + Sync {
    async fn find_company_by_cnpj(&self, cnpj: &str) -> Result<Option<Uuid>, AppError>;

    /// Benefícios gravados hoje; usado apenas no modo de mesclagem.
    async fn company_benefits(&self, id: Uuid) -> Result<Benefits, AppError>;

    async fn insert_company(&self, fields: &CompanyFields) -> Result<Uuid, AppError>;

    async fn update_company(&self, id: Uuid, fields: &CompanyFields) -> Result<(), AppError>;

    async fn find_beneficiary_by_cpf_and_company(
        &self,
        cpf: &str,
        company_id: Option<Uuid>,
    ) -> Result<Option<Uuid>, AppError>;

    async fn insert_beneficiary(
        &self,
        company_id: Option<Uuid>,
        fields: &BeneficiaryFields,
    ) -> Result<Uuid, AppError>;

    async fn update_beneficiary(&self, id: Uuid, fields: &BeneficiaryFields) -> Result<(), AppError>;
}

// Implementação real sobre o Postgres, chamada a chamada (sem transação longa):
// cada escrita bem-sucedida fica gravada mesmo que a linha seguinte falhe.
#[derive(Clone)]
pub struct PgImportStore {
    pool: PgPool,
    company_repo: CompanyRepository,
    beneficiary_repo: BeneficiaryRepository,
}

impl PgImportStore {
    pub fn new(pool: PgPool, company_repo: CompanyRepository, beneficiary_repo: BeneficiaryRepository) -> Self {
        Self { pool, company_repo, beneficiary_repo }
    }
}

#[async_trait]
impl ImportStore for PgImportStore {
    async fn find_company_by_cnpj(&self, cnpj: &str) -> Result<Option<Uuid>, AppError> {
        self.company_repo.find_id_by_cnpj(&self.pool, cnpj).await
    }

    async fn company_benefits(&self, id: Uuid) -> Result<Benefits, AppError> {
        let company = self
            .company_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::CompanyNotFound(id))?;
        Ok(company.benefits.0)
    }

    async fn insert_company(&self, fields: &CompanyFields) -> Result<Uuid, AppError> {
        self.company_repo.insert(&self.pool, fields).await
    }

    async fn update_company(&self, id: Uuid, fields: &CompanyFields) -> Result<(), AppError> {
        self.company_repo.update(&self.pool, id, fields).await
    }

    async fn find_beneficiary_by_cpf_and_company(
        &self,
        cpf: &str,
        company_id: Option<Uuid>,
    ) -> Result<Option<Uuid>, AppError> {
        self.beneficiary_repo
            .find_active_id(&self.pool, cpf, company_id)
            .await
    }

    async fn insert_beneficiary(
        &self,
        company_id: Option<Uuid>,
        fields: &BeneficiaryFields,
    ) -> Result<Uuid, AppError> {
        self.beneficiary_repo.insert(&self.pool, company_id, fields).await
    }

    async fn update_beneficiary(&self, id: Uuid, fields: &BeneficiaryFields) -> Result<(), AppError> {
        self.beneficiary_repo.update(&self.pool, id, fields).await
    }
}
