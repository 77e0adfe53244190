// src/services/company_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BeneficiaryRepository, CompanyRepository},
    models::{beneficiary::Beneficiary, company::Company},
};

#[derive(Clone)]
pub struct CompanyService {
    pool: PgPool,
    company_repo: CompanyRepository,
    beneficiary_repo: BeneficiaryRepository,
}

impl CompanyService {
    pub fn new(pool: PgPool, company_repo: CompanyRepository, beneficiary_repo: BeneficiaryRepository) -> Self {
        Self { pool, company_repo, beneficiary_repo }
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        self.company_repo.list_all().await
    }

    pub async fn get_company(&self, id: Uuid) -> Result<Company, AppError> {
        self.company_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::CompanyNotFound(id))
    }

    /// Somente beneficiários ativos (não removidos). 404 se a empresa não existe.
    pub async fn list_beneficiaries(&self, company_id: Uuid) -> Result<Vec<Beneficiary>, AppError> {
        self.get_company(company_id).await?;
        self.beneficiary_repo.list_active_by_company(company_id).await
    }
}
