// src/services/beneficiary_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::BeneficiaryRepository};

#[derive(Clone)]
pub struct BeneficiaryService {
    repo: BeneficiaryRepository,
}

impl BeneficiaryService {
    pub fn new(repo: BeneficiaryRepository) -> Self {
        Self { repo }
    }

    // Remoção lógica: o registro some das listagens e da busca da importação,
    // então o mesmo CPF pode ser cadastrado de novo na empresa.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.soft_delete(id).await?;
        tracing::info!("🗑️ Beneficiário {} removido", id);
        Ok(())
    }
}
