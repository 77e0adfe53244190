// src/import/reconciler.rs
//
// Upsert por chave natural: empresa por CNPJ, beneficiário por (CPF, empresa).
// Nenhum erro de persistência escapa daqui: tudo vira `Err(mensagem)` da linha.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        beneficiary::BeneficiaryFields,
        company::CompanyFields,
        import::{BenefitsMode, CompanyCachePolicy, ImportOptions},
    },
};

use super::classifier::MISSING_CPF;
use super::plans::PlanCatalog;
use super::store::ImportStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Inserted,
    Updated,
    /// CNPJ já resolvido nesta importação; nada foi escrito.
    Cached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub id: Uuid,
    pub action: UpsertAction,
}

pub type UpsertResult = Result<UpsertOutcome, String>;

struct CachedCompany {
    id: Uuid,
    // Últimos campos gravados por esta importação, para a política `Reapply`.
    applied: CompanyFields,
}

/// Vive exatamente uma importação: o cache de CNPJ nunca é compartilhado entre execuções.
pub struct Reconciler<'a> {
    store: &'a dyn ImportStore,
    catalog: &'a PlanCatalog,
    options: ImportOptions,
    company_cache: HashMap<String, CachedCompany>,
}

impl<'a> Reconciler<'a> {
    pub fn new(store: &'a dyn ImportStore, catalog: &'a PlanCatalog, options: ImportOptions) -> Self {
        Self {
            store,
            catalog,
            options,
            company_cache: HashMap::new(),
        }
    }

    // =========================================================================
    //  EMPRESA
    // =========================================================================

    pub async fn upsert_company(&mut self, mut fields: CompanyFields) -> UpsertResult {
        self.fill_value(&mut fields);

        let cached = self
            .company_cache
            .get(&fields.cnpj)
            .map(|c| (c.id, c.applied == fields));

        if let Some((id, unchanged)) = cached {
            if self.options.cache_policy == CompanyCachePolicy::Skip || unchanged {
                return Ok(UpsertOutcome { id, action: UpsertAction::Cached });
            }
            self.write_company_update(id, &fields)
                .await
                .map_err(|e| failure("Falha ao atualizar empresa", e))?;
            self.remember(id, fields);
            return Ok(UpsertOutcome { id, action: UpsertAction::Updated });
        }

        let existing = self
            .store
            .find_company_by_cnpj(&fields.cnpj)
            .await
            .map_err(|e| failure("Falha ao buscar empresa", e))?;

        let outcome = match existing {
            Some(id) => {
                self.write_company_update(id, &fields)
                    .await
                    .map_err(|e| failure("Falha ao atualizar empresa", e))?;
                UpsertOutcome { id, action: UpsertAction::Updated }
            }
            None => {
                let id = self
                    .store
                    .insert_company(&fields)
                    .await
                    .map_err(|e| failure("Falha ao criar empresa", e))?;
                UpsertOutcome { id, action: UpsertAction::Inserted }
            }
        };

        self.remember(outcome.id, fields);
        Ok(outcome)
    }

    fn remember(&mut self, id: Uuid, applied: CompanyFields) {
        self.company_cache
            .insert(applied.cnpj.clone(), CachedCompany { id, applied });
    }

    async fn write_company_update(&self, id: Uuid, fields: &CompanyFields) -> Result<(), AppError> {
        match self.options.benefits_mode {
            BenefitsMode::Replace => self.store.update_company(id, fields).await,
            BenefitsMode::Merge => {
                let mut merged = self.store.company_benefits(id).await?;
                merged.extend(fields.benefits.clone());
                let to_write = CompanyFields { benefits: merged, ..fields.clone() };
                self.store.update_company(id, &to_write).await
            }
        }
    }

    /// Sem coluna de valor na planilha: preço do plano × vidas, com o desconto aplicado.
    fn fill_value(&self, fields: &mut CompanyFields) {
        if fields.value.is_some() {
            return;
        }
        let (Some(plan), Some(lives)) = (fields.plan.as_deref(), fields.total_lives) else {
            return;
        };
        let Some(price) = self.catalog.price_for(plan) else {
            return;
        };

        let discount = fields.discount.unwrap_or(Decimal::ZERO);
        let gross = price * Decimal::from(lives);
        let net = gross * (Decimal::ONE_HUNDRED - discount) / Decimal::ONE_HUNDRED;
        fields.value = Some(net.round_dp(2));
    }

    // =========================================================================
    //  BENEFICIÁRIO
    // =========================================================================

    pub async fn upsert_beneficiary(
        &mut self,
        company_id: Option<Uuid>,
        fields: BeneficiaryFields,
    ) -> UpsertResult {
        if fields.cpf.is_empty() {
            return Err(MISSING_CPF.to_string());
        }

        let existing = self
            .store
            .find_beneficiary_by_cpf_and_company(&fields.cpf, company_id)
            .await
            .map_err(|e| failure("Falha ao buscar beneficiário", e))?;

        match existing {
            Some(id) => {
                self.store
                    .update_beneficiary(id, &fields)
                    .await
                    .map_err(|e| failure("Falha ao atualizar beneficiário", e))?;
                Ok(UpsertOutcome { id, action: UpsertAction::Updated })
            }
            None => {
                let id = self
                    .store
                    .insert_beneficiary(company_id, &fields)
                    .await
                    .map_err(|e| failure("Falha ao criar beneficiário", e))?;
                Ok(UpsertOutcome { id, action: UpsertAction::Inserted })
            }
        }
    }
}

fn failure(context: &str, err: AppError) -> String {
    tracing::warn!("{}: {}", context, err);
    format!("{context}: {err}")
}
