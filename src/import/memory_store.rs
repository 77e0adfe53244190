// src/import/memory_store.rs
//
// `ImportStore` em memória para os testes: conta chamadas e injeta falhas.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::beneficiary::BeneficiaryFields;
use crate::models::company::{Benefits, CompanyFields};

use super::store::ImportStore;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub find_company: usize,
    pub company_benefits: usize,
    pub insert_company: usize,
    pub update_company: usize,
    pub find_beneficiary: usize,
    pub insert_beneficiary: usize,
    pub update_beneficiary: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.find_company
            + self.company_benefits
            + self.insert_company
            + self.update_company
            + self.find_beneficiary
            + self.insert_beneficiary
            + self.update_beneficiary
    }
}

#[derive(Default)]
struct Inner {
    companies: HashMap<Uuid, CompanyFields>,
    beneficiaries: HashMap<Uuid, (Option<Uuid>, BeneficiaryFields)>,
    calls: CallCounts,
    company_write_error: Option<String>,
    beneficiary_write_error: Option<String>,
    company_lookup_error: Option<String>,
    beneficiary_lookup_error: Option<String>,
    benefits_read_error: Option<String>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store poisoned")
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    pub fn reset_calls(&self) {
        self.lock().calls = CallCounts::default();
    }

    pub fn seed_company(&self, fields: CompanyFields) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().companies.insert(id, fields);
        id
    }

    pub fn company(&self, id: Uuid) -> Option<CompanyFields> {
        self.lock().companies.get(&id).cloned()
    }

    pub fn company_count(&self) -> usize {
        self.lock().companies.len()
    }

    pub fn beneficiary(&self, id: Uuid) -> Option<(Option<Uuid>, BeneficiaryFields)> {
        self.lock().beneficiaries.get(&id).cloned()
    }

    pub fn beneficiary_count(&self) -> usize {
        self.lock().beneficiaries.len()
    }

    pub fn fail_company_writes(&self, message: &str) {
        self.lock().company_write_error = Some(message.to_string());
    }

    pub fn fail_beneficiary_writes(&self, message: &str) {
        self.lock().beneficiary_write_error = Some(message.to_string());
    }

    pub fn fail_company_lookups(&self, message: &str) {
        self.lock().company_lookup_error = Some(message.to_string());
    }

    pub fn fail_beneficiary_lookups(&self, message: &str) {
        self.lock().beneficiary_lookup_error = Some(message.to_string());
    }

    pub fn fail_benefit_reads(&self, message: &str) {
        self.lock().benefits_read_error = Some(message.to_string());
    }
}

fn keep_or_replace<T: Clone>(current: &mut Option<T>, incoming: &Option<T>) {
    if incoming.is_some() {
        current.clone_from(incoming);
    }
}

#[async_trait]
impl ImportStore for MemoryStore {
    async fn find_company_by_cnpj(&self, cnpj: &str) -> Result<Option<Uuid>, AppError> {
        let mut inner = self.lock();
        inner.calls.find_company += 1;
        if let Some(message) = &inner.company_lookup_error {
            return Err(AppError::StoreError(message.clone()));
        }
        Ok(inner
            .companies
            .iter()
            .find(|(_, c)| c.cnpj == cnpj)
            .map(|(id, _)| *id))
    }

    async fn company_benefits(&self, id: Uuid) -> Result<Benefits, AppError> {
        let mut inner = self.lock();
        inner.calls.company_benefits += 1;
        if let Some(message) = &inner.benefits_read_error {
            return Err(AppError::StoreError(message.clone()));
        }
        inner
            .companies
            .get(&id)
            .map(|c| c.benefits.clone())
            .ok_or(AppError::CompanyNotFound(id))
    }

    async fn insert_company(&self, fields: &CompanyFields) -> Result<Uuid, AppError> {
        let mut inner = self.lock();
        inner.calls.insert_company += 1;
        if let Some(message) = &inner.company_write_error {
            return Err(AppError::StoreError(message.clone()));
        }
        let id = Uuid::new_v4();
        inner.companies.insert(id, fields.clone());
        Ok(id)
    }

    async fn update_company(&self, id: Uuid, fields: &CompanyFields) -> Result<(), AppError> {
        let mut inner = self.lock();
        inner.calls.update_company += 1;
        if let Some(message) = &inner.company_write_error {
            return Err(AppError::StoreError(message.clone()));
        }
        let stored = inner.companies.get_mut(&id).ok_or(AppError::CompanyNotFound(id))?;
        keep_or_replace(&mut stored.name, &fields.name);
        keep_or_replace(&mut stored.address, &fields.address);
        keep_or_replace(&mut stored.city, &fields.city);
        keep_or_replace(&mut stored.contact_name, &fields.contact_name);
        keep_or_replace(&mut stored.email, &fields.email);
        keep_or_replace(&mut stored.phone, &fields.phone);
        keep_or_replace(&mut stored.plan, &fields.plan);
        keep_or_replace(&mut stored.discount, &fields.discount);
        keep_or_replace(&mut stored.value, &fields.value);
        keep_or_replace(&mut stored.total_lives, &fields.total_lives);
        keep_or_replace(&mut stored.individual_lives, &fields.individual_lives);
        keep_or_replace(&mut stored.family_lives, &fields.family_lives);
        stored.benefits = fields.benefits.clone();
        Ok(())
    }

    async fn find_beneficiary_by_cpf_and_company(
        &self,
        cpf: &str,
        company_id: Option<Uuid>,
    ) -> Result<Option<Uuid>, AppError> {
        let mut inner = self.lock();
        inner.calls.find_beneficiary += 1;
        if let Some(message) = &inner.beneficiary_lookup_error {
            return Err(AppError::StoreError(message.clone()));
        }
        Ok(inner
            .beneficiaries
            .iter()
            .find(|(_, (company, b))| b.cpf == cpf && *company == company_id)
            .map(|(id, _)| *id))
    }

    async fn insert_beneficiary(
        &self,
        company_id: Option<Uuid>,
        fields: &BeneficiaryFields,
    ) -> Result<Uuid, AppError> {
        let mut inner = self.lock();
        inner.calls.insert_beneficiary += 1;
        if let Some(message) = &inner.beneficiary_write_error {
            return Err(AppError::StoreError(message.clone()));
        }
        let id = Uuid::new_v4();
        inner.beneficiaries.insert(id, (company_id, fields.clone()));
        Ok(id)
    }

    async fn update_beneficiary(&self, id: Uuid, fields: &BeneficiaryFields) -> Result<(), AppError> {
        let mut inner = self.lock();
        inner.calls.update_beneficiary += 1;
        if let Some(message) = &inner.beneficiary_write_error {
            return Err(AppError::StoreError(message.clone()));
        }
        let (_, stored) = inner
            .beneficiaries
            .get_mut(&id)
            .ok_or(AppError::BeneficiaryNotFound(id))?;
        keep_or_replace(&mut stored.name, &fields.name);
        keep_or_replace(&mut stored.phone, &fields.phone);
        keep_or_replace(&mut stored.dependents, &fields.dependents);
        keep_or_replace(&mut stored.status, &fields.status);
        keep_or_replace(&mut stored.active, &fields.active);
        Ok(())
    }
}
