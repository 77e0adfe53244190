// src/import/orchestrator.rs
//
// Percorre as linhas na ordem do arquivo, uma de cada vez. A ordem importa:
// uma linha pode reaproveitar a empresa criada por uma linha anterior (cache de CNPJ).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::import::{ImportOptions, ImportReport, ImportRowLog, ImportSummary, RowStatus};

use super::classifier::{classify, ClassifiedRow, SubPayload};
use super::plans::PlanCatalog;
use super::reconciler::{Reconciler, UpsertAction, UpsertResult};
use super::spreadsheet::Spreadsheet;
use super::store::ImportStore;

pub const NO_RECOGNIZABLE_DATA: &str = "Nenhum dado reconhecível na linha";

/// Cancelamento cooperativo: verificado entre uma linha e outra, nunca no meio de uma.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct ImportOrchestrator<'a> {
    store: &'a dyn ImportStore,
    catalog: &'a PlanCatalog,
    options: ImportOptions,
}

impl<'a> ImportOrchestrator<'a> {
    pub fn new(store: &'a dyn ImportStore, catalog: &'a PlanCatalog, options: ImportOptions) -> Self {
        Self { store, catalog, options }
    }

    pub async fn run(&self, sheet: &Spreadsheet, cancel: &CancelFlag) -> ImportReport {
        let mut reconciler = Reconciler::new(self.store, self.catalog, self.options);
        let mut report = ImportReport::default();

        info!(rows = sheet.rows.len(), columns = sheet.headers.len(), options = ?self.options, "📥 Iniciando importação");

        for (position, raw) in sheet.rows.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(processed = report.rows.len(), "Importação cancelada antes da linha {}", position + 1);
                report.summary.cancelled = true;
                break;
            }

            let classified = classify(raw);
            if classified.is_noise() && self.options.skip_blank_rows {
                report.summary.skipped_rows += 1;
                continue;
            }

            let mut log = ImportRowLog::pending(position + 1);
            log.cnpj = classified.cnpj.clone();
            log.company_name = classified.company_name.clone();
            log.cpf = classified.cpf.clone();
            log.beneficiary_name = classified.beneficiary_name.clone();

            let (status, message) = process_row(&mut reconciler, classified, &mut report.summary).await;
            log.complete(status, message);

            report.summary.total_rows += 1;
            match status {
                RowStatus::Success => report.summary.successes += 1,
                RowStatus::Partial => report.summary.partials += 1,
                RowStatus::Failure => report.summary.failures += 1,
                RowStatus::Pending => {}
            }

            debug!(index = log.index, status = status.as_str(), "{}", log.message);
            report.rows.push(log);
        }

        info!(
            total = report.summary.total_rows,
            successes = report.summary.successes,
            partials = report.summary.partials,
            failures = report.summary.failures,
            "✅ Importação finalizada"
        );
        report
    }
}

async fn process_row(
    reconciler: &mut Reconciler<'_>,
    row: ClassifiedRow,
    summary: &mut ImportSummary,
) -> (RowStatus, String) {
    if row.is_noise() {
        return (RowStatus::Failure, NO_RECOGNIZABLE_DATA.to_string());
    }

    // 1. Empresa primeiro: o beneficiário da mesma linha se vincula a ela.
    let company: Option<UpsertResult> = match row.company {
        SubPayload::Absent => None,
        SubPayload::Invalid(message) => Some(Err(message)),
        SubPayload::Present(fields) => Some(reconciler.upsert_company(fields).await),
    };
    let company_id = company.as_ref().and_then(|r| r.as_ref().ok()).map(|o| o.id);

    // 2. Beneficiário
    let beneficiary: Option<UpsertResult> = match row.beneficiary {
        SubPayload::Absent => None,
        SubPayload::Invalid(message) => Some(Err(message)),
        SubPayload::Present(fields) => Some(reconciler.upsert_beneficiary(company_id, fields).await),
    };

    tally(summary, company.as_ref(), beneficiary.as_ref());

    let status = row_status(
        company.as_ref().map(Result::is_ok),
        beneficiary.as_ref().map(Result::is_ok),
    );

    let mut parts = Vec::new();
    if let Some(result) = &company {
        parts.push(match result {
            Ok(o) => match o.action {
                UpsertAction::Inserted => "Empresa criada".to_string(),
                UpsertAction::Updated => "Empresa atualizada".to_string(),
                UpsertAction::Cached => "Empresa já processada nesta importação".to_string(),
            },
            Err(e) => format!("Empresa: {e}"),
        });
    }
    if let Some(result) = &beneficiary {
        parts.push(match result {
            Ok(o) if o.action == UpsertAction::Inserted => "Beneficiário criado".to_string(),
            Ok(_) => "Beneficiário atualizado".to_string(),
            Err(e) => format!("Beneficiário: {e}"),
        });
    }

    (status, parts.join("; "))
}

fn tally(summary: &mut ImportSummary, company: Option<&UpsertResult>, beneficiary: Option<&UpsertResult>) {
    if let Some(Ok(outcome)) = company {
        summary.companies_succeeded += 1;
        match outcome.action {
            UpsertAction::Inserted => summary.companies_inserted += 1,
            UpsertAction::Updated => summary.companies_updated += 1,
            UpsertAction::Cached => summary.companies_cached += 1,
        }
    }
    if let Some(Ok(outcome)) = beneficiary {
        summary.beneficiaries_succeeded += 1;
        match outcome.action {
            UpsertAction::Inserted => summary.beneficiaries_inserted += 1,
            _ => summary.beneficiaries_updated += 1,
        }
    }
}

/// `None` = metade ausente na linha; `Some(ok)` = resultado da tentativa.
pub fn row_status(company: Option<bool>, beneficiary: Option<bool>) -> RowStatus {
    match (company, beneficiary) {
        (Some(true), Some(true)) => RowStatus::Success,
        (Some(false), Some(false)) => RowStatus::Failure,
        (Some(_), Some(_)) => RowStatus::Partial,
        (Some(true), None) | (None, Some(true)) => RowStatus::Success,
        _ => RowStatus::Failure,
    }
}
