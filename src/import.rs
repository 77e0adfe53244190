// src/import.rs
//
// Pipeline de importação de planilhas:
// bytes -> planilha -> cabeçalhos/normalização -> classificação -> reconciliação -> relatório.

pub mod classifier;
pub mod headers;
pub mod normalizer;
pub mod orchestrator;
pub mod plans;
pub mod reconciler;
pub mod report;
pub mod spreadsheet;
pub mod store;

#[cfg(test)]
pub(crate) mod memory_store;

pub use orchestrator::{CancelFlag, ImportOrchestrator};
pub use plans::PlanCatalog;
pub use spreadsheet::Spreadsheet;
pub use store::{ImportStore, PgImportStore};
