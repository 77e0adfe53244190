// src/services/import_service.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    common::error::{AppError, ImportError},
    import::{CancelFlag, ImportOrchestrator, ImportStore, PlanCatalog, Spreadsheet},
    models::{
        import::{ImportOptions, ImportReport},
        plan::Plan,
    },
};

#[derive(Clone)]
pub struct ImportService {
    store: Arc<dyn ImportStore>,
    // Trocado inteiro a cada recarga; cada importação segura o seu snapshot.
    catalog: Arc<RwLock<Arc<PlanCatalog>>>,
    max_bytes: usize,
}

impl ImportService {
    pub fn new(store: Arc<dyn ImportStore>, max_bytes: usize) -> Self {
        Self {
            store,
            catalog: Arc::new(RwLock::new(Arc::new(PlanCatalog::default()))),
            max_bytes,
        }
    }

    /// Substitui o catálogo de planos usado pelas próximas importações.
    pub async fn load_plans(&self, plans: Vec<Plan>) -> usize {
        let catalog = PlanCatalog::new(plans);
        let count = catalog.plans().len();
        *self.catalog.write().await = Arc::new(catalog);
        tracing::info!("📋 Catálogo de planos carregado ({} planos)", count);
        count
    }

    pub async fn catalog(&self) -> Arc<PlanCatalog> {
        self.catalog.read().await.clone()
    }

    pub async fn run_import(
        &self,
        file_name: &str,
        bytes: &[u8],
        options: ImportOptions,
        cancel: &CancelFlag,
    ) -> Result<ImportReport, AppError> {
        if bytes.len() > self.max_bytes {
            return Err(ImportError::TooLarge(self.max_bytes).into());
        }

        // Falhas de arquivo abortam aqui, antes de qualquer escrita.
        let sheet = Spreadsheet::from_bytes(file_name, bytes)?;
        let catalog = self.catalog().await;

        let report = ImportOrchestrator::new(self.store.as_ref(), &catalog, options)
            .run(&sheet, cancel)
            .await;
        Ok(report)
    }
}
