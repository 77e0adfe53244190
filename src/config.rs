// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{BeneficiaryRepository, CompanyRepository, PlanRepository},
    import::PgImportStore,
    services::{BeneficiaryService, CompanyService, ImportService, PlanService},
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_IMPORT_MAX_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub bind_addr: String,
    pub import_max_bytes: usize,

    pub company_service: CompanyService,
    pub beneficiary_service: BeneficiaryService,
    pub plan_service: PlanService,
    pub import_service: ImportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let max_connections = env_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let import_max_bytes = env_or("IMPORT_MAX_BYTES", DEFAULT_IMPORT_MAX_BYTES)?;

        let db_pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let company_repo = CompanyRepository::new(db_pool.clone());
        let beneficiary_repo = BeneficiaryRepository::new(db_pool.clone());
        let plan_repo = PlanRepository::new(db_pool.clone());

        let import_store = PgImportStore::new(db_pool.clone(), company_repo.clone(), beneficiary_repo.clone());

        Ok(Self {
            company_service: CompanyService::new(db_pool.clone(), company_repo, beneficiary_repo.clone()),
            beneficiary_service: BeneficiaryService::new(beneficiary_repo),
            plan_service: PlanService::new(plan_repo),
            import_service: ImportService::new(Arc::new(import_store), import_max_bytes),
            db_pool,
            bind_addr,
            import_max_bytes,
        })
    }
}

// Variável ausente = padrão; presente mas inválida = erro de inicialização.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} inválida: '{raw}'")),
        Err(_) => Ok(default),
    }
}
