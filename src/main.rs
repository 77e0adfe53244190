//src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod import;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Sem catálogo a importação ainda funciona, só não calcula valor pelo plano.
    match app_state.plan_service.list_plans().await {
        Ok(plans) => {
            app_state.import_service.load_plans(plans).await;
        }
        Err(e) => tracing::warn!("⚠️ Catálogo de planos não carregado: {}", e),
    }

    let import_routes = Router::new()
        .route("/", post(handlers::imports::import_spreadsheet))
        .layer(DefaultBodyLimit::max(app_state.import_max_bytes));

    let company_routes = Router::new()
        .route("/", get(handlers::companies::list_companies))
        .route("/{id}", get(handlers::companies::get_company))
        .route("/{id}/beneficiaries", get(handlers::companies::list_company_beneficiaries));

    let beneficiary_routes = Router::new()
        .route("/{id}", delete(handlers::beneficiaries::delete_beneficiary));

    let plan_routes = Router::new()
        .route("/"
               ,get(handlers::plans::list_plans)
               .post(handlers::plans::create_plan)
        )
        .route("/refresh", post(handlers::plans::refresh_plans));

    let bind_addr = app_state.bind_addr.clone();

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/imports", import_routes)
        .nest("/api/companies", company_routes)
        .nest("/api/beneficiaries", beneficiary_routes)
        .nest("/api/plans", plan_routes)
        .with_state(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", bind_addr);
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
