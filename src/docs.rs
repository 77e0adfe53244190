// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Imports ---
        handlers::imports::import_spreadsheet,

        // --- Companies ---
        handlers::companies::list_companies,
        handlers::companies::get_company,
        handlers::companies::list_company_beneficiaries,

        // --- Beneficiaries ---
        handlers::beneficiaries::delete_beneficiary,

        // --- Plans ---
        handlers::plans::list_plans,
        handlers::plans::create_plan,
        handlers::plans::refresh_plans,
    ),
    components(
        schemas(
            // --- Imports ---
            models::import::RowStatus,
            models::import::BenefitsMode,
            models::import::CompanyCachePolicy,
            models::import::ImportRowLog,
            models::import::ImportSummary,
            models::import::ImportReport,
            handlers::imports::ReportFormat,

            // --- Companies ---
            models::company::BenefitKey,
            models::company::BenefitValue,
            models::company::Company,

            // --- Beneficiaries ---
            models::beneficiary::Beneficiary,

            // --- Plans ---
            models::plan::Plan,
            models::plan::CreatePlanPayload,
            handlers::plans::RefreshPlansResponse,
        )
    ),
    tags(
        (name = "Imports", description = "Importação de planilhas de empresas e beneficiários"),
        (name = "Companies", description = "Empresas clientes"),
        (name = "Beneficiaries", description = "Beneficiários (colaboradores e dependentes)"),
        (name = "Plans", description = "Planos e preços")
    )
)]
pub struct ApiDoc;
