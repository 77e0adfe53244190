pub mod beneficiary_service;
pub use beneficiary_service::BeneficiaryService;
pub mod company_service;
pub use company_service::CompanyService;
pub mod import_service;
pub use import_service::ImportService;
pub mod plan_service;
pub use plan_service::PlanService;
