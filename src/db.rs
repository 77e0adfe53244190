pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod beneficiary_repo;
pub use beneficiary_repo::BeneficiaryRepository;
pub mod plan_repo;
pub use plan_repo::PlanRepository;
