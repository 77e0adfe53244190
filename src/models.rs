pub mod beneficiary;
pub mod company;
pub mod import;
pub mod plan;
