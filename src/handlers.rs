pub mod beneficiaries;
pub mod companies;
pub mod imports;
pub mod plans;
