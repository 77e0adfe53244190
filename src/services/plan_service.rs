// src/services/plan_service.rs

use crate::{
    common::error::AppError,
    db::PlanRepository,
    models::plan::{CreatePlanPayload, Plan},
};

#[derive(Clone)]
pub struct PlanService {
    repo: PlanRepository,
}

impl PlanService {
    pub fn new(repo: PlanRepository) -> Self {
        Self { repo }
    }

    pub async fn list_plans(&self) -> Result<Vec<Plan>, AppError> {
        self.repo.list_all().await
    }

    pub async fn create_plan(&self, payload: &CreatePlanPayload) -> Result<Plan, AppError> {
        let name = payload.name.trim();
        self.repo.create(name, payload.price, payload.display_order).await
    }
}
