// src/import/plans.rs

use rust_decimal::Decimal;

use crate::models::plan::Plan;

use super::normalizer::normalize_header_text;

/// Fotografia somente-leitura dos planos, entregue ao reconciliador na construção.
/// Nunca é alterada durante uma importação.
#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(mut plans: Vec<Plan>) -> Self {
        plans.sort_by(|a, b| a.display_order.cmp(&b.display_order).then_with(|| a.name.cmp(&b.name)));
        Self { plans }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Preço pelo rótulo: nome exato -> rótulo normalizado -> plano padrão (menor ordem de exibição).
    pub fn price_for(&self, label: &str) -> Option<Decimal> {
        let label = label.trim();

        if let Some(plan) = self.plans.iter().find(|p| p.name == label) {
            return Some(plan.price);
        }

        let wanted = plan_key(label);
        if let Some(plan) = self.plans.iter().find(|p| plan_key(&p.name) == wanted) {
            return Some(plan.price);
        }

        self.plans.first().map(|p| p.price)
    }
}

// "Plano Familiar", "familiar" e "PLANO_FAMILIAR" caem na mesma chave.
fn plan_key(label: &str) -> String {
    let normalized = normalize_header_text(label);
    normalized
        .strip_prefix("plano ")
        .map(str::to_string)
        .unwrap_or(normalized)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn plan(name: &str, cents: i64, order: i32) -> Plan {
        Plan {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            display_order: order,
            created_at: Utc::now(),
        }
    }

    fn catalog() -> PlanCatalog {
        PlanCatalog::new(vec![
            plan("Plano Familiar", 8990, 2),
            plan("Plano Individual", 4990, 1),
        ])
    }

    #[test]
    fn exact_name_wins() {
        assert_eq!(catalog().price_for("Plano Familiar"), Some(Decimal::new(8990, 2)));
    }

    #[test]
    fn normalized_label_matches() {
        assert_eq!(catalog().price_for("familiar"), Some(Decimal::new(8990, 2)));
        assert_eq!(catalog().price_for("PLANO_FAMILIAR"), Some(Decimal::new(8990, 2)));
    }

    #[test]
    fn unknown_label_falls_back_to_first_plan() {
        assert_eq!(catalog().price_for("Empresarial"), Some(Decimal::new(4990, 2)));
        assert_eq!(PlanCatalog::default().price_for("x"), None);
    }
}
