// src/models/company.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;

// --- BENEFÍCIOS ---

// Conjunto fechado de benefícios que uma empresa pode contratar.
// A chave serializada é a mesma gravada no JSONB da coluna `benefits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BenefitKey {
    ClubeDesconto,
    ClubeDescontoDependente,
    Telemedicina,
    TelemedicinaFamiliar,
    ParceiroFixo,
    Audiobook,
    PasseBemEstar,
    FarmaciaTitular,
    FarmaciaDependente,
}

impl BenefitKey {
    pub const ALL: [BenefitKey; 9] = [
        BenefitKey::ClubeDesconto,
        BenefitKey::ClubeDescontoDependente,
        BenefitKey::Telemedicina,
        BenefitKey::TelemedicinaFamiliar,
        BenefitKey::ParceiroFixo,
        BenefitKey::Audiobook,
        BenefitKey::PasseBemEstar,
        BenefitKey::FarmaciaTitular,
        BenefitKey::FarmaciaDependente,
    ];

    /// Benefícios escalonados aceitam o nome de uma faixa (ex: "Gold") além de sim/não.
    pub fn is_tiered(self) -> bool {
        matches!(
            self,
            BenefitKey::PasseBemEstar | BenefitKey::FarmaciaTitular | BenefitKey::FarmaciaDependente
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum BenefitValue {
    Flag(bool),
    Tier(String),
}

// Mapa esparso: chave ausente significa "não informado", não "desligado".
pub type Benefits = BTreeMap<BenefitKey, BenefitValue>;

// --- EMPRESA (O Registro) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,

    #[schema(example = "34.225.216/0001-77")]
    pub cnpj: String,
    pub name: Option<String>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,

    pub plan: Option<String>,
    pub discount: Option<Decimal>,
    pub value: Option<Decimal>,

    pub total_lives: Option<i32>,
    pub individual_lives: Option<i32>,
    pub family_lives: Option<i32>,

    #[schema(value_type = Object)]
    pub benefits: Json<Benefits>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Os dados de escrita extraídos de uma linha da planilha.
// `cnpj` já vem no formato canônico quando tem 14 dígitos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFields {
    pub cnpj: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plan: Option<String>,
    pub discount: Option<Decimal>,
    pub value: Option<Decimal>,
    pub total_lives: Option<i32>,
    pub individual_lives: Option<i32>,
    pub family_lives: Option<i32>,
    pub benefits: Benefits,
}
