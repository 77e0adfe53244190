// src/import/classifier.rs
//
// Decide, linha a linha, se há dados de empresa, de beneficiário, ambos ou nenhum,
// e monta os payloads tipados. Nunca falha: problemas viram `SubPayload::Invalid`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::beneficiary::{BeneficiaryFields, BeneficiaryStatus};
use crate::models::company::{BenefitKey, BenefitValue, Benefits, CompanyFields};

use super::headers::{BeneficiaryField, CanonicalField, CompanyField, NormalizedRow};
use super::normalizer::{
    canonical_cnpj, digits_only, normalize_company_name, normalize_header_text, parse_bool_word,
    parse_currency, parse_locale_number, parse_tri_state, TriState,
};
use super::spreadsheet::{CellValue, RawRow};

pub const MISSING_CNPJ: &str = "CNPJ ausente";
pub const MISSING_CPF: &str = "CPF ausente ou inválido";

#[derive(Debug, Clone, PartialEq)]
pub enum SubPayload<T> {
    /// Nenhum cabeçalho relevante com valor: não conta nem como sucesso nem como falha.
    Absent,
    /// Há dados, mas falta o identificador natural. Falha desta metade apenas.
    Invalid(String),
    Present(T),
}

impl<T> SubPayload<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, SubPayload::Absent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    // Campos de identificação que vão para o log da linha.
    pub cnpj: Option<String>,
    pub company_name: Option<String>,
    pub cpf: Option<String>,
    pub beneficiary_name: Option<String>,

    pub company: SubPayload<CompanyFields>,
    pub beneficiary: SubPayload<BeneficiaryFields>,
}

impl ClassifiedRow {
    /// Linha sem nada reconhecível (ex: linha em branco no fim do export).
    pub fn is_noise(&self) -> bool {
        self.company.is_absent() && self.beneficiary.is_absent()
    }
}

pub fn classify(row: &RawRow) -> ClassifiedRow {
    let norm = NormalizedRow::new(row);

    let cnpj = norm
        .resolve_filled(CompanyField::Cnpj)
        .and_then(|cell| identifier_text(cell, 14))
        .map(|raw| canonical_cnpj(&raw));
    let company_name = text(&norm, CompanyField::Name)
        .map(|n| normalize_company_name(&n))
        .filter(|n| !n.is_empty());

    let cpf_cell = norm.resolve_filled(BeneficiaryField::Cpf);
    let cpf = cpf_cell.and_then(|cell| identifier_text(cell, 11)).map(|raw| digits_only(&raw));
    let beneficiary_name = text(&norm, BeneficiaryField::Name);

    let company = match (&cnpj, &company_name) {
        (None, None) => SubPayload::Absent,
        (None, Some(_)) => SubPayload::Invalid(MISSING_CNPJ.to_string()),
        (Some(cnpj), _) => SubPayload::Present(company_fields(&norm, cnpj.clone(), company_name.clone())),
    };

    let beneficiary = if cpf_cell.is_none() && beneficiary_name.is_none() {
        SubPayload::Absent
    } else {
        match cpf.as_deref() {
            Some(digits) if !digits.is_empty() => {
                SubPayload::Present(beneficiary_fields(&norm, digits.to_string(), beneficiary_name.clone()))
            }
            _ => SubPayload::Invalid(MISSING_CPF.to_string()),
        }
    };

    ClassifiedRow {
        cnpj,
        company_name,
        cpf,
        beneficiary_name,
        company,
        beneficiary,
    }
}

fn company_fields(norm: &NormalizedRow<'_>, cnpj: String, name: Option<String>) -> CompanyFields {
    CompanyFields {
        cnpj,
        name,
        address: text(norm, CompanyField::Address),
        city: text(norm, CompanyField::City),
        contact_name: text(norm, CompanyField::ContactName),
        email: text(norm, CompanyField::Email).map(|e| e.to_lowercase()),
        phone: text(norm, CompanyField::Phone),
        plan: text(norm, CompanyField::Plan),
        discount: norm
            .resolve_filled(CompanyField::Discount)
            .map(|v| parse_locale_number(v).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)),
        value: norm.resolve_filled(CompanyField::Value).map(parse_currency),
        total_lives: count(norm, CompanyField::TotalLives),
        individual_lives: count(norm, CompanyField::IndividualLives),
        family_lives: count(norm, CompanyField::FamilyLives),
        benefits: benefits(norm),
    }
}

fn beneficiary_fields(norm: &NormalizedRow<'_>, cpf: String, name: Option<String>) -> BeneficiaryFields {
    BeneficiaryFields {
        cpf,
        name,
        phone: text(norm, BeneficiaryField::Phone),
        dependents: count(norm, BeneficiaryField::Dependents),
        status: text(norm, BeneficiaryField::Status).map(|s| parse_status(&s)),
        active: norm
            .resolve_filled(BeneficiaryField::Active)
            .and_then(|v| parse_tri_state(v).as_option()),
    }
}

/// Só entram no mapa as chaves com valor reconhecido; ausência não vira `false`.
fn benefits(norm: &NormalizedRow<'_>) -> Benefits {
    let mut map = Benefits::new();
    for key in BenefitKey::ALL {
        let Some(cell) = norm.resolve_filled(key) else {
            continue;
        };

        let value = match cell {
            CellValue::Text(s) if key.is_tiered() => match parse_bool_word(s) {
                TriState::Absent => Some(BenefitValue::Tier(s.trim().to_string())),
                word => word.as_option().map(BenefitValue::Flag),
            },
            other => parse_tri_state(other).as_option().map(BenefitValue::Flag),
        };

        if let Some(value) = value {
            map.insert(key, value);
        }
    }
    map
}

pub fn parse_status(raw: &str) -> BeneficiaryStatus {
    match normalize_header_text(raw).as_str() {
        "titular" | "holder" => BeneficiaryStatus::Titular,
        "dependente" | "dependent" => BeneficiaryStatus::Dependente,
        _ => BeneficiaryStatus::Other(raw.trim().to_string()),
    }
}

fn text<F: CanonicalField>(norm: &NormalizedRow<'_>, field: F) -> Option<String> {
    norm.resolve(field).and_then(CellValue::as_text)
}

fn count<F: CanonicalField>(norm: &NormalizedRow<'_>, field: F) -> Option<i32> {
    norm.resolve_filled(field)
        .and_then(|v| parse_locale_number(v).trunc().to_i32())
}

// Células numéricas perdem zeros à esquerda ("01234..." vira 1234...): recompõe a largura
// só quando faltam no máximo dois dígitos. Números mais curtos não são identificadores
// e seguem como texto, sem preenchimento.
const MAX_LOST_ZEROS: usize = 2;

fn identifier_text(cell: &CellValue, width: usize) -> Option<String> {
    let raw = cell.as_text()?;
    match cell {
        CellValue::Number(_) if raw.len() < width && raw.len() + MAX_LOST_ZEROS >= width => {
            Some(format!("{raw:0>width$}"))
        }
        _ => Some(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, CellValue)]) -> RawRow {
        RawRow::new(cells.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    fn t(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn full_row_builds_both_payloads() {
        let raw = row(&[
            ("CNPJ Empresa", t("34225216000177")),
            ("Razão Social", t("Açaí Comércio Ltda.")),
            ("Desconto (%)", t("10,5")),
            ("Valor", t("R$ 1.234,56")),
            ("Vidas", CellValue::Number(12.0)),
            ("CPF", t("123.456.789-09")),
            ("Nome", t("Ana Souza")),
            ("Tipo", t("Dependente")),
            ("Ativo", t("Não")),
        ]);
        let classified = classify(&raw);

        let SubPayload::Present(company) = &classified.company else {
            panic!("company payload expected");
        };
        assert_eq!(company.cnpj, "34.225.216/0001-77");
        assert_eq!(company.name.as_deref(), Some("ACAI COMERCIO LTDA"));
        assert_eq!(company.discount, Some(Decimal::new(105, 1)));
        assert_eq!(company.value, Some(Decimal::new(123_456, 2)));
        assert_eq!(company.total_lives, Some(12));
        assert_eq!(company.individual_lives, None);

        let SubPayload::Present(beneficiary) = &classified.beneficiary else {
            panic!("beneficiary payload expected");
        };
        assert_eq!(beneficiary.cpf, "12345678909");
        assert_eq!(beneficiary.name.as_deref(), Some("Ana Souza"));
        assert_eq!(beneficiary.status, Some(BeneficiaryStatus::Dependente));
        assert_eq!(beneficiary.active, Some(false));

        assert_eq!(classified.cnpj.as_deref(), Some("34.225.216/0001-77"));
        assert_eq!(classified.cpf.as_deref(), Some("12345678909"));
    }

    #[test]
    fn malformed_cnpj_is_kept_verbatim() {
        let classified = classify(&row(&[("CNPJ", t("  12.345-6 "))]));
        let SubPayload::Present(company) = classified.company else {
            panic!("company payload expected");
        };
        assert_eq!(company.cnpj, "12.345-6");
    }

    #[test]
    fn numeric_cnpj_recovers_leading_zero() {
        let classified = classify(&row(&[("cnpj", CellValue::Number(1234567000189.0))]));
        assert_eq!(classified.cnpj.as_deref(), Some("01.234.567/0001-89"));
    }

    #[test]
    fn numeric_cpf_recovers_two_leading_zeros() {
        let classified = classify(&row(&[("cpf", CellValue::Number(123456789.0))]));
        assert_eq!(classified.cpf.as_deref(), Some("00123456789"));
    }

    #[test]
    fn short_numeric_identifiers_are_not_padded() {
        let classified = classify(&row(&[("cnpj", CellValue::Number(123.0)), ("cpf", CellValue::Number(42.0))]));
        assert_eq!(classified.cnpj.as_deref(), Some("123"));
        assert_eq!(classified.cpf.as_deref(), Some("42"));

        let SubPayload::Present(company) = classified.company else {
            panic!("company payload expected");
        };
        assert_eq!(company.cnpj, "123");
        let SubPayload::Present(beneficiary) = classified.beneficiary else {
            panic!("beneficiary payload expected");
        };
        assert_eq!(beneficiary.cpf, "42");
    }

    #[test]
    fn company_name_without_cnpj_is_invalid() {
        let classified = classify(&row(&[("Empresa", t("Acme"))]));
        assert_eq!(classified.company, SubPayload::Invalid(MISSING_CNPJ.to_string()));
        assert!(classified.beneficiary.is_absent());
    }

    #[test]
    fn beneficiary_without_cpf_digits_is_invalid() {
        let classified = classify(&row(&[("CPF", t("n/a")), ("Nome", t("Ana"))]));
        assert_eq!(classified.beneficiary, SubPayload::Invalid(MISSING_CPF.to_string()));

        let classified = classify(&row(&[("Nome", t("Ana"))]));
        assert_eq!(classified.beneficiary, SubPayload::Invalid(MISSING_CPF.to_string()));
    }

    #[test]
    fn blank_row_is_noise() {
        let classified = classify(&row(&[("CNPJ", CellValue::Empty), ("CPF", t(" ")), ("Extra", t("x"))]));
        assert!(classified.is_noise());
    }

    #[test]
    fn benefits_map_is_sparse() {
        let raw = row(&[
            ("CNPJ", t("12345678000195")),
            ("Telemedicina", t("Sim")),
            ("Clube de Desconto", t("não")),
            ("Audiobook", t("talvez")),
            ("Wellhub", t("Gold")),
            ("Farmácia Dependente", CellValue::Empty),
            ("Parceiro Fixo", CellValue::Bool(true)),
        ]);
        let SubPayload::Present(company) = classify(&raw).company else {
            panic!("company payload expected");
        };

        let mut expected = Benefits::new();
        expected.insert(BenefitKey::Telemedicina, BenefitValue::Flag(true));
        expected.insert(BenefitKey::ClubeDesconto, BenefitValue::Flag(false));
        expected.insert(BenefitKey::PasseBemEstar, BenefitValue::Tier("Gold".to_string()));
        expected.insert(BenefitKey::ParceiroFixo, BenefitValue::Flag(true));
        assert_eq!(company.benefits, expected);
    }

    #[test]
    fn discount_is_clamped_to_percent_range() {
        let raw = row(&[("CNPJ", t("12345678000195")), ("Desconto", t("150"))]);
        let SubPayload::Present(company) = classify(&raw).company else {
            panic!("company payload expected");
        };
        assert_eq!(company.discount, Some(Decimal::ONE_HUNDRED));
    }

    #[test]
    fn free_text_status_is_preserved() {
        assert_eq!(parse_status("TITULAR"), BeneficiaryStatus::Titular);
        assert_eq!(parse_status(" Agregado "), BeneficiaryStatus::Other("Agregado".to_string()));
    }
}
