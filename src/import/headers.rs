// src/import/headers.rs
//
// Tabelas de sinônimos: cada campo canônico aceita um conjunto fechado de grafias
// de cabeçalho, já normalizadas por `normalize_header_text`.

use crate::models::company::BenefitKey;

use super::normalizer::normalize_header_text;
use super::spreadsheet::{CellValue, RawRow};

pub trait CanonicalField: Copy + 'static {
    /// Grafias aceitas, em ordem de preferência.
    fn synonyms(self) -> &'static [&'static str];
}

// --- EMPRESA ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompanyField {
    Cnpj,
    Name,
    Address,
    City,
    ContactName,
    Email,
    Phone,
    Plan,
    Discount,
    Value,
    TotalLives,
    IndividualLives,
    FamilyLives,
}

impl CompanyField {
    #[cfg(test)]
    pub const ALL: [CompanyField; 13] = [
        CompanyField::Cnpj,
        CompanyField::Name,
        CompanyField::Address,
        CompanyField::City,
        CompanyField::ContactName,
        CompanyField::Email,
        CompanyField::Phone,
        CompanyField::Plan,
        CompanyField::Discount,
        CompanyField::Value,
        CompanyField::TotalLives,
        CompanyField::IndividualLives,
        CompanyField::FamilyLives,
    ];
}

impl CanonicalField for CompanyField {
    fn synonyms(self) -> &'static [&'static str] {
        match self {
            CompanyField::Cnpj => &["cnpj", "cnpj empresa", "cnpj da empresa", "company cnpj"],
            CompanyField::Name => &[
                "empresa",
                "nome empresa",
                "nome da empresa",
                "razao social",
                "nome fantasia",
                "company",
                "company name",
            ],
            CompanyField::Address => &["endereco", "endereco empresa", "logradouro", "address"],
            CompanyField::City => &["cidade", "municipio", "city"],
            CompanyField::ContactName => &[
                "contato",
                "nome contato",
                "nome do contato",
                "responsavel",
                "contact",
                "contact name",
            ],
            CompanyField::Email => &["email", "e mail", "email contato", "email empresa"],
            CompanyField::Phone => &["telefone empresa", "telefone contato", "fone empresa", "company phone"],
            CompanyField::Plan => &["plano", "produto", "plan"],
            CompanyField::Discount => &["desconto", "percentual de desconto", "discount"],
            CompanyField::Value => &["valor", "valor mensal", "valor total", "mensalidade", "value"],
            CompanyField::TotalLives => &[
                "vidas",
                "total vidas",
                "total de vidas",
                "qtd vidas",
                "quantidade de vidas",
                "lives",
                "total lives",
            ],
            CompanyField::IndividualLives => &["individual", "vidas individual", "vidas individuais", "individual lives"],
            CompanyField::FamilyLives => &["familiar", "vidas familiar", "vidas familiares", "family", "family lives"],
        }
    }
}

// --- BENEFICIÁRIO ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BeneficiaryField {
    Cpf,
    Name,
    Phone,
    Dependents,
    Status,
    Active,
}

impl BeneficiaryField {
    #[cfg(test)]
    pub const ALL: [BeneficiaryField; 6] = [
        BeneficiaryField::Cpf,
        BeneficiaryField::Name,
        BeneficiaryField::Phone,
        BeneficiaryField::Dependents,
        BeneficiaryField::Status,
        BeneficiaryField::Active,
    ];
}

impl CanonicalField for BeneficiaryField {
    fn synonyms(self) -> &'static [&'static str] {
        match self {
            BeneficiaryField::Cpf => &["cpf", "cpf beneficiario", "cpf colaborador", "cpf titular"],
            BeneficiaryField::Name => &[
                "nome",
                "nome beneficiario",
                "nome colaborador",
                "nome completo",
                "beneficiario",
                "colaborador",
                "funcionario",
                "name",
                "full name",
            ],
            BeneficiaryField::Phone => &["telefone", "celular", "whatsapp", "phone", "mobile"],
            BeneficiaryField::Dependents => &[
                "dependentes",
                "qtd dependentes",
                "quantidade de dependentes",
                "numero de dependentes",
                "dependents",
            ],
            BeneficiaryField::Status => &["status", "tipo", "tipo beneficiario", "vinculo", "type"],
            BeneficiaryField::Active => &["ativo", "situacao", "active"],
        }
    }
}

// --- BENEFÍCIOS ---

impl CanonicalField for BenefitKey {
    fn synonyms(self) -> &'static [&'static str] {
        match self {
            BenefitKey::ClubeDesconto => &["clube de desconto", "clube desconto", "clube de vantagens", "discount club"],
            BenefitKey::ClubeDescontoDependente => &[
                "clube de desconto dependente",
                "clube de desconto dependentes",
                "clube desconto dependente",
                "discount club dependent",
            ],
            BenefitKey::Telemedicina => &["telemedicina", "telemedicina titular", "telemedicine"],
            BenefitKey::TelemedicinaFamiliar => &["telemedicina familiar", "telemedicina familia", "telemedicine family"],
            BenefitKey::ParceiroFixo => &["parceiro fixo", "parceiro", "fixed partner"],
            BenefitKey::Audiobook => &["audiobook", "audio book", "audiolivro", "audio livro"],
            BenefitKey::PasseBemEstar => &["passe bem estar", "bem estar", "wellhub", "gympass", "wellness pass"],
            BenefitKey::FarmaciaTitular => &["farmacia", "farmacia titular", "beneficio farmacia", "pharmacy"],
            BenefitKey::FarmaciaDependente => &["farmacia dependente", "farmacia dependentes", "pharmacy dependent"],
        }
    }
}

// ---
// Resolução
// ---

// Forma tolerante: sem trechos entre parênteses/colchetes e só letras e números
// ("valor (r$)" -> "valor", "desconto (%)" -> "desconto").
fn compact(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if depth == 0 && c.is_alphanumeric() => out.push(c),
            _ => {}
        }
    }
    out
}

/// Linha com as chaves já normalizadas. Normaliza uma vez, resolve vários campos.
pub struct NormalizedRow<'a> {
    cells: Vec<(String, String, &'a CellValue)>,
}

impl<'a> NormalizedRow<'a> {
    pub fn new(row: &'a RawRow) -> Self {
        let cells = row
            .cells
            .iter()
            .map(|(key, value)| {
                let normalized = normalize_header_text(key);
                let compacted = compact(&normalized);
                (normalized, compacted, value)
            })
            .collect();
        Self { cells }
    }

    /// Primeira célula (na ordem das colunas) cujo cabeçalho bate com um sinônimo do campo.
    pub fn resolve<F: CanonicalField>(&self, field: F) -> Option<&'a CellValue> {
        let synonyms = field.synonyms();
        self.cells
            .iter()
            .find(|(normalized, compacted, _)| {
                synonyms
                    .iter()
                    .any(|syn| normalized == syn || (!compacted.is_empty() && *compacted == compact(syn)))
            })
            .map(|(_, _, value)| *value)
    }

    /// Como `resolve`, mas ignora células em branco.
    pub fn resolve_filled<F: CanonicalField>(&self, field: F) -> Option<&'a CellValue> {
        self.resolve(field).filter(|v| !v.is_blank())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        RawRow::new(
            cells
                .iter()
                .map(|(k, v)| (k.to_string(), CellValue::Text(v.to_string())))
                .collect(),
        )
    }

    fn all_synonyms() -> Vec<(String, &'static str)> {
        let mut out = Vec::new();
        for f in CompanyField::ALL {
            out.extend(f.synonyms().iter().map(|s| (format!("{f:?}"), *s)));
        }
        for f in BeneficiaryField::ALL {
            out.extend(f.synonyms().iter().map(|s| (format!("beneficiary {f:?}"), *s)));
        }
        for f in BenefitKey::ALL {
            out.extend(f.synonyms().iter().map(|s| (format!("benefit {f:?}"), *s)));
        }
        out
    }

    #[test]
    fn synonyms_are_stored_normalized() {
        for (_, syn) in all_synonyms() {
            assert_eq!(normalize_header_text(syn), syn);
        }
    }

    #[test]
    fn no_spelling_belongs_to_two_fields() {
        let mut owners: HashMap<String, String> = HashMap::new();
        for (field, syn) in all_synonyms() {
            if let Some(previous) = owners.insert(compact(syn), field.clone()) {
                assert_eq!(previous, field, "'{syn}' is ambiguous");
            }
        }
    }

    #[test]
    fn resolves_accented_and_decorated_headers() {
        let raw = row(&[
            ("CNPJ Empresa", "34225216000177"),
            ("Desconto (%)", "10,5"),
            ("Razão Social", "Acme"),
            ("E-mail", "rh@acme.com"),
        ]);
        let norm = NormalizedRow::new(&raw);

        assert_eq!(norm.resolve(CompanyField::Cnpj), Some(&CellValue::Text("34225216000177".into())));
        assert_eq!(norm.resolve(CompanyField::Discount), Some(&CellValue::Text("10,5".into())));
        assert_eq!(norm.resolve(CompanyField::Name), Some(&CellValue::Text("Acme".into())));
        assert_eq!(norm.resolve(CompanyField::Email), Some(&CellValue::Text("rh@acme.com".into())));
        assert_eq!(norm.resolve(CompanyField::City), None);
    }

    #[test]
    fn bracketed_units_are_ignored() {
        let raw = row(&[("Valor (R$)", "R$ 1.234,56"), ("Vidas [total]", "12")]);
        let norm = NormalizedRow::new(&raw);
        assert_eq!(norm.resolve(CompanyField::Value), Some(&CellValue::Text("R$ 1.234,56".into())));
        assert_eq!(norm.resolve(CompanyField::TotalLives), Some(&CellValue::Text("12".into())));
        assert_eq!(compact("(obs)"), "");
    }

    #[test]
    fn first_matching_column_wins() {
        let raw = row(&[("Nome", "Ana"), ("nome_completo", "Ana Maria")]);
        let norm = NormalizedRow::new(&raw);
        assert_eq!(norm.resolve(BeneficiaryField::Name), Some(&CellValue::Text("Ana".into())));
    }

    #[test]
    fn company_and_beneficiary_phones_do_not_collide() {
        let raw = row(&[("Telefone Empresa", "1111"), ("Telefone", "2222")]);
        let norm = NormalizedRow::new(&raw);
        assert_eq!(norm.resolve(CompanyField::Phone), Some(&CellValue::Text("1111".into())));
        assert_eq!(norm.resolve(BeneficiaryField::Phone), Some(&CellValue::Text("2222".into())));
    }

    #[test]
    fn resolve_filled_skips_blank_cells() {
        let raw = row(&[("CPF", "  ")]);
        let norm = NormalizedRow::new(&raw);
        assert!(norm.resolve(BeneficiaryField::Cpf).is_some());
        assert!(norm.resolve_filled(BeneficiaryField::Cpf).is_none());
    }
}
