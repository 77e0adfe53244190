// src/import/normalizer.rs
//
// Funções puras que convertem células cruas em tipos canônicos.
// Nenhuma delas falha: entrada ruim degrada para 0 ou `TriState::Absent`.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::spreadsheet::CellValue;

/// Decompõe (NFD) e remove as marcas combinantes: "Não" -> "Nao".
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Normaliza um texto de cabeçalho: trim, minúsculas, sem acentos,
/// e sequências de `_`, `-` e espaços viram um único espaço.
pub fn normalize_header_text(s: &str) -> String {
    let lowered = strip_accents(s.trim()).to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for c in lowered.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Nome de empresa canônico: maiúsculas, sem acentos, só letras/números e espaços simples.
pub fn normalize_company_name(s: &str) -> String {
    strip_accents(s)
        .to_uppercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ---
// CNPJ
// ---

/// 14 dígitos -> `NN.NNN.NNN/NNNN-NN`. Qualquer outra coisa -> `None`.
pub fn format_cnpj(digits: &str) -> Option<String> {
    if digits.len() != 14 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    ))
}

/// Formata quando há exatamente 14 dígitos; caso contrário devolve a entrada aparada, intacta.
pub fn canonical_cnpj(raw: &str) -> String {
    format_cnpj(&digits_only(raw)).unwrap_or_else(|| raw.trim().to_string())
}

// ---
// Números no formato brasileiro
// ---

/// Versão falível usada internamente (e pelo tri-state): `None` quando nada numérico sobra.
pub fn try_parse_locale_number(v: &CellValue) -> Option<Decimal> {
    match v {
        CellValue::Empty => None,
        CellValue::Number(n) => Decimal::from_f64(*n),
        CellValue::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        CellValue::Text(s) => parse_locale_str(s),
    }
}

/// "10,5" -> 10.5, "1.234.567" -> 1234567, "R$ 1.234,56" -> 1234.56. Falha vira 0.
pub fn parse_locale_number(v: &CellValue) -> Decimal {
    try_parse_locale_number(v).unwrap_or(Decimal::ZERO)
}

/// Mesmo algoritmo de `parse_locale_number`; o símbolo da moeda some na limpeza.
pub fn parse_currency(v: &CellValue) -> Decimal {
    parse_locale_number(v)
}

fn parse_locale_str(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let canonical = if has_decimal_comma(&cleaned) {
        // Vírgula decimal: pontos são milhares, a última vírgula vira ponto.
        let without_dots: String = cleaned.chars().filter(|c| *c != '.').collect();
        match without_dots.rsplit_once(',') {
            Some((int_part, frac)) => format!("{}.{}", int_part.replace(',', ""), frac),
            None => without_dots,
        }
    } else {
        let without_commas = cleaned.replace(',', "");
        if without_commas.matches('.').count() > 1 {
            without_commas.replace('.', "")
        } else {
            without_commas
        }
    };

    Decimal::from_str(&canonical).ok()
}

fn has_decimal_comma(s: &str) -> bool {
    match s.rsplit_once(',') {
        Some((_, frac)) => (1..=2).contains(&frac.len()) && frac.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

// ---
// Booleanos de três estados
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    True,
    False,
    /// Coluna vazia ou valor irreconhecível: não mexer no estado gravado.
    Absent,
}

impl TriState {
    pub fn as_option(self) -> Option<bool> {
        match self {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::Absent => None,
        }
    }
}

impl From<bool> for TriState {
    fn from(b: bool) -> Self {
        if b { TriState::True } else { TriState::False }
    }
}

const TRUTHY: [&str; 7] = ["sim", "s", "yes", "y", "true", "1", "ativo"];
const FALSY: [&str; 6] = ["nao", "n", "no", "false", "0", "inativo"];

/// Só as palavras conhecidas ("sim", "não", "ativo"...), sem coerção numérica.
pub fn parse_bool_word(s: &str) -> TriState {
    let key = normalize_header_text(s);
    if TRUTHY.contains(&key.as_str()) {
        TriState::True
    } else if FALSY.contains(&key.as_str()) {
        TriState::False
    } else {
        TriState::Absent
    }
}

pub fn parse_tri_state(v: &CellValue) -> TriState {
    match v {
        CellValue::Empty => TriState::Absent,
        CellValue::Bool(b) => TriState::from(*b),
        CellValue::Number(n) => TriState::from(*n > 0.0),
        CellValue::Text(s) => match parse_bool_word(s) {
            TriState::Absent => match parse_locale_str(s) {
                Some(n) => TriState::from(n > Decimal::ZERO),
                None => TriState::Absent,
            },
            word => word,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn header_text_is_lowercased_without_accents_and_separators() {
        assert_eq!(normalize_header_text("  CNPJ_Empresa "), "cnpj empresa");
        assert_eq!(normalize_header_text("Endereço--Completo"), "endereco completo");
        assert_eq!(normalize_header_text("Qtd.   de\tVidas"), "qtd. de vidas");
        assert_eq!(normalize_header_text("__Benefício__"), "beneficio");
        assert_eq!(normalize_header_text(""), "");
    }

    #[test]
    fn digits_only_drops_punctuation() {
        assert_eq!(digits_only("34.225.216/0001-77"), "34225216000177");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn cnpj_is_formatted_when_it_has_14_digits() {
        assert_eq!(canonical_cnpj("34225216000177"), "34.225.216/0001-77");
        assert_eq!(format_cnpj("3422521600017"), None);
    }

    #[test]
    fn cnpj_formatting_is_idempotent() {
        let once = canonical_cnpj("12345678000195");
        assert_eq!(once, "12.345.678/0001-95");
        assert_eq!(canonical_cnpj(&once), once);
        assert_eq!(format_cnpj(&digits_only(&once)).as_deref(), Some(once.as_str()));
    }

    #[test]
    fn malformed_cnpj_passes_through_trimmed() {
        assert_eq!(canonical_cnpj("  123.456 "), "123.456");
        assert_eq!(canonical_cnpj("123456780001950"), "123456780001950");
    }

    #[test]
    fn company_name_is_uppercased_and_cleaned() {
        assert_eq!(normalize_company_name(" Açaí & Cia.  Ltda "), "ACAI CIA LTDA");
    }

    #[test]
    fn locale_numbers() {
        assert_eq!(parse_locale_number(&text("10,5")), Decimal::new(105, 1));
        assert_eq!(parse_locale_number(&text("1.234.567")), Decimal::from(1_234_567));
        assert_eq!(parse_locale_number(&text("1.234,56")), Decimal::new(123_456, 2));
        assert_eq!(parse_locale_number(&text("1,234.56")), Decimal::new(123_456, 2));
        assert_eq!(parse_locale_number(&text("-3,5")), Decimal::new(-35, 1));
        assert_eq!(parse_locale_number(&CellValue::Number(12.25)), Decimal::new(1225, 2));
    }

    #[test]
    fn locale_number_failures_become_zero() {
        assert_eq!(parse_locale_number(&CellValue::Empty), Decimal::ZERO);
        assert_eq!(parse_locale_number(&text("abc")), Decimal::ZERO);
        assert_eq!(parse_locale_number(&text("1-2-3")), Decimal::ZERO);
        assert_eq!(parse_locale_number(&text(",")), Decimal::ZERO);
    }

    #[test]
    fn currency_strips_symbol() {
        assert_eq!(parse_currency(&text("R$ 1.234,56")), Decimal::new(123_456, 2));
        assert_eq!(parse_currency(&text("R$ 89,9")), Decimal::new(899, 1));
    }

    #[test]
    fn tri_state_words() {
        assert_eq!(parse_tri_state(&text("Sim")), TriState::True);
        assert_eq!(parse_tri_state(&text("ATIVO")), TriState::True);
        assert_eq!(parse_tri_state(&text("Não")), TriState::False);
        assert_eq!(parse_tri_state(&text("inativo")), TriState::False);
        assert_eq!(parse_tri_state(&text("N")), TriState::False);
    }

    #[test]
    fn tri_state_numeric_and_absent() {
        assert_eq!(parse_tri_state(&text("2")), TriState::True);
        assert_eq!(parse_tri_state(&CellValue::Number(0.0)), TriState::False);
        assert_eq!(parse_tri_state(&CellValue::Bool(true)), TriState::True);
        assert_eq!(parse_tri_state(&text("talvez")), TriState::Absent);
        assert_eq!(parse_tri_state(&text("   ")), TriState::Absent);
        assert_eq!(parse_tri_state(&CellValue::Empty), TriState::Absent);
    }
}
