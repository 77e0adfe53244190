// src/import/spreadsheet.rs
//
// Decodifica o arquivo enviado (xlsx/xls/xlsb/ods ou csv) em cabeçalho + linhas.
// Só a primeira aba é lida, e o arquivo inteiro fica em memória.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::common::error::ImportError;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Texto aparado da célula; números inteiros saem sem casas decimais.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(format!("{}", n))
                }
            }
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(n) => CellValue::Number(*n),
            Data::Int(n) => CellValue::Number(*n as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            // Datas chegam como serial do Excel; nenhum campo importado usa datas.
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        }
    }
}

// Uma linha de dados: pares (cabeçalho original, valor) na ordem das colunas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Spreadsheet {
    /// A extensão do nome decide o decodificador: `.csv`/`.txt` vão para o leitor CSV,
    /// o resto para a detecção automática do calamine.
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self, ImportError> {
        if bytes.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        let lower = file_name.to_lowercase();
        let grid = if lower.ends_with(".csv") || lower.ends_with(".txt") {
            decode_csv(bytes)?
        } else {
            decode_workbook(bytes)?
        };

        Self::from_grid(grid)
    }

    /// A primeira linha não vazia é o cabeçalho; tudo abaixo dela são dados.
    pub fn from_grid(grid: Vec<Vec<CellValue>>) -> Result<Self, ImportError> {
        let mut rows = grid.into_iter().skip_while(|r| r.iter().all(CellValue::is_blank));

        let headers: Vec<String> = rows
            .next()
            .ok_or(ImportError::MissingHeader)?
            .iter()
            .map(|c| c.as_text().unwrap_or_default())
            .collect();

        let data: Vec<RawRow> = rows
            .map(|row| {
                RawRow::new(
                    headers
                        .iter()
                        .cloned()
                        .zip(row.into_iter().chain(std::iter::repeat(CellValue::Empty)))
                        .collect(),
                )
            })
            .collect();

        if data.is_empty() {
            return Err(ImportError::NoDataRows);
        }

        Ok(Self { headers, rows: data })
    }
}

fn decode_workbook(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoSheets)?
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(CellValue::from).collect())
        .collect())
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, ImportError> {
    // CSV exportado pelo Excel em pt-BR costuma vir em Windows-1252.
    let content = match std::str::from_utf8(bytes) {
        Ok(s) => s.trim_start_matches('\u{feff}').to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(&content))
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::Unreadable(e.to_string()))?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(grid)
}

/// Escolhe `;`, `,` ou tab pelo número de campos da primeira linha não vazia.
/// Vírgula decimal é comum nos dados, então `;` ganha empates.
fn sniff_delimiter(content: &str) -> u8 {
    let Some(first_line) = content.lines().find(|l| !l.trim().is_empty()) else {
        return b';';
    };

    let mut best = b';';
    let mut best_fields = 1usize;
    for delim in [b';', b',', b'\t'] {
        let fields = csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .from_reader(first_line.as_bytes())
            .records()
            .next()
            .and_then(|r| r.ok())
            .map(|r| r.len())
            .unwrap_or(1);

        if fields > best_fields {
            best_fields = fields;
            best = delim;
        }
    }
    best
}
