// src/import/report.rs
//
// Exporta o log de linhas como CSV no padrão do Excel pt-BR (`;` e aspas em tudo).

use csv::{QuoteStyle, WriterBuilder};

use crate::common::error::AppError;
use crate::models::import::ImportRowLog;

const HEADER: [&str; 7] = ["linha", "cnpj", "empresa", "cpf", "beneficiario", "status", "mensagem"];

pub fn export_csv(rows: &[ImportRowLog]) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    for row in rows {
        let index = row.index.to_string();
        writer
            .write_record([
                index.as_str(),
                row.cnpj.as_deref().unwrap_or_default(),
                row.company_name.as_deref().unwrap_or_default(),
                row.cpf.as_deref().unwrap_or_default(),
                row.beneficiary_name.as_deref().unwrap_or_default(),
                row.status.as_str(),
                row.message.as_str(),
            ])
            .map_err(|e| AppError::InternalServerError(e.into()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalServerError(e.into()))
}
