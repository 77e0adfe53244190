// src/db/beneficiary_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::beneficiary::{Beneficiary, BeneficiaryFields, BeneficiaryStatus},
};

#[derive(Clone)]
pub struct BeneficiaryRepository {
    pool: PgPool,
}

impl BeneficiaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Só beneficiários ativos (sem `deleted_at`) aparecem em listagens.
    pub async fn list_active_by_company(&self, company_id: Uuid) -> Result<Vec<Beneficiary>, AppError> {
        let beneficiaries = sqlx::query_as::<_, Beneficiary>(
            r#"
            SELECT * FROM beneficiaries
            WHERE company_id = $1 AND deleted_at IS NULL
            ORDER BY name ASC NULLS LAST, cpf ASC
            "#,
        )
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(beneficiaries)
    }

    /// Chave natural: (CPF, empresa). `company_id` nulo casa com nulo.
    /// Registros removidos logicamente não participam da importação.
    pub async fn find_active_id<'e, E>(
        &self,
        executor: E,
        cpf: &str,
        company_id: Option<Uuid>,
    ) -> Result<Option<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM beneficiaries
            WHERE cpf = $1
              AND company_id IS NOT DISTINCT FROM $2
              AND deleted_at IS NULL
            "#,
        )
            .bind(cpf)
            .bind(company_id)
            .fetch_optional(executor)
            .await?;
        Ok(id)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        company_id: Option<Uuid>,
        fields: &BeneficiaryFields,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Padrões de um cadastro novo: titular e ativo.
        let status = fields
            .status
            .as_ref()
            .map(BeneficiaryStatus::as_str)
            .unwrap_or("titular")
            .to_string();

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO beneficiaries (company_id, cpf, name, phone, dependents, status, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
            .bind(company_id)
            .bind(&fields.cpf)
            .bind(&fields.name)
            .bind(&fields.phone)
            .bind(fields.dependents)
            .bind(status)
            .bind(fields.active.unwrap_or(true))
            .fetch_one(executor)
            .await
            .map_err(|e| {
                // Outra importação gravou o mesmo (CPF, empresa) entre a busca e o insert.
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::StoreError(format!(
                            "CPF {} já cadastrado para esta empresa",
                            fields.cpf
                        ));
                    }
                }
                e.into()
            })?;
        Ok(id)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        fields: &BeneficiaryFields,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE beneficiaries SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                dependents = COALESCE($4, dependents),
                status = COALESCE($5, status),
                active = COALESCE($6, active),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.phone)
            .bind(fields.dependents)
            .bind(fields.status.as_ref().map(BeneficiaryStatus::as_str))
            .bind(fields.active)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::BeneficiaryNotFound(id));
        }
        Ok(())
    }

    /// Remoção lógica: a linha continua no banco para auditoria.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE beneficiaries
            SET deleted_at = NOW(), active = FALSE, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::BeneficiaryNotFound(id));
        }
        Ok(())
    }
}
