// src/db/company_repo.rs

use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::company::{Company, CompanyFields},
};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn list_all(&self) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies ORDER BY name ASC NULLS LAST, cnpj ASC",
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(company)
    }

    /// Busca pelo CNPJ exatamente como foi gravado (formato canônico quando válido).
    pub async fn find_id_by_cnpj<'e, E>(
        &self,
        executor: E,
        cnpj: &str,
    ) -> Result<Option<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM companies WHERE cnpj = $1")
            .bind(cnpj)
            .fetch_optional(executor)
            .await?;
        Ok(id)
    }

    // ---
    // Escrita
    // ---

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        fields: &CompanyFields,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO companies (
                cnpj, name, address, city, contact_name, email, phone,
                plan, discount, value, total_lives, individual_lives, family_lives, benefits
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
            .bind(&fields.cnpj)
            .bind(&fields.name)
            .bind(&fields.address)
            .bind(&fields.city)
            .bind(&fields.contact_name)
            .bind(&fields.email)
            .bind(&fields.phone)
            .bind(&fields.plan)
            .bind(fields.discount)
            .bind(fields.value)
            .bind(fields.total_lives)
            .bind(fields.individual_lives)
            .bind(fields.family_lives)
            .bind(Json(&fields.benefits))
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::CnpjAlreadyExists(fields.cnpj.clone());
                    }
                }
                e.into()
            })
    }

    /// Campos ausentes na planilha mantêm o valor gravado.
    /// `benefits` é sempre sobrescrito: a política de mesclagem é decidida antes de chegar aqui.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        fields: &CompanyFields,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                city = COALESCE($4, city),
                contact_name = COALESCE($5, contact_name),
                email = COALESCE($6, email),
                phone = COALESCE($7, phone),
                plan = COALESCE($8, plan),
                discount = COALESCE($9, discount),
                value = COALESCE($10, value),
                total_lives = COALESCE($11, total_lives),
                individual_lives = COALESCE($12, individual_lives),
                family_lives = COALESCE($13, family_lives),
                benefits = $14,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.address)
            .bind(&fields.city)
            .bind(&fields.contact_name)
            .bind(&fields.email)
            .bind(&fields.phone)
            .bind(&fields.plan)
            .bind(fields.discount)
            .bind(fields.value)
            .bind(fields.total_lives)
            .bind(fields.individual_lives)
            .bind(fields.family_lives)
            .bind(Json(&fields.benefits))
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::CompanyNotFound(id));
        }
        Ok(())
    }
}
