//! Repository for the `forms` table.
//!
//! Every query is scoped by `user_id`: a form that belongs to someone else
//! behaves exactly like a form that does not exist.

use formbridge_core::types::{DbId, FormId, Timestamp};
use sqlx::PgPool;

use crate::models::form::{CreateForm, Form, FormSummary, UpdateForm};
use crate::models::status::FormStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, source_html, widget_url, widget_id, widget_version, \
                       session_id, status_id, custom_fields, settings, generated_filename, \
                       generated_at, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, name, widget_id, widget_version, status_id, \
                               generated_filename, generated_at, created_at, updated_at";

/// Provides CRUD operations for forms.
pub struct FormRepo;

impl FormRepo {
    /// Insert a new form owned by `user_id`, returning the created row.
    ///
    /// If `status_id` is `None` in the input, defaults to 1 (Draft). Missing
    /// structured fields default to `{}`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateForm,
    ) -> Result<Form, sqlx::Error> {
        let query = format!(
            "INSERT INTO forms (user_id, name, source_html, widget_url, widget_id,
                                widget_version, session_id, status_id, custom_fields, settings)
             VALUES ($1, $2, COALESCE($3, ''), $4, $5, $6, $7, COALESCE($8, 1),
                     COALESCE($9, '{{}}'::jsonb), COALESCE($10, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.source_html)
            .bind(&input.widget_url)
            .bind(&input.widget_id)
            .bind(&input.widget_version)
            .bind(&input.session_id)
            .bind(input.status_id)
            .bind(&input.custom_fields)
            .bind(&input.settings)
            .fetch_one(pool)
            .await
    }

    /// Find a form by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: FormId,
        user_id: DbId,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forms WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's forms, most recently updated first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FormSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM forms WHERE user_id = $1 ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, FormSummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a form. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists for this owner.
    pub async fn update(
        pool: &PgPool,
        id: FormId,
        user_id: DbId,
        input: &UpdateForm,
    ) -> Result<Option<Form>, sqlx::Error> {
        let query = format!(
            "UPDATE forms SET
                name = COALESCE($3, name),
                source_html = COALESCE($4, source_html),
                widget_url = COALESCE($5, widget_url),
                widget_id = COALESCE($6, widget_id),
                widget_version = COALESCE($7, widget_version),
                session_id = COALESCE($8, session_id),
                status_id = COALESCE($9, status_id),
                custom_fields = COALESCE($10, custom_fields),
                settings = COALESCE($11, settings)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.source_html)
            .bind(&input.widget_url)
            .bind(&input.widget_id)
            .bind(&input.widget_version)
            .bind(&input.session_id)
            .bind(input.status_id)
            .bind(&input.custom_fields)
            .bind(&input.settings)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful generation: status `generated`, artifact filename
    /// and timestamp. Returns `true` if the row was updated.
    pub async fn mark_generated(
        pool: &PgPool,
        id: FormId,
        user_id: DbId,
        filename: &str,
        generated_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE forms SET
                status_id = $3,
                generated_filename = $4,
                generated_at = $5
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(FormStatus::Generated.id())
        .bind(filename)
        .bind(generated_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a form. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: FormId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
