// MySQL CRUD operations for clients, plus the client-scoped receivable
// aggregate queries used by reports.

use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::clients::models::{Client, ClientReceivableSummary};

/// Repository for client database operations
pub struct ClientRepository {
    pool: MySqlPool,
}

impl ClientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, client: &Client) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, full_name, tax_id, phone, email, address, notes,
                active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&client.id)
        .bind(&client.full_name)
        .bind(&client.tax_id)
        .bind(&client.phone)
        .bind(&client.email)
        .bind(&client.address)
        .bind(&client.notes)
        .bind(client.active)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, client: &Client) -> Result<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE clients
            SET
                full_name = ?,
                tax_id = ?,
                phone = ?,
                email = ?,
                address = ?,
                notes = ?,
                active = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&client.full_name)
        .bind(&client.tax_id)
        .bind(&client.phone)
        .bind(&client.email)
        .bind(&client.address)
        .bind(&client.notes)
        .bind(client.active)
        .bind(client.updated_at)
        .bind(&client.id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found("Client not found"));
        }

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT
                id, full_name, tax_id, phone, email, address, notes,
                active, created_at, updated_at
            FROM clients
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Find a client holding the given normalized tax ID.
    /// Used for uniqueness enforcement before insert/update.
    pub async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT
                id, full_name, tax_id, phone, email, address, notes,
                active, created_at, updated_at
            FROM clients
            WHERE tax_id = ?
            "#,
        )
        .bind(tax_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn list(&self) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT
                id, full_name, tax_id, phone, email, address, notes,
                active, created_at, updated_at
            FROM clients
            ORDER BY full_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let rows_affected = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found("Client not found"));
        }

        Ok(())
    }

    /// Number of receivable plans referencing this client.
    pub async fn count_plans(&self, client_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM receivable_plans WHERE client_id = ?")
                .bind(client_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Outstanding and received totals across all of the client's plans.
    pub async fn receivable_summary(&self, client_id: &str) -> Result<ClientReceivableSummary> {
        let outstanding_total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(i.amount), 0)
            FROM installments i
            JOIN receivable_plans p ON p.id = i.plan_id
            WHERE p.client_id = ? AND i.status IN ('open', 'overdue')
            "#,
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;

        let received_total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(i.amount), 0)
            FROM installments i
            JOIN receivable_plans p ON p.id = i.plan_id
            WHERE p.client_id = ? AND i.status = 'paid'
            "#,
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ClientReceivableSummary {
            outstanding_total,
            received_total,
        })
    }
}
