// Business logic layer for client registry operations.
//
// Enforces:
// - Tax-ID checksum validation and uniqueness across clients
// - Referential protection: clients with plans cannot be deleted
// - Soft deactivation as the alternative to deletion

use sqlx::MySqlPool;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::clients::{
    models::{Client, ClientReceivableSummary, NewClient},
    repositories::ClientRepository,
};

/// Service for client registry business logic
pub struct ClientService {
    repository: ClientRepository,
}

impl ClientService {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            repository: ClientRepository::new(pool),
        }
    }

    /// Register a new client.
    ///
    /// The tax ID, when present, must pass checksum validation and must not
    /// belong to another client.
    pub async fn create_client(&self, input: NewClient) -> Result<Client> {
        let client = Client::new(input)?;

        if let Some(ref tax_id) = client.tax_id {
            self.ensure_tax_id_free(tax_id, None).await?;
        }

        self.repository.insert(&client).await?;

        info!(
            client_id = client.id.as_str(),
            "Client registered"
        );

        Ok(client)
    }

    /// Update an existing client's registration data.
    pub async fn update_client(&self, id: &str, input: NewClient) -> Result<Client> {
        let mut client = self.get_client(id).await?;
        client.apply_update(input)?;

        if let Some(ref tax_id) = client.tax_id {
            self.ensure_tax_id_free(tax_id, Some(id)).await?;
        }

        self.repository.update(&client).await?;

        info!(client_id = id, "Client updated");

        Ok(client)
    }

    pub async fn get_client(&self, id: &str) -> Result<Client> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        self.repository.list().await
    }

    /// Delete a client with no plans. Clients referenced by any receivable
    /// plan are protected; deactivate them instead.
    pub async fn delete_client(&self, id: &str) -> Result<()> {
        let client = self.get_client(id).await?;

        let plan_count = self.repository.count_plans(&client.id).await?;
        if plan_count > 0 {
            warn!(
                client_id = id,
                plan_count, "Refusing to delete client with plans"
            );
            return Err(AppError::conflict(format!(
                "Client has {} receivable plan(s) and cannot be deleted",
                plan_count
            )));
        }

        self.repository.delete(id).await?;

        info!(client_id = id, "Client deleted");

        Ok(())
    }

    /// Soft-delete: flips the active flag, keeping plans and history intact.
    pub async fn deactivate_client(&self, id: &str) -> Result<Client> {
        let mut client = self.get_client(id).await?;
        client.deactivate();
        self.repository.update(&client).await?;

        info!(client_id = id, "Client deactivated");

        Ok(client)
    }

    /// Outstanding vs received totals across the client's plans.
    pub async fn receivable_summary(&self, id: &str) -> Result<ClientReceivableSummary> {
        let client = self.get_client(id).await?;
        self.repository.receivable_summary(&client.id).await
    }

    async fn ensure_tax_id_free(&self, tax_id: &str, own_id: Option<&str>) -> Result<()> {
        if let Some(holder) = self.repository.find_by_tax_id(tax_id).await? {
            if own_id != Some(holder.id.as_str()) {
                return Err(AppError::conflict(format!(
                    "Tax ID {} is already registered to another client",
                    tax_id
                )));
            }
        }
        Ok(())
    }
}
