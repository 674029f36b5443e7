//! Connection setup for PostgreSQL.

use crate::error::StoreError;
use tokio_postgres::{Client, NoTls};

/// Connect to PostgreSQL and spawn the connection driver task.
///
/// The returned client is usable immediately; the connection task logs and
/// exits if the link drops, after which queries start failing.
pub async fn connect(database_url: &str) -> Result<Client, StoreError> {
    let (client, connection) = tokio_postgres::connect(database_url, NoTls).await?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("PostgreSQL connection error: {}", e);
        }
    });

    // Smoke-test the session before handing it out.
    client.simple_query("SELECT 1").await?;

    Ok(client)
}
