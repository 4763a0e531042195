//! GCP Authentication
//!
//! Google Cloud Platform認証機能

use anyhow::{Context, Result};
use google_cloud_bigquery::client::{Client, ClientConfig};
use google_cloud_storage::client::Storage;
use log::info;

/// Expands tilde in path and returns the full path
pub fn expand_key_path(key_path: &str) -> String {
    shellexpand::tilde(key_path).to_string()
}

/// Points Application Default Credentials at a service account key, if one is configured
fn use_service_account_key(key_path: Option<&str>) {
    if let Some(key_path) = key_path {
        let expanded_path = expand_key_path(key_path);
        info!("Using service account key: {}", expanded_path);
        std::env::set_var("GOOGLE_APPLICATION_CREDENTIALS", &expanded_path);
    }
}

/// Creates a BigQuery client
///
/// Returns the client together with the project id found in the credentials, if any.
pub async fn create_bigquery_client(key_path: Option<&str>) -> Result<(Client, Option<String>)> {
    use_service_account_key(key_path);

    let (config, project_id) = ClientConfig::new_with_auth()
        .await
        .context("Failed to authenticate with Google Cloud")?;

    let client = Client::new(config)
        .await
        .context("Failed to create BigQuery client")?;

    Ok((client, project_id))
}

/// Creates a Cloud Storage client
pub async fn create_storage_client(key_path: Option<&str>) -> Result<Storage> {
    let client = match key_path {
        Some(key_path) => {
            let expanded_path = expand_key_path(key_path);
            let content = tokio::fs::read_to_string(&expanded_path)
                .await
                .with_context(|| format!("Failed to read service account key: {}", expanded_path))?;
            let key: serde_json::Value =
                serde_json::from_str(&content).context("Failed to parse service account key")?;
            let credentials = google_cloud_auth::credentials::service_account::Builder::new(key)
                .build()
                .context("Failed to authenticate with service account")?;

            Storage::builder().with_credentials(credentials).build().await
        }
        None => Storage::builder().build().await,
    }
    .context("Failed to create Cloud Storage client")?;

    Ok(client)
}
