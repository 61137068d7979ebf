//! Backend fetch command

use crate::config::CliConfigLoader;
use crate::output::render_document;
use anyhow::{bail, Result};
use safebite_core::error::ApiError;
use safebite_core::{ApiClient, CredentialStore, Error};
use tracing::{debug, warn};

/// GET `path` from the backend and print the JSON body
///
/// A rejected session sends the dashboard to the login page, the same way the
/// browser client redirects.
pub async fn fetch_command(
    config_loader: CliConfigLoader,
    store: CredentialStore,
    path: String,
) -> Result<()> {
    let loaded = config_loader.load().await?;
    let client = ApiClient::new(loaded.config.api.clone(), store)?;
    debug!("Fetching {}", client.endpoint(&path)?);

    match client.get_json::<serde_json::Value>(&path).await {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(Error::Api(ApiError::Unauthorized { redirect_to })) => {
            warn!("Session rejected by the backend, redirecting to '{}'", redirect_to);
            let mut router = crate::dashboard::build_router(&loaded.config, None)?;
            let outcome = router.navigate_to(redirect_to.as_str());
            super::navigate::report(&outcome);
            router.settle();
            print!("{}", render_document(&router));
            bail!("Not signed in: the backend rejected the stored session")
        }
        Err(e) => Err(e.into()),
    }
}
