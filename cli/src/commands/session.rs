//! Session commands

use anyhow::Result;
use safebite_core::{CredentialStore, Role, Session};
use tracing::info;

/// Store a session token obtained from the backend
pub async fn login_command(
    store: CredentialStore,
    token: String,
    role: String,
    username: String,
) -> Result<()> {
    let role: Role = role.parse()?;
    let session = Session::new(token, role, username);
    store.save(&session).await?;

    info!("Session saved to {}", store.path().display());
    println!(
        "Signed in as {} ({}), home page '{}'",
        session.username,
        role.as_str(),
        role.home_page()
    );
    Ok(())
}

pub async fn logout_command(store: CredentialStore) -> Result<()> {
    if store.clear().await? {
        println!("Signed out");
    } else {
        println!("No active session");
    }
    Ok(())
}

pub async fn whoami_command(store: CredentialStore) -> Result<()> {
    match store.load().await? {
        Some(session) => println!(
            "{} ({}) since {}",
            session.username,
            session.role.as_str(),
            session.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => println!("Not signed in"),
    }
    Ok(())
}
