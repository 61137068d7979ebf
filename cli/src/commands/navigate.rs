//! Scripted navigation command

use super::current_session;
use crate::config::CliConfigLoader;
use crate::output::{render_document, Snapshot};
use anyhow::Result;
use safebite_core::{CredentialStore, NavigationOutcome, Router};
use tracing::{info, warn};

/// Navigate through `pages` in order, settling deferred work after each step
///
/// With `scroll`, every page is scrolled to that row before the next
/// navigation, so its offset is remembered for later visits.
pub async fn navigate_command(
    config_loader: CliConfigLoader,
    store: CredentialStore,
    pages: Vec<String>,
    scroll: Option<u32>,
    json: bool,
) -> Result<()> {
    let loaded = config_loader.load().await?;
    let session = current_session(&store).await;
    let mut router = crate::dashboard::build_router(&loaded.config, session.as_ref())?;

    if pages.is_empty() {
        if let Some(outcome) = router.start() {
            report(&outcome);
        }
        settle(&mut router, scroll);
    }
    for page in pages {
        let outcome = router.navigate_to(page);
        report(&outcome);
        settle(&mut router, scroll);
    }

    if json {
        println!("{}", Snapshot::capture(&router).to_json()?);
    } else {
        print!("{}", render_document(&router));
    }
    Ok(())
}

fn settle(router: &mut Router, scroll: Option<u32>) {
    router.settle();
    if let Some(offset) = scroll {
        router.document_mut().container.scroll_to(offset);
    }
}

/// Log what a navigation did
pub(crate) fn report(outcome: &NavigationOutcome) {
    match outcome {
        NavigationOutcome::Rendered(page) => info!("Rendered '{}'", page),
        NavigationOutcome::Fallback { requested, rendered } => {
            warn!("'{}' is not a page, showing '{}'", requested, rendered)
        }
        NavigationOutcome::Unregistered(page) => warn!("'{}' is not a page, staying put", page),
        NavigationOutcome::RenderFailed { page, swapped } => {
            warn!("'{}' failed to render (content replaced: {})", page, swapped)
        }
    }
}
