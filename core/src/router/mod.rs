//! Page router
//!
//! Swaps page templates into the shared content container, runs page
//! initializers, restores per-page scroll offsets and keeps the sidebar and
//! header chrome in sync with the visible page.

pub mod aliases;
pub mod dispatch;
pub mod events;
pub mod page;
pub mod registry;
#[allow(clippy::module_inception)]
pub mod router;
pub mod scheduler;
pub mod state;
pub mod templates;

// Re-export commonly used types
pub use aliases::AliasTable;
pub use dispatch::{Element, UiEvent, NAV_ATTRIBUTE};
pub use events::{Delivery, EventBus, NavigationEvent, NavigationPhase};
pub use page::PageKey;
pub use registry::{PageContext, PageEntry, PageRegistry, PageRegistryBuilder};
pub use router::{NavigationOutcome, Router};
pub use scheduler::{TickContext, TickQueue, TickReport};
pub use state::NavigationState;
pub use templates::TemplateStore;
