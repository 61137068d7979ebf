//! Terminal output for the headless dashboard
//!
//! Renders the router's document as text and as a JSON snapshot.

pub mod render;
pub mod snapshot;

pub use render::render_document;
pub use snapshot::Snapshot;
