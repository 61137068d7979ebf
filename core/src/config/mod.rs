//! Minimal configuration module for SafeBite core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{
    ApiSettings, AssetKind, AssetSettings, DashboardConfig, PageSettings, RouterSettings,
};
