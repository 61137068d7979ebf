//! Built-in SafeBite page table
//!
//! Used when no configuration file is found. Detail views are hidden from the
//! sidebar and aliased to their parent section.

use safebite_core::config::{AssetKind, AssetSettings};
use safebite_core::{ApiSettings, DashboardConfig, PageSettings, RouterSettings};
use std::collections::HashMap;

const DASHBOARD: &str = r#"<section id="dashboard">
<h1>{{title}}</h1>
<p>Signed in as {{#if username}}{{username}} ({{role}}){{else}}guest{{/if}}</p>
<h2>Live sensors</h2>
<canvas id="temperature-gauge" data-chart="gauge"></canvas>
<canvas id="humidity-gauge" data-chart="gauge"></canvas>
<canvas id="gas-gauge" data-chart="gauge"></canvas>
<h2>Recent alerts</h2>
<ul id="recent-alerts">
<li>No alerts in the last 24 hours</li>
</ul>
<h2>Devices online</h2>
<table id="device-status">
<tr><th>Device</th><th>Status</th><th>Last reading</th></tr>
</table>
</section>"#;

const USER_DASHBOARD: &str = r#"<section id="user-dashboard">
<h1>{{title}}</h1>
<p>Welcome back{{#if username}}, {{username}}{{/if}}.</p>
<h2>Your food items</h2>
<canvas id="freshness-gauge" data-chart="gauge"></canvas>
<ul id="my-food-items"></ul>
<h2>Your devices</h2>
<ul id="my-devices"></ul>
</section>"#;

const ANALYTICS_SUMMARY: &str = r#"<section id="analytics-summary">
<h1>{{title}}</h1>
<canvas id="activity-chart" data-chart="activity"></canvas>
<table id="analytics-table">
<tr><th>Sensor</th><th>Min</th><th>Max</th><th>Average</th></tr>
</table>
<p><a data-page="analytics-detail">Open detailed view</a></p>
</section>"#;

const ANALYTICS_DETAIL: &str = r#"<section id="analytics-detail">
<h1>{{title}}</h1>
<p><a data-page="analytics-summary">Back to summary</a></p>
<canvas id="detail-chart" data-chart="activity"></canvas>
<table id="readings-table">
<tr><th>Time</th><th>Temperature</th><th>Humidity</th><th>Gas</th></tr>
</table>
<button id="export-csv">Export CSV</button>
<button id="export-pdf">Export PDF</button>
</section>"#;

const USERS: &str = r#"<section id="users">
<h1>{{title}}</h1>
<form id="user-search"><input name="q" placeholder="Search users"></form>
<table id="users-table">
<tr><th>Name</th><th>Email</th><th>Role</th><th>Actions</th></tr>
</table>
<button id="add-user">Add user</button>
</section>"#;

const ADMIN_LOGS: &str = r#"<section id="admin-logs">
<h1>{{title}}</h1>
<table id="admin-log-table">
<tr><th>Time</th><th>Admin</th><th>Action</th></tr>
</table>
</section>"#;

const ACTIVITY_LOGS: &str = r#"<section id="activity-logs">
<h1>{{title}}</h1>
<table id="activity-log-table">
<tr><th>Time</th><th>User</th><th>Activity</th></tr>
</table>
</section>"#;

const FOOD_ITEMS: &str = r#"<section id="food-items">
<h1>{{title}}</h1>
<table id="food-items-table">
<tr><th>Item</th><th>Category</th><th>Expiry</th><th>Status</th></tr>
</table>
<button id="add-food-item">Add food item</button>
</section>"#;

const DEVICES: &str = r#"<section id="devices">
<h1>{{title}}</h1>
<table id="devices-table">
<tr><th>Device</th><th>Owner</th><th>Status</th><th>Actions</th></tr>
</table>
<button id="register-device">Register device</button>
</section>"#;

const DEVICE_DETAIL: &str = r#"<section id="device-detail">
<h1>{{title}}</h1>
<p><a data-page="devices">Back to devices</a></p>
<canvas id="device-chart" data-chart="activity"></canvas>
<dl id="device-info"></dl>
</section>"#;

const FEEDBACK: &str = r#"<section id="feedback">
<h1>{{title}}</h1>
<table id="feedback-table">
<tr><th>User</th><th>Rating</th><th>Comment</th></tr>
</table>
</section>"#;

const CONFIG: &str = r#"<section id="config">
<h1>{{title}}</h1>
<form id="api-config">
<label>API base URL <input name="base_url"></label>
<label>Refresh interval <input name="refresh_secs"></label>
</form>
</section>"#;

const LOGIN: &str = r#"<section id="login">
<h1>{{title}}</h1>
<p>Your session has ended. Sign in again with `safebite login`.</p>
</section>"#;

/// The standard SafeBite dashboard configuration
pub fn builtin_config() -> DashboardConfig {
    let pages = vec![
        PageSettings::new("dashboard", DASHBOARD)
            .with_title("Dashboard")
            .with_header()
            .with_asset(AssetSettings {
                kind: AssetKind::Script,
                href: "/js/gauge.js".to_string(),
            }),
        PageSettings::new("user-dashboard", USER_DASHBOARD)
            .with_title("My Dashboard")
            .with_header(),
        PageSettings::new("analytics-summary", ANALYTICS_SUMMARY)
            .with_title("Analytics")
            .with_header()
            .with_asset(AssetSettings {
                kind: AssetKind::Stylesheet,
                href: "/css/charts.css".to_string(),
            })
            .with_asset(AssetSettings {
                kind: AssetKind::Script,
                href: "/js/activity-chart.js".to_string(),
            }),
        PageSettings::new("analytics-detail", ANALYTICS_DETAIL)
            .with_title("Analytics Detail")
            .without_sidebar()
            .with_asset(AssetSettings {
                kind: AssetKind::Script,
                href: "/js/activity-chart.js".to_string(),
            }),
        PageSettings::new("users", USERS).with_title("Users"),
        PageSettings::new("admin-logs", ADMIN_LOGS).with_title("Admin Logs"),
        PageSettings::new("activity-logs", ACTIVITY_LOGS).with_title("Activity Logs"),
        PageSettings::new("food-items", FOOD_ITEMS).with_title("Food Items"),
        PageSettings::new("devices", DEVICES).with_title("Devices"),
        PageSettings::new("device-detail", DEVICE_DETAIL)
            .with_title("Device Detail")
            .without_sidebar(),
        PageSettings::new("feedback", FEEDBACK).with_title("Feedback"),
        PageSettings::new("config", CONFIG).with_title("Configuration"),
        PageSettings::new("login", LOGIN).with_title("Sign in").without_sidebar(),
    ];

    let aliases: HashMap<String, String> = [
        ("analytics-detail", "analytics-summary"),
        ("device-detail", "devices"),
        ("user-detail", "users"),
        ("food-item", "food-items"),
        ("log", "activity-logs"),
    ]
    .into_iter()
    .map(|(page, canonical)| (page.to_string(), canonical.to_string()))
    .collect();

    DashboardConfig {
        api: ApiSettings::default(),
        router: RouterSettings {
            default_page: Some("dashboard".to_string()),
            aliases,
            ..Default::default()
        },
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_is_valid() {
        let config = builtin_config();
        assert!(config.validate().is_ok());
        assert!(config.page("login").is_some());
    }

    #[test]
    fn test_aliases_point_at_sidebar_pages() {
        let config = builtin_config();
        for canonical in config.router.aliases.values() {
            let page = config
                .page(canonical)
                .unwrap_or_else(|| panic!("alias target '{}' is not a page", canonical));
            assert!(page.sidebar, "alias target '{}' is hidden", canonical);
        }
    }
}
