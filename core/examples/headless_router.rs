//! Example driving the page router without a terminal
//!
//! Registers three pages, walks through them and prints what the document
//! looks like after each step.

use safebite_core::config::AssetKind;
use safebite_core::router::NavigationPhase;
use safebite_core::{PageRegistry, Router, RouterSettings, TemplateStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== SafeBite Headless Router Example ===\n");

    let registry = PageRegistry::builder()
        .template_page("dashboard", "Dashboard")
        .page("devices", "Devices", |ctx| {
            ctx.swap_template()?;
            ctx.load_asset(AssetKind::Script, "/js/devices.js");
            ctx.defer("devices:table", |tick| {
                let markup = format!("{}\n<tr><td>fridge-01</td></tr>", tick.document.container.markup());
                tick.document.container.set_markup(markup);
                Ok(())
            });
            Ok(())
        })
        .template_page("device-detail", "Device")
        .default("dashboard")
        .build()?;

    let mut templates = TemplateStore::new();
    templates.register(&"dashboard".into(), "<h1>{{title}}</h1>")?;
    templates.register(&"devices".into(), "<h1>{{title}}</h1>\n<table id=\"devices\"></table>")?;
    templates.register(&"device-detail".into(), "<h1>{{title}}</h1>")?;

    let mut settings = RouterSettings::default();
    settings
        .aliases
        .insert("device-detail".to_string(), "devices".to_string());

    let mut router = Router::new(registry, templates, &settings)?;
    router.document_mut().sidebar.push("dashboard", "Dashboard");
    router.document_mut().sidebar.push("devices", "Devices");
    router.subscribe(NavigationPhase::After, |event| {
        println!("after-navigate: {:?} -> {}", event.from, event.to);
        Ok(())
    });

    router.start();
    for page in ["devices", "device-detail", "reports"] {
        let outcome = router.navigate_to(page);
        let ticks = router.settle();
        let doc = router.document();
        println!("{:?} (settled in {} tick(s))", outcome, ticks);
        println!("  sidebar: {:?}", doc.sidebar.active_keys());
        println!("  assets:  {}", doc.assets().len());
        println!("  markup:  {}\n", doc.container.markup().replace('\n', " "));
    }

    Ok(())
}
