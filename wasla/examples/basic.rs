//! Basic example of the Wasla injector.

use std::fs;

use wasla::injector::Injector;
use wasla::value::Value;
use wasla::Result;

fn main() -> Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter("wasla=debug")
        .init();

    // === Lay out a small application on disk ===
    //
    //   app/
    //     config.wsl           plain data, loaded first
    //     modules/
    //       greeter.wsl        a map wired to injected deps
    //       web/routes.wsl     registered as `web/routes`
    //     packages/
    //       webkit.wsl         a package with an exports map
    let dir = tempfile::tempdir().expect("tempdir");
    let app = dir.path();

    fs::create_dir_all(app.join("modules/web")).expect("modules dir");
    fs::create_dir_all(app.join("packages")).expect("packages dir");

    fs::write(
        app.join("config.wsl"),
        r#"{ user: "amina", verbose: true }"#,
    )
    .expect("config module");

    fs::write(
        app.join("modules/greeter.wsl"),
        r#"# greets whoever the config names
let greeting = "hello"

{
    say: greeting,
    to: config.user,
    from: __filename,
}
"#,
    )
    .expect("greeter module");

    fs::write(
        app.join("modules/web/routes.wsl"),
        r#"{ paths: ["/", "/users", "/admin"] }"#,
    )
    .expect("routes module");

    fs::write(
        app.join("packages/webkit.wsl"),
        r#"{ exports: { render: "render()", mount: "mount()" } }"#,
    )
    .expect("webkit package");

    // === Build the injector and load everything ===
    let injector = Injector::builder().base_dir(app).build();

    injector.get("./config.wsl", None)?;
    injector.get("./modules", None)?;

    println!("✅ Injector ready: {injector:?}");

    let greeter = injector.get("greeter", None)?.expect("greeter loaded");
    println!(
        "👋 {} {}",
        greeter.get("say").and_then(Value::as_str).unwrap_or("?"),
        greeter.get("to").and_then(Value::as_str).unwrap_or("?"),
    );

    // === Search by pattern ===
    let routes = injector.find("^web/", true)?.expect("routes registered");
    println!("🛣  routes: {routes:?}");

    // === Fan a package's exports out into the registry ===
    injector.get("::webkit::exports.*", None)?;
    let render = injector.get("webkit/exports/render", None)?;
    println!("📦 webkit/exports/render = {render:?}");

    // === Drill into a loaded value directly ===
    let second = injector.nested_property(&routes, "paths[1]");
    println!("🔎 second route: {second:?}");

    println!("\n🎉 Everything works!");
    Ok(())
}
