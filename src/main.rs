#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::{web, App, HttpServer};
    use leptos::logging::log;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use spotstay::api;
    use spotstay::app::App as SpotStayApp;
    use spotstay::config::AppConfig;
    use spotstay::db::Database;
    use spotstay::seed::seed_demo_data;
    use std::io;

    fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
        io::Error::new(io::ErrorKind::Other, format!("{context}: {err}"))
    }

    let config = AppConfig::from_env();

    // Initialize the database
    let db = Database::new(&config.db_path).map_err(|e| startup_error("opening database", e))?;
    db.create_schema()
        .await
        .map_err(|e| startup_error("creating schema", e))?;
    if config.seed_demo {
        seed_demo_data(&db)
            .await
            .map_err(|e| startup_error("seeding demo data", e))?;
    }
    let db = web::Data::new(db);
    let app_config = web::Data::new(config);

    // Load configuration
    let conf = get_configuration(None)
        .await
        .map_err(|e| startup_error("loading leptos configuration", e))?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(SpotStayApp);
    log!("listening on http://{}", &addr);

    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            .app_data(db.clone())
            .app_data(app_config.clone())
            // Register API routes BEFORE the Leptos routes
            .configure(api::configure)
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Serve the favicon from /favicon.ico
            .service(favicon)
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), SpotStayApp)
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // to run: `trunk serve --open --features csr`
    use spotstay::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
