use std::sync::Arc;

use diesel::{
    r2d2::{ConnectionManager, Pool},
    SqliteConnection,
};
use tera::Tera;
use tokio::net::TcpListener;

use study_buddy::config::AppConfig;
use study_buddy::features::generation::FlashcardGenerator;
use study_buddy::{db, handlers};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    // Database configuration
    let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);
    let pool = match Pool::builder().build(manager) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to create DB pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db::init_database(&pool) {
        eprintln!("Database initialization failed: {}", e);
        std::process::exit(1);
    }

    // Flashcard generation engine
    let generator = Arc::new(FlashcardGenerator::new(&config));

    // Templates configuration
    let templates = match Tera::new("templates/**/*.html") {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Template parsing error: {}", e);
            std::process::exit(1);
        }
    };
    let templates = Arc::new(templates);

    let app = handlers::build_router(pool, generator, templates);

    // Start server
    let listener = match TcpListener::bind(&config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to address: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Server running on http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
