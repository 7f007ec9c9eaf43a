use std::net::SocketAddr;

use anyhow::Result;
use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

mod domain;
mod io;
mod storage;

use domain::{CategoryService, ExpenseService, StatisticsService};
use storage::{CategoryRepository, DbConnection, ExpenseRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService,
    pub category_service: CategoryService,
    pub statistics_service: StatisticsService<ExpenseRepository, CategoryRepository>,
}

impl AppState {
    /// Wire every service to the given database connection. Store handles
    /// are injected here; no service reads ambient connection state.
    pub fn new(db: DbConnection) -> Self {
        let expense_repository = ExpenseRepository::new(db.clone());
        let category_repository = CategoryRepository::new(db);

        Self {
            expense_service: ExpenseService::new(expense_repository.clone()),
            category_service: CategoryService::new(category_repository.clone()),
            statistics_service: StatisticsService::new(expense_repository, category_repository),
        }
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // CORS setup to allow frontend clients to make requests from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/expenses",
            get(io::rest::list_expenses).post(io::rest::create_expense),
        )
        .route(
            "/expenses/:id",
            get(io::rest::get_expense)
                .put(io::rest::update_expense)
                .delete(io::rest::delete_expense),
        )
        .route("/categories", get(io::rest::list_categories))
        .route("/categories/:id", get(io::rest::get_category))
        .route("/statistics/total", get(io::rest::get_statistics_total))
        .route(
            "/statistics/by-category",
            get(io::rest::get_statistics_by_category),
        );

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .route("/ping", get(io::rest::ping))
        .fallback(io::rest::not_found)
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("Setting up database");
    let db = DbConnection::init().await?;

    info!("Setting up application state");
    let state = AppState::new(db);

    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
