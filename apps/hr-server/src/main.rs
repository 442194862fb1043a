use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use rust_decimal::Decimal;
use tracing::{info, warn};

use hr_api::views::HandlebarsRenderer;
use hr_api::{build_router, AppState};
use hr_core::domain::{EmployeeCreate, EmploymentType};
use hr_core::repositories::EmployeeRepository;
use hr_infrastructure::{create_pool, run_migrations, PgEmployeeRepository};
use hr_shared::config::{AppConfig, BootstrapAdmin};
use hr_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry; the guard flushes the file writer on exit
    let _log_guard = init_telemetry(&config.logging)?;

    info!(name = %config.app.name, env = %config.app.env, "HR server starting...");

    // Connect to Database
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database connection established.");

    if config.database.run_migrations {
        run_migrations(&pool).await.context("Failed to run migrations")?;
    }

    // Create App State
    let repo: Arc<dyn EmployeeRepository> = Arc::new(PgEmployeeRepository::new(pool));
    let renderer = Arc::new(HandlebarsRenderer::new()?);
    let state = AppState::from_config(&config, repo, renderer);

    if let Some(admin) = &config.bootstrap_admin {
        seed_admin(&state, admin).await?;
    }

    // Build router
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HR server stopped");
    Ok(())
}

async fn seed_admin(state: &AppState, admin: &BootstrapAdmin) -> anyhow::Result<()> {
    let payload = EmployeeCreate {
        username: admin.username.clone(),
        password: admin.password.clone(),
        first_name: admin.first_name.clone(),
        last_name: admin.last_name.clone(),
        email: admin.email.clone(),
        phone_number: admin.phone_number.clone(),
        age: admin.age,
        role: admin.role.clone(),
        salary: Decimal::ZERO,
        employment_type: EmploymentType::FullTime,
        contract_end_date: None,
    };

    let created = state
        .auth_service()
        .ensure_bootstrap_admin(&state.employee_service(), payload)
        .await
        .context("Failed to create bootstrap administrator")?;

    if created.is_none() {
        info!("Employee store not empty, bootstrap administrator skipped");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
