use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::{
    AppState, MIGRATOR,
    auth::AuthService,
    jwt::{JwtConfig, JwtService},
    password::PasswordHasher,
    repositories::{DesignRepository, ProductRepository, UserRepository},
    routes,
};
use common::database::{self, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting Printloom backend");

    // Configuration is loaded once here; a missing connection string or
    // signing key aborts startup before the listener binds.
    let db_config = DatabaseConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;

    let pool = database::init_pool(&db_config).await?;

    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    MIGRATOR.run(&pool).await?;

    let jwt_service = JwtService::new(&jwt_config);
    let user_repository = UserRepository::new(pool.clone());
    let product_repository = ProductRepository::new(pool.clone());
    let design_repository = DesignRepository::new(pool.clone());

    let seeded = product_repository.seed_initial().await?;
    if seeded > 0 {
        info!("Seeded {} initial products", seeded);
    }

    let auth = AuthService::new(user_repository, PasswordHasher::new(), jwt_service);

    let app_state = AppState {
        db_pool: pool,
        auth,
        products: product_repository,
        designs: design_repository,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Printloom backend listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
