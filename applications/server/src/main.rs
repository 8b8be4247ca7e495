/// Larder Server - multi-user recipe catalogue server
use clap::{Parser, Subcommand};
use larder_server::{
    config::ServerConfig,
    services::{AccountFactory, AccountOverrides, AuthService},
    state::AppState,
};
use larder_storage::identities::IdentityFilter;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "larder-server")]
#[command(about = "Larder multi-user recipe catalogue server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Create a new user account
    CreateUser {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Create a superuser account
    CreateSuperuser {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List all accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "larder_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::CreateUser {
            email,
            password,
            name,
        } => {
            let factory = build_factory().await?;
            let identity = factory
                .create_user(&email, &password, named(name))
                .await?;
            println!("Created user {}", identity.email);
        }
        Commands::CreateSuperuser {
            email,
            password,
            name,
        } => {
            let factory = build_factory().await?;
            let identity = factory
                .create_superuser(&email, &password, named(name))
                .await?;
            println!("Created superuser {}", identity.email);
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

fn named(name: Option<String>) -> AccountOverrides {
    AccountOverrides {
        name,
        ..AccountOverrides::default()
    }
}

async fn serve(config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path)?;
    config.validate()?;

    tracing::info!("Starting Larder Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = larder_storage::create_pool(&config.storage.database_url).await?;
    larder_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    // Initialize auth service and account factory
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_expiration_hours,
    ));
    let accounts = Arc::new(AccountFactory::new(pool.clone()));
    tracing::info!("Auth service initialized");

    // Build application state and router
    let app_state = AppState::new(pool, auth_service, accounts);
    let app = larder_server::create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_factory() -> anyhow::Result<AccountFactory> {
    let config = ServerConfig::load(None)?;
    let pool = larder_storage::create_pool(&config.storage.database_url).await?;
    larder_storage::run_migrations(&pool).await?;

    Ok(AccountFactory::new(pool))
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load(None)?;
    let pool = larder_storage::create_pool(&config.storage.database_url).await?;
    larder_storage::run_migrations(&pool).await?;

    let listed = larder_storage::identities::list(&pool, &IdentityFilter::default()).await?;

    println!("Users:");
    for identity in listed {
        println!("  {} - {}", identity.email, identity.name);
    }

    Ok(())
}
