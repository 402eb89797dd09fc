use prisbo_api::{build_router, state::AppState};
use prisbo_config::Settings;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "prisbo_api=debug,prisbo_services=debug,prisbo_db=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load()?;

    let db = prisbo_db::connect(&settings).await?;
    prisbo_db::indexes::ensure_indexes(&db).await?;

    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    let app = build_router(AppState::new(db, settings));
    axum::serve(listener, app).await?;

    Ok(())
}
