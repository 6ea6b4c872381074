//! `utezone-console` -- UTE Zone admin console runtime.
//!
//! Restores the persisted admin session, then polls notifications in the
//! background until interrupted, announcing unread summaries in the
//! terminal title and logging desktop notes.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default                     | Description                          |
//! |----------------------|----------|-----------------------------|--------------------------------------|
//! | `API_BASE_URL`       | no       | `http://localhost:8080/api` | Platform API base URL                |
//! | `TOKEN_PATH`         | no       | `.utezone-token`            | Where the access token is persisted  |
//! | `ACCESS_TOKEN`       | no       | --                          | Token to seed the store on first run |
//! | `POLL_INTERVAL_SECS` | no       | `30`                        | Seconds between notification polls   |

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utezone_client::auth::{AuthApi, TokenStore};
use utezone_client::ApiClient;
use utezone_console::config::ConsoleConfig;
use utezone_console::notifier::{LogNotifier, TerminalAnnouncer};
use utezone_console::poller::{self, ApiNotificationFeed, NotificationPanel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "utezone_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConsoleConfig::from_env();
    tracing::info!(
        api_base_url = %config.api_base_url,
        poll_interval_secs = config.poll_interval_secs,
        "Starting utezone-console",
    );

    let api = Arc::new(ApiClient::new(&config.api_base_url));
    let store = TokenStore::new(&config.token_path);

    // Allow seeding the store from the environment on first run.
    if store.load()?.is_none() {
        if let Ok(token) = std::env::var("ACCESS_TOKEN") {
            store.save(&token)?;
        }
    }

    let profile = AuthApi::bootstrap(&api, &store).await?;
    let Some(profile) = profile else {
        tracing::error!(
            "no valid session; set ACCESS_TOKEN or sign in and store a token at {}",
            store.path().display()
        );
        std::process::exit(1);
    };
    tracing::info!(admin = %profile.display_name, "Session restored");

    let panel = NotificationPanel::new(
        Arc::new(ApiNotificationFeed::new(Arc::clone(&api))),
        Arc::new(TerminalAnnouncer::new("UTE Zone Admin")),
        Arc::new(LogNotifier),
    );

    let cancel = CancellationToken::new();
    let poll = tokio::spawn(poller::run(
        panel,
        Duration::from_secs(config.poll_interval_secs),
        cancel.clone(),
    ));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Interrupt received, shutting down");
    cancel.cancel();
    let _ = poll.await;

    Ok(())
}
