//! # Main Entry Point
//!
//! Initializes the bot:
//! - Domain: Configuration and Types
//! - Infrastructure: Matrix, Trello
//! - Application: Role resolution, Grammar, Dispatcher, Emitter, Coverage check
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::SyncRoomMessageEvent,
    },
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::application::coverage::CoverageMonitor;
use crate::application::dispatcher::CommandDispatcher;
use crate::application::emitter::{ResponseEmitter, deliver};
use crate::application::settings::CoverageSettings;
use crate::domain::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::infrastructure::matrix::MatrixService;
use crate::infrastructure::trello::TrelloClient;

#[derive(Parser, Debug)]
#[command(name = "rdss-bot", about = "Tier-gated staff command bot for Matrix")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let data_dir = Path::new(&config.system.data_dir);
    if !data_dir.exists() {
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;
    }

    let file_appender = tracing_appender::rolling::never(data_dir, "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("{}", strings::logs::STARTING);

    // 3. Infrastructure
    let trello = Arc::new(TrelloClient::new(&config.services.trello)?);

    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await?;

    tracing::info!("{}", strings::logs::login_success(&config.services.matrix.username));

    if let Some(name) = &config.services.matrix.display_name
        && let Err(e) = client.account().set_display_name(Some(name.as_str())).await
    {
        tracing::warn!("Failed to set display name: {}", e);
    }

    let matrix = MatrixService::new(client.clone(), config.roles.clone());

    // 4. Application Components
    let settings = CoverageSettings::new(config.coverage.interval_minutes);
    let (emitter, responses) = ResponseEmitter::channel();
    let dispatcher = Arc::new(
        CommandDispatcher::from_config(&config, emitter, trello, settings.clone())
            .context("Failed to compile command grammar")?,
    );

    tokio::spawn(deliver(responses, Arc::new(matrix.clone())));

    if let Some(room) = &config.coverage.room {
        let monitor = CoverageMonitor::new(
            room.clone(),
            config.coverage.minimum_supervisors,
            dispatcher.resolver().clone(),
            settings.clone(),
            Arc::new(matrix.clone()),
        );
        tokio::spawn(monitor.run());
    }

    // 5. Event Loop
    let start_time = std::time::SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let dispatcher = dispatcher.clone();
        let matrix = matrix.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            let Some(mut message) = MatrixService::incoming_message(&room, original_msg) else {
                return;
            };
            if !dispatcher.is_candidate(&message) {
                return;
            }

            matrix.resolve_author(&room, &mut message.author).await;
            let outcome = dispatcher.dispatch(&message).await;
            tracing::debug!("Dispatch outcome for {}: {:?}", message.author.user_id, outcome);
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("Received invite for room {}", room.room_id());
            if let Err(e) = room.join().await {
                tracing::warn!("Failed to join {}: {}", room.room_id(), e);
            }
        }
    });

    // 6. Sync
    tracing::info!("{}", strings::logs::SYNC_LOOP_START);
    if let Err(e) = client.sync(SyncSettings::default()).await {
        tracing::error!("{}", strings::logs::sync_loop_fail(&e.to_string()));
        return Err(e.into());
    }

    Ok(())
}
