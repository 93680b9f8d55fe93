//! Quizdeck · Quiz & Flash-Card Game Backend
//!
//! - Axum HTTP API: image proxy, quiz generation, quiz/game sessions
//! - Optional OpenAI integration (via environment variables)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT             : u16 (default 5000; point the client at the same value)
//!   OPENAI_API_KEY      : enables OpenAI integration if present
//!   OPENAI_BASE_URL     : default "https://api.openai.com/v1"
//!   OPENAI_CHAT_MODEL   : default "gpt-4o-mini"
//!   OPENAI_IMAGE_MODEL  : default "dall-e-3"
//!   QUIZDECK_CONFIG_PATH : path to TOML config (prompts + optional quiz/pair banks)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod cards;
mod game;
mod quiz;
mod seeds;
mod error;
mod state;
mod protocol;
mod logic;
mod openai;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::OpenAiConfig;
use crate::openai::OpenAI;
use crate::routes::build_router;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 5000;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Resolve config and credentials once, up front; everything below receives
  // them as plain values.
  let cfg = config::load_app_config_from_env().unwrap_or_default();
  let openai = OpenAiConfig::from_env().and_then(OpenAI::new);

  // Build shared application state (in-memory stores, banks, OpenAI client).
  let state = Arc::new(AppState::new(cfg, openai));

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Single source of truth for the listen port; clients must target it.
  let port = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .unwrap_or(DEFAULT_PORT);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizdeck_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
