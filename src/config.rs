//! Application configuration constants.
//!
//! Centralizes every tunable: server binding, session expiry, per-type
//! sample sizes and the completion credits for ungraded exercise types.

use serde::Deserialize;

// ==================== Server Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
  server: Option<ServerConfig>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
  addr: Option<String>,
  port: Option<u16>,
}

/// Default server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 3000;

/// Resolve the bind address with priority: config.toml > env > default
pub fn server_bind_addr() -> String {
  // Load .env file if present
  let _ = dotenvy::dotenv();

  // Priority 1: config.toml [server]
  if let Ok(contents) = std::fs::read_to_string("config.toml") {
    if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
      if let Some(server) = config.server {
        let addr = server.addr.unwrap_or_else(|| SERVER_ADDR.to_string());
        let port = server.port.unwrap_or(SERVER_PORT);
        tracing::info!("Using server address from config.toml: {}:{}", addr, port);
        return format!("{}:{}", addr, port);
      }
    }
  }

  // Priority 2: GOETHE_TRAINER_PORT env
  if let Ok(port) = std::env::var("GOETHE_TRAINER_PORT") {
    tracing::info!("Using server port from GOETHE_TRAINER_PORT env: {}", port);
    return format!("{}:{}", SERVER_ADDR, port);
  }

  format!("{}:{}", SERVER_ADDR, SERVER_PORT)
}

// ==================== Session Configuration ====================

/// Session expiration time in hours
pub const SESSION_EXPIRY_HOURS: i64 = 1;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

// ==================== Exercise Configuration ====================

use crate::domain::ExerciseType;

/// Items sampled per vocabulary or grammar session
pub const QUIZ_SAMPLE_COUNT: usize = 30;

/// Words sampled per pronunciation session
pub const PRONUNCIATION_SAMPLE_COUNT: usize = 10;

/// Number of items drawn for one exercise session. Reading, listening and
/// writing pin a single passage/prompt; its embedded questions come with it.
pub fn sample_count(exercise_type: ExerciseType) -> usize {
  match exercise_type {
    ExerciseType::Reading | ExerciseType::Listening | ExerciseType::Writing => 1,
    ExerciseType::Pronunciation => PRONUNCIATION_SAMPLE_COUNT,
    ExerciseType::Grammar | ExerciseType::Vocabulary => QUIZ_SAMPLE_COUNT,
  }
}

// ==================== Scoring Configuration ====================

/// Progress credit for a non-empty writing submission
pub const WRITING_COMPLETION_CREDIT: f64 = 1.0;

/// Progress credit for marking a pronunciation set as practiced
pub const PRONUNCIATION_COMPLETION_CREDIT: f64 = 0.5;

/// Level progress accumulates fractional exercise scores; the display
/// scales it by this factor and caps at 100%.
pub const PROGRESS_DISPLAY_SCALE: f64 = 10.0;

/// Scale an accumulated ledger value to a display percentage.
pub fn progress_percent(accumulated: f64) -> f64 {
  (accumulated * PROGRESS_DISPLAY_SCALE).min(100.0)
}
