//! Player ratings and scoring tables for a small club.
//!
//! Players carry a single real-valued rating. A completed session is saved
//! as a table of per-player point totals, and applying a table moves every
//! participant's rating by a delta derived from the strength of their
//! opponents and their share of the points.
//!
//! ## Modules
//!
//! - [`rating`]: delta computation and truncating commit
//! - [`store`]: persistence for players and tables ([`store::Memory`], `store::Postgres`)
//! - [`tables`]: table entries and form-sheet assembly
//! - [`players`]: the player record
//! - [`auth`]: static login and cookie sessions
//! - [`signup`]: transient sign-up queue
//! - `server`: actix-web routes
mod error;

pub mod auth;
pub mod players;
pub mod rating;
pub mod signup;
pub mod store;
pub mod tables;

#[cfg(feature = "database")]
pub mod pg;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use error::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Real-valued skill estimate of a player.
pub type Rating = f64;
/// Points scored in a round, and row totals across rounds.
pub type Points = i64;
/// Identifier of a saved table.
pub type TableId = i64;

// ============================================================================
// CONSTANTS
// ============================================================================
/// Rating given to players created without one.
pub const DEFAULT_RATING: Rating = 1000.0;
/// Round columns rendered on a new table form.
pub const ROUNDS: usize = 5;
/// Index of the first round column on the form (`s2`, `s3`, ...).
pub const FIRST_ROUND: usize = 2;
/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_id";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
