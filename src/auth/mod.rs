//! Static login and cookie sessions.
//!
//! - [`Credentials`]: the single configured username/password pair
//! - [`Sessions`]: in-memory token table, lost on restart
//! - `Auth`: extractor that rejects requests without a live session
mod credentials;
mod session;

pub use credentials::*;
pub use session::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
