//! CloudRoyale control panel client
//!
//! This crate drives the CloudRoyale VPS hosting panel the way a browser
//! would: a form login establishes a cookie session, the server list is
//! scraped out of the admin HTML page, and power/create/ssh-key operations
//! are plain form posts. There is no real API underneath; responses the
//! client cannot decode are returned to the caller as raw bodies.
//!
//! # Example
//!
//! ```ignore
//! use cloudroyale_client::{Credentials, SessionClient};
//!
//! let client = SessionClient::new(Credentials::new("username", "password"))?;
//!
//! let outcome = client.login().await?;
//! if !outcome.is_accepted() {
//!     eprintln!("login not confirmed: {:?}", outcome.diagnostic());
//! }
//!
//! for server in client.servers().await? {
//!     println!("{} {} {} online={}", server.id, server.name, server.ip, server.online);
//! }
//! ```

pub mod config;
pub mod error;
pub mod scrape;
pub mod session;

pub use config::ServerConfig;
pub use error::{Result, RoyaleError};
pub use scrape::ServerRecord;
pub use session::{Credentials, LoginOutcome, SessionClient, SessionClientBuilder, DEFAULT_BASE_URL};
