//! Promotions client
//!
//! Shows an immediate local preview of every cart change and reconciles it
//! with the authoritative evaluation service.
//!
//! ```ignore
//! let config = ClientConfig::new("http://localhost:3000");
//! let http = HttpClient::new(&config)?;
//! let coordinator = EvaluationCoordinator::new(http, campaigns, &config);
//!
//! let preview = coordinator.update_cart(lines)?;
//! match coordinator.verify().await {
//!     VerifyOutcome::Authoritative(view) => render(&view),
//!     VerifyOutcome::Unverified(view) => render_with_warning(&view),
//!     _ => {}
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod http;
pub mod remote;

pub use config::ClientConfig;
pub use coordinator::{CoordinatedView, EvaluationCoordinator, VerificationStatus, VerifyOutcome};
pub use error::{ClientError, ClientResult};
pub use http::{HealthStatus, HttpClient};
pub use remote::RemoteEvaluator;
