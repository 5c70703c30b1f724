//! Evaluation Coordinator
//!
//! Keeps a local preview and an authoritative remote result for one cart.
//!
//! - Every cart change bumps a monotonically increasing version and
//!   publishes a local preview immediately.
//! - `verify` asks the remote evaluator for the current version. A
//!   successful answer replaces the preview and is marked authoritative;
//!   a failure or timeout leaves the preview flagged as unverified.
//! - Answers for an older version are discarded on arrival. The request
//!   itself is not cancelled.
//! - At most one request is in flight per version. Dropping a `verify`
//!   future releases its version and flags the view as unverified.

mod view;

pub use view::{CoordinatedView, VerificationStatus};

use parking_lot::Mutex;
use promo_engine::money::validate_cart;
use promo_engine::{EvaluationContext, evaluate};
use shared::AppResult;
use shared::models::{CampaignSet, CartLine, CartSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::remote::RemoteEvaluator;
use crate::{ClientConfig, ClientError};

/// Outcome of one `verify` call
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    /// The remote answer now backs the view
    Authoritative(CoordinatedView),
    /// The remote check failed; the preview stays, flagged
    Unverified(CoordinatedView),
    /// The cart changed while the request was out; the answer was dropped
    Stale { requested: u64, current: u64 },
    /// A request for this version is already out
    AlreadyInFlight { version: u64 },
}

/// Mutable cart state, guarded by one lock
struct CartState {
    version: u64,
    lines: Vec<CartLine>,
    campaigns: CampaignSet,
    in_flight: Option<u64>,
}

/// Marks one version as in flight; releases it when the `verify` future
/// completes or is dropped
struct InFlight<'a, R> {
    inner: &'a Inner<R>,
    version: u64,
    armed: bool,
}

impl<'a, R> InFlight<'a, R> {
    /// Claim `state.version`, unless a request for it is already out
    fn claim(inner: &'a Inner<R>, state: &mut CartState) -> Option<Self> {
        if state.in_flight == Some(state.version) {
            return None;
        }
        state.in_flight = Some(state.version);
        Some(Self {
            inner,
            version: state.version,
            armed: true,
        })
    }

    /// Release with the state lock already held
    fn release(mut self, state: &mut CartState) {
        if state.in_flight == Some(self.version) {
            state.in_flight = None;
        }
        self.armed = false;
    }
}

impl<R> Drop for InFlight<'_, R> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.inner.state.lock();
        if state.in_flight == Some(self.version) {
            state.in_flight = None;
        }
        if state.version == self.version {
            tracing::warn!(version = self.version, "Remote evaluation abandoned");
            let view = self.inner.views.borrow().clone().unverified("verification cancelled");
            self.inner.views.send_replace(view);
        }
    }
}

struct Inner<R> {
    remote: R,
    verify_timeout: Duration,
    business_tz: chrono_tz::Tz,
    state: Mutex<CartState>,
    views: watch::Sender<CoordinatedView>,
}

/// Coordinates local previews with authoritative remote evaluation for one cart
pub struct EvaluationCoordinator<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for EvaluationCoordinator<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RemoteEvaluator> EvaluationCoordinator<R> {
    pub fn new(remote: R, campaigns: CampaignSet, config: &ClientConfig) -> Self {
        let (views, _) = watch::channel(CoordinatedView::empty());
        Self {
            inner: Arc::new(Inner {
                remote,
                verify_timeout: config.verify_timeout,
                business_tz: config.business_tz,
                state: Mutex::new(CartState {
                    version: 0,
                    lines: vec![],
                    campaigns,
                    in_flight: None,
                }),
                views,
            }),
        }
    }

    /// Watch every published view
    pub fn subscribe(&self) -> watch::Receiver<CoordinatedView> {
        self.inner.views.subscribe()
    }

    /// Latest published view
    pub fn current(&self) -> CoordinatedView {
        self.inner.views.borrow().clone()
    }

    /// Current cart version
    pub fn version(&self) -> u64 {
        self.inner.state.lock().version
    }

    /// Replace the cart, evaluate it locally and publish the preview
    pub fn update_cart(&self, lines: Vec<CartLine>) -> AppResult<CoordinatedView> {
        validate_cart(&lines)?;
        let mut state = self.inner.state.lock();
        state.lines = lines;
        Ok(self.republish(&mut state))
    }

    /// Replace the last-known configuration and re-preview the cart
    pub fn set_campaigns(&self, campaigns: CampaignSet) -> CoordinatedView {
        let mut state = self.inner.state.lock();
        state.campaigns = campaigns;
        self.republish(&mut state)
    }

    /// Bump the version and publish a fresh local preview
    fn republish(&self, state: &mut CartState) -> CoordinatedView {
        state.version += 1;
        let ctx = EvaluationContext::now_in(self.inner.business_tz);
        let result = evaluate(&CartSnapshot::new(state.lines.clone()), &state.campaigns, &ctx);
        let view = CoordinatedView::preview(state.version, result);

        tracing::debug!(version = view.version, cart_total = %view.cart_total, "Preview published");
        self.inner.views.send_replace(view.clone());
        view
    }

    /// Ask the remote evaluator about the current cart version
    pub async fn verify(&self) -> VerifyOutcome {
        let (guard, lines) = {
            let mut state = self.inner.state.lock();
            let Some(guard) = InFlight::claim(&self.inner, &mut state) else {
                return VerifyOutcome::AlreadyInFlight {
                    version: state.version,
                };
            };
            (guard, state.lines.clone())
        };
        let version = guard.version;

        let timeout = self.inner.verify_timeout;
        let answer = match tokio::time::timeout(timeout, self.inner.remote.evaluate(&lines)).await {
            Ok(answer) => answer,
            Err(_) => Err(ClientError::Timeout(timeout)),
        };

        let mut state = self.inner.state.lock();
        guard.release(&mut state);
        if state.version != version {
            tracing::debug!(
                requested = version,
                current = state.version,
                "Discarding stale remote evaluation"
            );
            return VerifyOutcome::Stale {
                requested: version,
                current: state.version,
            };
        }

        let current = self.inner.views.borrow().clone();
        let outcome = match answer {
            Ok(response) => {
                tracing::info!(
                    version,
                    cart_total = %response.cart_total,
                    points = response.points_earned,
                    "Authoritative evaluation received"
                );
                VerifyOutcome::Authoritative(current.authoritative(response))
            }
            Err(e) => {
                tracing::warn!(version, code = %e.code(), "Remote evaluation failed: {}", e);
                VerifyOutcome::Unverified(current.unverified(e.to_string()))
            }
        };

        if let VerifyOutcome::Authoritative(view) | VerifyOutcome::Unverified(view) = &outcome {
            self.inner.views.send_replace(view.clone());
        }
        drop(state);
        outcome
    }

    /// Re-run the remote check after a failure
    pub async fn retry(&self) -> VerifyOutcome {
        self.verify().await
    }
}

impl<R: RemoteEvaluator + 'static> EvaluationCoordinator<R> {
    /// Update the cart and verify it on a background task
    pub fn submit(&self, lines: Vec<CartLine>) -> AppResult<CoordinatedView> {
        let view = self.update_cart(lines)?;
        let coordinator = self.clone();
        tokio::spawn(async move {
            coordinator.verify().await;
        });
        Ok(view)
    }
}
