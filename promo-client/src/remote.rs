//! Remote evaluation seam
//!
//! The coordinator only knows this trait. Production uses [`HttpClient`];
//! tests plug in scripted evaluators.

use async_trait::async_trait;
use shared::evaluation::EvaluateResponse;
use shared::models::CartLine;
use std::sync::Arc;

use crate::{ClientResult, HttpClient};

/// Authoritative evaluation of a cart
#[async_trait]
pub trait RemoteEvaluator: Send + Sync {
    async fn evaluate(&self, cart: &[CartLine]) -> ClientResult<EvaluateResponse>;
}

#[async_trait]
impl RemoteEvaluator for HttpClient {
    async fn evaluate(&self, cart: &[CartLine]) -> ClientResult<EvaluateResponse> {
        HttpClient::evaluate(self, cart).await
    }
}

#[async_trait]
impl<T: RemoteEvaluator + ?Sized> RemoteEvaluator for Arc<T> {
    async fn evaluate(&self, cart: &[CartLine]) -> ClientResult<EvaluateResponse> {
        (**self).evaluate(cart).await
    }
}
