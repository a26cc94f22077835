//! # Fetch Port
//!
//! The outbound port the cache uses to obtain fresh values. Every ledger
//! and agent read enters the cache through an implementation of [`Fetch`].

use async_trait::async_trait;
use shared_types::ClientError;
use std::future::Future;

/// Fetch a fresh value for a key.
#[async_trait]
pub trait Fetch<K, V>: Send + Sync {
    /// Perform one fetch. Suspends the caller; never blocks other work.
    async fn fetch(&self, key: &K) -> Result<V, ClientError>;
}

#[async_trait]
impl<K, V, T> Fetch<K, V> for std::sync::Arc<T>
where
    K: Sync,
    T: Fetch<K, V> + ?Sized,
{
    async fn fetch(&self, key: &K) -> Result<V, ClientError> {
        (**self).fetch(key).await
    }
}

/// Adapter turning an async closure into a [`Fetch`] implementation.
pub struct FnFetcher<F>(pub F);

#[async_trait]
impl<K, V, F, Fut> Fetch<K, V> for FnFetcher<F>
where
    K: Clone + Send + Sync + 'static,
    V: Send + 'static,
    F: Fn(K) -> Fut + Send + Sync,
    Fut: Future<Output = Result<V, ClientError>> + Send,
{
    async fn fetch(&self, key: &K) -> Result<V, ClientError> {
        (self.0)(key.clone()).await
    }
}
