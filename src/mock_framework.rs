//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_store`] to get a client and a receiver.
//! Then use [`expect_query`] or [`expect_transaction`] to take the next
//! request and decide what happens to it: run it against a local state, or
//! drop it to simulate a store that went away mid-request.

use crate::actor_framework::{QueryJob, StoreClient, StoreRequest, TransactionJob};
use tokio::sync::mpsc;

/// Creates a mock store client and a receiver for asserting requests.
///
/// No actor is spawned; the test owns the receiving end and answers
/// requests itself, which makes failures deterministic.
pub fn create_mock_store<S: Send + 'static>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Query request
pub async fn expect_query<S>(receiver: &mut mpsc::Receiver<StoreRequest<S>>) -> Option<QueryJob<S>> {
    match receiver.recv().await {
        Some(StoreRequest::Query { job }) => Some(job),
        _ => None,
    }
}

/// Helper to verify that the next message is a Transaction request
pub async fn expect_transaction<S>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<TransactionJob<S>> {
    match receiver.recv().await {
        Some(StoreRequest::Transaction { job }) => Some(job),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;

    #[tokio::test]
    async fn test_mock_store() {
        let (client, mut receiver) = create_mock_store::<Vec<u32>>(10);

        let task = tokio::spawn(async move {
            client
                .transaction(|v: &mut Vec<u32>| -> Result<usize, FrameworkError> {
                    v.push(7);
                    Ok(v.len())
                })
                .await
        });

        let job = expect_transaction(&mut receiver).await.expect("Expected Transaction request");
        let mut state = vec![1, 2];
        assert!(job(&mut state));
        assert_eq!(state, vec![1, 2, 7]);

        assert_eq!(task.await.unwrap(), Ok(3));
    }

    #[tokio::test]
    async fn test_dropped_request_surfaces_as_framework_error() {
        let (client, mut receiver) = create_mock_store::<Vec<u32>>(10);

        let task = tokio::spawn(async move { client.query(|v: &Vec<u32>| v.len()).await });

        let job = expect_query(&mut receiver).await.expect("Expected Query request");
        drop(job);

        assert_eq!(task.await.unwrap(), Err(FrameworkError::ActorDropped));
    }
}
