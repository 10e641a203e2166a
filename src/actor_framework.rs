use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Failures of the actor plumbing itself, independent of the work being run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped the request")]
    ActorDropped,
}

/// Read-only work executed against the actor's state.
pub type QueryJob<S> = Box<dyn FnOnce(&S) + Send + 'static>;

/// Mutating work executed against the actor's state.
///
/// The job reports whether its changes should be kept; returning `false`
/// makes the actor restore the state it had before the job ran.
pub type TransactionJob<S> = Box<dyn FnOnce(&mut S) -> bool + Send + 'static>;

/// Runs `work` against `state`, restoring the previous state if it fails.
///
/// This is the unit of atomicity for everything the store actor does: either
/// every change made by `work` survives or none does.
pub fn atomically<S, R, E, F>(state: &mut S, work: F) -> Result<R, E>
where
    S: Clone,
    F: FnOnce(&mut S) -> Result<R, E>,
{
    let snapshot = state.clone();
    let result = work(state);
    if result.is_err() {
        *state = snapshot;
    }
    result
}

// =============================================================================
// 2. THE MESSAGES
// =============================================================================

pub enum StoreRequest<S> {
    Query { job: QueryJob<S> },
    Transaction { job: TransactionJob<S> },
}

impl<S> std::fmt::Debug for StoreRequest<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreRequest::Query { .. } => f.write_str("StoreRequest::Query"),
            StoreRequest::Transaction { .. } => f.write_str("StoreRequest::Transaction"),
        }
    }
}

// =============================================================================
// 3. THE ACTOR SERVER
// =============================================================================

/// Owns a piece of state and applies requests to it one at a time.
///
/// Because requests are processed sequentially, a transaction never
/// interleaves with another request and readers never see half-applied work.
pub struct StoreActor<S> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
}

impl<S: Clone + Send + 'static> StoreActor<S> {
    pub fn new(buffer_size: usize, state: S) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, state };
        let client = StoreClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "store_actor", skip(self))]
    pub async fn run(mut self) {
        info!("Store actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Query { job } => job(&self.state),
                StoreRequest::Transaction { job } => {
                    let snapshot = self.state.clone();
                    if !job(&mut self.state) {
                        debug!("Transaction failed, restoring previous state");
                        self.state = snapshot;
                    }
                }
            }
        }
        info!("Store actor stopped");
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

#[derive(Clone)]
pub struct StoreClient<S> {
    sender: mpsc::Sender<StoreRequest<S>>,
}

impl<S: Send + 'static> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>) -> Self {
        Self { sender }
    }

    /// Runs a read against the current state.
    pub async fn query<R, F>(&self, read: F) -> Result<R, FrameworkError>
    where
        R: Send + 'static,
        F: FnOnce(&S) -> R + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        let job: QueryJob<S> = Box::new(move |state| {
            let _ = respond_to.send(read(state));
        });
        self.sender
            .send(StoreRequest::Query { job })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Runs `work` as a single atomic unit. Any `Err` discards every change
    /// `work` made before failing.
    pub async fn transaction<R, E, F>(&self, work: F) -> Result<R, E>
    where
        R: Send + 'static,
        E: From<FrameworkError> + Send + 'static,
        F: FnOnce(&mut S) -> Result<R, E> + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        let job: TransactionJob<S> = Box::new(move |state| {
            let result = work(state);
            let committed = result.is_ok();
            if respond_to.send(result).is_err() {
                warn!("Transaction caller went away before the result was delivered");
            }
            committed
        });
        self.sender
            .send(StoreRequest::Transaction { job })
            .await
            .map_err(|_| E::from(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| E::from(FrameworkError::ActorDropped))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Ledger {
        entries: Vec<String>,
    }

    #[derive(Debug, PartialEq)]
    enum LedgerError {
        Rejected,
        Framework(FrameworkError),
    }

    impl From<FrameworkError> for LedgerError {
        fn from(e: FrameworkError) -> Self {
            LedgerError::Framework(e)
        }
    }

    #[test]
    fn atomically_restores_state_on_error() {
        let mut ledger = Ledger::default();
        let result: Result<(), LedgerError> = atomically(&mut ledger, |l| {
            l.entries.push("first".into());
            Err(LedgerError::Rejected)
        });
        assert_eq!(result, Err(LedgerError::Rejected));
        assert!(ledger.entries.is_empty());

        let kept: Result<usize, LedgerError> = atomically(&mut ledger, |l| {
            l.entries.push("second".into());
            Ok(l.entries.len())
        });
        assert_eq!(kept, Ok(1));
        assert_eq!(ledger.entries, vec!["second".to_string()]);
    }

    #[tokio::test]
    async fn test_store_actor_commits_and_rolls_back() {
        let (actor, client) = StoreActor::new(10, Ledger::default());
        tokio::spawn(actor.run());

        let len: Result<usize, LedgerError> = client
            .transaction(|l: &mut Ledger| {
                l.entries.push("a".into());
                Ok(l.entries.len())
            })
            .await;
        assert_eq!(len, Ok(1));

        let failed: Result<(), LedgerError> = client
            .transaction(|l: &mut Ledger| {
                l.entries.push("b".into());
                l.entries.push("c".into());
                Err(LedgerError::Rejected)
            })
            .await;
        assert_eq!(failed, Err(LedgerError::Rejected));

        let entries = client.query(|l: &Ledger| l.entries.clone()).await.unwrap();
        assert_eq!(entries, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_framework_error() {
        let (actor, client) = StoreActor::new(1, Ledger::default());
        drop(actor);

        let result: Result<(), LedgerError> = client.transaction(|_: &mut Ledger| Ok(())).await;
        assert_eq!(result, Err(LedgerError::Framework(FrameworkError::ActorClosed)));
        assert_eq!(
            client.query(|l: &Ledger| l.entries.len()).await,
            Err(FrameworkError::ActorClosed)
        );
    }
}
