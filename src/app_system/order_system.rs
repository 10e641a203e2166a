use std::sync::Arc;

use tracing::{error, info};

use super::Config;
use crate::actor_framework::{StoreActor, StoreClient};
use crate::clients::{CustomerClient, NotificationClient, OrderClient, ProductClient, UploadClient};
use crate::integrations::{BlobStorage, InMemoryBlobStorage, LogNotifier, Notifier};
use crate::store::Database;

/// The main application system.
///
/// Starts the store actor, wires the clients to it and to the external
/// collaborators, and handles shutdown.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub product_client: ProductClient,
    pub customer_client: CustomerClient,
    pub upload_client: UploadClient,
    pub notification_client: NotificationClient,
    store: StoreClient<Database>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Starts a system with in-memory blob storage and a logging notifier.
    pub fn new(config: &Config) -> Self {
        let blobs = Arc::new(InMemoryBlobStorage::new(&config.uploads));
        Self::with_collaborators(config, blobs, Arc::new(LogNotifier))
    }

    pub fn with_collaborators(config: &Config, blobs: Arc<dyn BlobStorage>, notifier: Arc<dyn Notifier>) -> Self {
        let (store_actor, store) = StoreActor::new(config.store.buffer_size, Database::new());
        let store_handle = tokio::spawn(store_actor.run());
        info!(buffer_size = config.store.buffer_size, "Store actor spawned");

        Self {
            order_client: OrderClient::new(store.clone()),
            product_client: ProductClient::new(store.clone(), blobs.clone()),
            customer_client: CustomerClient::new(store.clone()),
            upload_client: UploadClient::new(blobs),
            notification_client: NotificationClient::new(store.clone(), notifier),
            store,
            handles: vec![store_handle],
        }
    }

    /// Raw access to the store, for reads that no client exposes.
    pub fn store(&self) -> &StoreClient<Database> {
        &self.store
    }

    /// Drops every client, which closes the store channel, then waits for
    /// the actor to drain.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.product_client);
        drop(self.customer_client);
        drop(self.upload_client);
        drop(self.notification_client);
        drop(self.store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
