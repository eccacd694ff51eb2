use crate::clients::RemoteResourceClient;
use crate::config::SystemConfig;
use crate::dispatcher::{Dispatcher, Lanes};
use crate::framework::error::TransportError;
use crate::signals::SignalBus;
use crate::store::StoreActor;
use crate::transport::{HttpTransport, Transport};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the synchronization layer.
///
/// `ResourceSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the store actor
/// - **Dependency Wiring**: Sharing one signal bus between the dispatcher (401s)
///   and the pipeline (follow-ups, records), and one set of lanes between every
///   client clone
///
/// # Example
///
/// ```rust
/// use remote_resource::clients::ResourceOperations;
/// use remote_resource::config::SystemConfig;
/// use remote_resource::framework::{mock::MockTransport, transformers, ResourceDescriptor};
/// use remote_resource::lifecycle::ResourceSystem;
/// use remote_resource::transport::Method;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let mock = MockTransport::new();
///     mock.expect(Method::Get, "/qfx-api/v1/widgets").respond(200, "[]");
///
///     let system = ResourceSystem::new(Arc::new(mock.clone()), &SystemConfig::default());
///     let descriptor = ResourceDescriptor::new("widgets", "widgets")
///         .with_transformer(transformers::identity);
///     system.client.list(descriptor).await.unwrap().unwrap();
///
///     let state = system.client.snapshot().await.unwrap();
///     assert_eq!(state.get("widgets"), Some(&serde_json::json!([])));
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct ResourceSystem {
    /// Client for dispatching operations and reading the store
    pub client: RemoteResourceClient,

    /// Task handle of the store actor (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ResourceSystem {
    /// Creates the store actor, signal bus and lanes, and spawns the actor.
    pub fn new(transport: Arc<dyn Transport>, config: &SystemConfig) -> Self {
        let signals = SignalBus::new(config.signal_capacity);
        let lanes = Lanes::new();
        let (store_actor, store) = StoreActor::new(config.store_buffer);
        let dispatcher = Dispatcher::new(transport, config.api_prefix.clone(), signals.clone());

        let store_handle = tokio::spawn(store_actor.run());
        info!(prefix = %config.api_prefix, "Resource system started");

        Self {
            client: RemoteResourceClient::new(dispatcher, lanes, store, signals),
            handles: vec![store_handle],
        }
    }

    /// Same as [`ResourceSystem::new`] with an [`HttpTransport`] pointed at `base_url`.
    pub fn http(base_url: &str, config: &SystemConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(base_url)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes the store channel once every in-flight pipeline
    /// run has finished and every other client clone is gone; the actor then
    /// exits its loop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down resource system...");
        drop(self.client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Resource system shutdown complete.");
        Ok(())
    }
}
