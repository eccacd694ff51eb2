//! # ResourceOperations Trait
//!
//! The five operation shorthands, provided on top of a single `dispatch` method.
use crate::framework::descriptor::ResourceDescriptor;
use crate::framework::error::PipelineError;
use crate::framework::intent::Operation;
use crate::pipeline::Completion;
use tokio::task::JoinHandle;

/// Handle to a running operation. Resolves once the pipeline run ends.
pub type Dispatched = JoinHandle<Result<Completion, PipelineError>>;

/// Anything that can run an [`Operation`] gets `get`/`list`/`create`/`update`/`delete`
/// for free.
///
/// # Example
///
/// ```rust
/// use remote_resource::clients::{Dispatched, ResourceOperations};
/// use remote_resource::framework::{Intent, Operation, ResourceDescriptor};
/// use std::sync::Mutex;
///
/// // Records intents instead of running them.
/// struct Recorder(Mutex<Vec<Intent>>);
///
/// impl ResourceOperations for Recorder {
///     fn dispatch(&self, operation: Operation) -> Dispatched {
///         self.0.lock().unwrap().push(operation.intent());
///         tokio::spawn(async { Ok(remote_resource::pipeline::Completion::Applied) })
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let recorder = Recorder(Mutex::new(Vec::new()));
///     recorder.list(ResourceDescriptor::new("widgets", "widgets")).await.unwrap().unwrap();
///     recorder.delete(ResourceDescriptor::new("widgets", "widget7").with_id("7"));
///     assert_eq!(*recorder.0.lock().unwrap(), vec![Intent::List, Intent::Delete]);
/// }
/// ```
pub trait ResourceOperations: Send + Sync {
    fn dispatch(&self, operation: Operation) -> Dispatched;

    /// Fetch one item: `GET {prefix}/{path}/{id}`.
    fn get(&self, descriptor: ResourceDescriptor) -> Dispatched {
        self.dispatch(Operation::get(descriptor))
    }

    /// Fetch a collection: `GET {prefix}/{path}`.
    fn list(&self, descriptor: ResourceDescriptor) -> Dispatched {
        self.dispatch(Operation::list(descriptor))
    }

    /// Create an item: `POST {prefix}/{path}`.
    fn create(&self, descriptor: ResourceDescriptor) -> Dispatched {
        self.dispatch(Operation::create(descriptor))
    }

    /// Replace an item: `PUT {prefix}/{path}/{id}`.
    fn update(&self, descriptor: ResourceDescriptor) -> Dispatched {
        self.dispatch(Operation::update(descriptor))
    }

    /// Remove an item: `DELETE {prefix}/{path}/{id}`.
    fn delete(&self, descriptor: ResourceDescriptor) -> Dispatched {
        self.dispatch(Operation::delete(descriptor))
    }
}
