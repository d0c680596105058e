//! Pattern-routed CRUD dispatcher.
//!
//! Builds one callable handler per `(role, model, operation)` triple from a
//! list of registered model descriptors, plus the `query` passthrough and the
//! compound `upsert` orchestrator. The dispatch table is computed by a pure
//! builder and installed into a [`MessageBus`] as a separate step, so "what
//! handlers exist" never depends on registration side effects.
//!
//! Persistence is delegated entirely to a [`Backend`] collaborator; the only
//! work done here is reference resolution on the way in and result
//! normalization on the way out.
//!
//! [`Backend`]: crudbus_core::Backend

mod bus;
mod error;
mod handlers;
mod hook;
mod normalizer;
mod pattern;
mod plugin;
mod resolver;
mod table;
mod upsert;

pub use bus::MessageBus;
pub use error::{DispatchError, PluginError};
pub use hook::Hook;
pub use normalizer::normalize;
pub use pattern::Pattern;
pub use plugin::{build_dispatch_table, build_registry, init_plugin, PluginConfig};
pub use resolver::resolve;
pub use table::{handler, DispatchTable, Handler, HandlerFuture, HandlerResult};
