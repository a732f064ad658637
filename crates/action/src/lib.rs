//! # Courier Action
//!
//! Definition and execution of destination actions.
//!
//! An action is a typed unit that turns one validated event into exactly
//! one outbound request. This crate defines how actions are described,
//! registered and dispatched, and the port through which they reach the
//! network. It never constructs a transport of its own.
//!
//! ## Core Types
//!
//! - [`ActionDefinition`]: typed action: field schema, settings, `perform`
//! - [`ExecutionContext`]: per-call settings, payload and request capability
//! - [`ActionRegistry`]: `(destination, action)` lookup and `dispatch`
//! - [`DestinationDefinition`]: versioned group of actions
//! - [`RequestClient`]: host-supplied request capability
//! - [`EndpointTable`]: region-aware URL lookup with a fallback region
//! - [`ActionError`]: validation, integration and transport failures
//!
//! ## Dispatch
//!
//! ```text
//! raw event ──validate(fields)──▶ payload ──┐
//! settings ──────deserialize──────────────▶ ExecutionContext ──perform──▶ one request
//! ```
//!
//! Any failure before the request is returned without touching the
//! request capability.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Adapters bridging typed actions to [`ActionHandler`].
#[doc(hidden)]
pub mod adapters;
/// Per-invocation execution context.
pub mod context;
/// The typed action trait.
pub mod definition;
/// Destination grouping and identity.
pub mod destination;
/// Region-aware endpoint tables.
pub mod endpoint;
/// Error taxonomy for registration and dispatch.
pub mod error;
/// Type-erased handler stored in the registry.
#[doc(hidden)]
pub mod handler;
/// Static action metadata.
pub mod metadata;
/// Convenience re-exports for action authors.
pub mod prelude;
/// Action registry and dispatch.
pub mod registry;
/// Request capability port.
pub mod request;
/// Redacted credential strings.
pub mod secret;
/// Recording request capability for tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// ── Public re-exports ───────────────────────────────────────────────────────

pub use context::ExecutionContext;
pub use definition::ActionDefinition;
pub use destination::{DestinationDefinition, DestinationInfo};
pub use endpoint::{EndpointCapability, EndpointError, EndpointTable, Region};
pub use error::{ActionError, IntegrationError, MISCONFIGURED_FIELD, RegistryError, TransportError};
pub use metadata::ActionMetadata;
pub use registry::ActionRegistry;
pub use request::{HttpRequest, HttpResponse, RequestClient};
pub use secret::SecureString;

#[doc(hidden)]
pub use adapters::DefinitionAdapter;
#[doc(hidden)]
pub use handler::ActionHandler;

// Re-export parameter types so action authors can declare fields without
// depending on `courier-parameter` directly.
pub use courier_parameter::collection::ParameterCollection;
pub use courier_parameter::def::ParameterDef;
