//! Convenience re-exports for action authors.
//!
//! ```rust
//! use courier_action::prelude::*;
//! ```

pub use crate::context::ExecutionContext;
pub use crate::definition::ActionDefinition;
pub use crate::destination::{DestinationDefinition, DestinationInfo};
pub use crate::endpoint::{EndpointCapability, EndpointTable, Region};
pub use crate::error::{ActionError, IntegrationError, RegistryError, TransportError};
pub use crate::metadata::ActionMetadata;
pub use crate::registry::ActionRegistry;
pub use crate::request::{HttpRequest, HttpResponse, RequestClient};
pub use crate::secret::SecureString;

pub use courier_parameter::collection::ParameterCollection;
pub use courier_parameter::def::ParameterDef;
