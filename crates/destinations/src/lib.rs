//! # Courier Destinations
//!
//! Built-in destinations, ready to register:
//!
//! - [`facebook_conversions`]: `search` and `purchase` server events
//! - [`gainsight_px`]: `track` and `batch` with regional endpoints
//!
//! ```rust
//! let registry = courier_destinations::registry().unwrap();
//! assert!(registry.contains("facebook-conversions-api", "search"));
//! assert!(registry.contains("gainsight-px-cloud-action", "batch"));
//! ```

#![forbid(unsafe_code)]

pub mod facebook_conversions;
pub mod gainsight_px;

use courier_action::{ActionRegistry, DestinationDefinition, RegistryError};

/// Every built-in destination.
pub fn all() -> Result<Vec<DestinationDefinition>, RegistryError> {
    Ok(vec![
        facebook_conversions::destination()?,
        gainsight_px::destination()?,
    ])
}

/// A registry holding every built-in destination.
pub fn registry() -> Result<ActionRegistry, RegistryError> {
    let mut registry = ActionRegistry::new();
    for destination in all()? {
        registry.register_destination(destination)?;
    }
    Ok(registry)
}
