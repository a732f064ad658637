//! Adapters bridging typed action traits to [`ActionHandler`](crate::handler::ActionHandler).

pub mod definition;

pub use definition::DefinitionAdapter;
