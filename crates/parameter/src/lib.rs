//! # Courier Parameter
//!
//! Field schemas for action inputs and the validator that turns a raw event
//! mapping into a typed payload.
//!
//! A [`ParameterCollection`](collection::ParameterCollection) is an ordered
//! set of [`ParameterDef`](def::ParameterDef)s. [`validate`](validate::validate)
//! walks it in declaration order, coercing each present value into its
//! declared kind, enforcing (possibly conditional) requiredness and filling
//! defaults. The first failure short-circuits.

pub mod collection;
pub mod condition;
pub mod def;
pub mod error;
pub mod kind;
pub mod metadata;
pub mod validate;
pub mod validation;
pub mod values;

pub mod prelude {
    pub use crate::collection::ParameterCollection;
    pub use crate::condition::{Condition, Rule, RuleSet};
    pub use crate::def::{ParameterDef, Requiredness};
    pub use crate::error::{SchemaError, ValidationError, ValidationErrorKind};
    pub use crate::kind::ParameterKind;
    pub use crate::metadata::ParameterMetadata;
    pub use crate::validate::validate;
    pub use crate::validation::{RegexPattern, ValidationRule};
    pub use crate::values::ParameterValues;
}
