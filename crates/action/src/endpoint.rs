//! Region-aware endpoint lookup.
//!
//! A destination that serves several data regions declares a closed
//! capability enum (for example "track" and "batch") and an
//! [`EndpointTable`] mapping each capability to per-region base URLs. Every
//! capability must have a [`Region::NorthAmerica`] entry, which is returned
//! whenever the requested region is absent, unknown or not served by that
//! capability.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use url::Url;

/// Data region a destination account lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// `north_america`, the fallback region.
    NorthAmerica,
    /// `europe`.
    Europe,
    /// `dev`, a non-production environment.
    Dev,
}

impl Region {
    /// Every region, fallback first.
    pub const ALL: [Self; 3] = [Self::NorthAmerica, Self::Europe, Self::Dev];

    /// The region used when none (or an unknown one) is requested.
    pub const FALLBACK: Self = Self::NorthAmerica;

    /// Parse an external region identifier. Unknown strings yield `None`.
    ///
    /// ```
    /// use courier_action::endpoint::Region;
    ///
    /// assert_eq!(Region::parse("europe"), Some(Region::Europe));
    /// assert_eq!(Region::parse("mars"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// The wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NorthAmerica => "north_america",
            Self::Europe => "europe",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed set of endpoint kinds a destination talks to.
///
/// Implemented only through [`endpoint_capability!`](crate::endpoint_capability),
/// which derives `ALL`, `ordinal` and `as_str` from one variant list so the
/// three cannot disagree.
pub trait EndpointCapability:
    __private::Sealed + Copy + Eq + fmt::Debug + Send + Sync + 'static
{
    /// Every capability, in ordinal order.
    const ALL: &'static [Self];

    /// Position of `self` in [`ALL`](Self::ALL).
    fn ordinal(self) -> usize;

    /// Name used in error messages and manifests.
    fn as_str(self) -> &'static str;
}

#[doc(hidden)]
pub mod __private {
    pub trait Sealed {}
}

/// Declare an [`EndpointCapability`] enum.
///
/// ```
/// courier_action::endpoint_capability! {
///     /// Ingestion endpoints.
///     pub enum Api {
///         /// One event.
///         Track => "track",
///         /// Many events.
///         Batch => "batch",
///     }
/// }
///
/// use courier_action::endpoint::EndpointCapability;
///
/// assert_eq!(Api::ALL, &[Api::Track, Api::Batch]);
/// assert_eq!(Api::Batch.ordinal(), 1);
/// assert_eq!(Api::Batch.as_str(), "batch");
/// ```
#[macro_export]
macro_rules! endpoint_capability {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $crate::endpoint::__private::Sealed for $name {}

        impl $crate::endpoint::EndpointCapability for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn ordinal(self) -> usize {
                self as usize
            }

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }
        }
    };
}

/// Failure to build an [`EndpointTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EndpointError {
    /// A configured URL does not parse.
    #[error("invalid endpoint URL for `{capability}` in `{region}`: {source}")]
    InvalidUrl {
        /// Capability name.
        capability: &'static str,
        /// Region of the bad entry.
        region: Region,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },

    /// A capability has no `north_america` entry.
    #[error("endpoint `{capability}` has no north_america fallback")]
    MissingFallback {
        /// Capability name.
        capability: &'static str,
    },

    /// `ordinal()` disagrees with the position in `ALL`.
    #[error("endpoint capability `{capability}` reports ordinal {ordinal}, expected {expected}")]
    OrdinalMismatch {
        /// Capability name.
        capability: &'static str,
        /// Reported ordinal.
        ordinal: usize,
        /// Position in `ALL`.
        expected: usize,
    },

    /// An entry names a capability missing from `ALL`.
    #[error("endpoint capability `{capability}` is not listed in ALL")]
    UnlistedCapability {
        /// Capability name.
        capability: &'static str,
    },
}

#[derive(Debug, Clone)]
struct EndpointRow {
    fallback: Url,
    regional: HashMap<Region, Url>,
}

/// Immutable `capability -> region -> url` map with a guaranteed fallback.
#[derive(Debug, Clone)]
pub struct EndpointTable<C> {
    rows: Vec<EndpointRow>,
    _capability: PhantomData<C>,
}

impl<C: EndpointCapability> EndpointTable<C> {
    /// Start building a table.
    pub fn builder() -> EndpointTableBuilder<C> {
        EndpointTableBuilder {
            entries: Vec::new(),
        }
    }

    /// Resolve a URL from an external region identifier.
    ///
    /// `None`, the empty string and unknown identifiers all resolve to the
    /// `north_america` URL of `capability`.
    pub fn resolve(&self, capability: C, region: Option<&str>) -> &Url {
        self.resolve_region(capability, region.and_then(Region::parse))
    }

    /// Resolve a URL for an already-parsed region.
    pub fn resolve_region(&self, capability: C, region: Option<Region>) -> &Url {
        // build() produced one row per entry of ALL.
        let row = &self.rows[capability.ordinal()];
        region
            .and_then(|r| row.regional.get(&r))
            .unwrap_or(&row.fallback)
    }

    /// Regions explicitly configured for `capability`, fallback included.
    pub fn regions(&self, capability: C) -> Vec<Region> {
        let row = &self.rows[capability.ordinal()];
        Region::ALL
            .into_iter()
            .filter(|r| *r == Region::FALLBACK || row.regional.contains_key(r))
            .collect()
    }
}

/// Builder for [`EndpointTable`].
#[derive(Debug)]
pub struct EndpointTableBuilder<C> {
    entries: Vec<(C, Region, String)>,
}

impl<C: EndpointCapability> EndpointTableBuilder<C> {
    /// Add (or replace) the URL for one capability and region.
    pub fn endpoint(mut self, capability: C, region: Region, url: impl Into<String>) -> Self {
        self.entries.push((capability, region, url.into()));
        self
    }

    /// Validate every URL and the fallback invariant.
    pub fn build(self) -> Result<EndpointTable<C>, EndpointError> {
        for (expected, capability) in C::ALL.iter().enumerate() {
            if capability.ordinal() != expected {
                return Err(EndpointError::OrdinalMismatch {
                    capability: capability.as_str(),
                    ordinal: capability.ordinal(),
                    expected,
                });
            }
        }

        let mut fallbacks: Vec<Option<Url>> = vec![None; C::ALL.len()];
        let mut regional: Vec<HashMap<Region, Url>> = vec![HashMap::new(); C::ALL.len()];

        for (capability, region, raw) in self.entries {
            let url = Url::parse(&raw).map_err(|source| EndpointError::InvalidUrl {
                capability: capability.as_str(),
                region,
                source,
            })?;
            let slot = capability.ordinal();
            if C::ALL.get(slot) != Some(&capability) {
                return Err(EndpointError::UnlistedCapability {
                    capability: capability.as_str(),
                });
            }
            if region == Region::FALLBACK {
                fallbacks[slot] = Some(url);
            } else {
                regional[slot].insert(region, url);
            }
        }

        let rows = C::ALL
            .iter()
            .zip(fallbacks)
            .zip(regional)
            .map(|((capability, fallback), regional)| {
                fallback
                    .map(|fallback| EndpointRow { fallback, regional })
                    .ok_or(EndpointError::MissingFallback {
                        capability: capability.as_str(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EndpointTable {
            rows,
            _capability: PhantomData,
        })
    }
}
