//! Registration lookup data (provinces, regencies, DLH categories).
//!
//! Loaded once per session store, best-effort. When the backend is
//! unavailable a fixed sample province list stands in so registration forms
//! stay usable.

#[cfg(test)]
#[path = "regions_test.rs"]
mod regions_test;

use crate::net::types::{JenisDlh, Province, Regency};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionState {
    pub provinces: Vec<Province>,
    pub regencies: Vec<Regency>,
    pub jenis_dlhs: Vec<JenisDlh>,
    /// A fetch is in flight.
    pub fetching: bool,
    /// Whether a load attempt has finished (successfully or not).
    pub loaded: bool,
}

/// Stand-in province list used when the region endpoint fails.
#[must_use]
pub fn sample_provinces() -> Vec<Province> {
    [("1", "Jawa Barat"), ("2", "Jawa Tengah"), ("3", "Jawa Timur"), ("4", "DI Yogyakarta")]
        .into_iter()
        .map(|(id, name)| Province { id: id.to_owned(), name: name.to_owned() })
        .collect()
}
