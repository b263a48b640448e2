// ── Access point domain types ──

use serde::Serialize;

/// One access point row from the controller's `show ap summary` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessPointRecord {
    pub name: String,
    /// Radio slot count column.
    pub slots: u8,
    /// AP model code, e.g. `C9120AXI-B`.
    pub model: String,
    /// Ethernet or radio MAC, in whatever notation the controller printed.
    pub mac: String,
}

impl AccessPointRecord {
    pub fn new(
        name: impl Into<String>,
        slots: u8,
        model: impl Into<String>,
        mac: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slots,
            model: model.into(),
            mac: mac.into(),
        }
    }
}

/// Result of one export listing: the raw text plus the rows parsed out of it.
#[derive(Debug, Clone, Serialize)]
pub struct ApSummary {
    #[serde(skip)]
    pub raw: String,
    pub access_points: Vec<AccessPointRecord>,
}

impl ApSummary {
    pub fn names(&self) -> Vec<String> {
        self.access_points.iter().map(|ap| ap.name.clone()).collect()
    }

    /// Number of APs reported by the controller.
    pub fn count(&self) -> usize {
        self.access_points.len()
    }
}
