//! Analysis options and status

use serde::{Deserialize, Serialize};

/// Outcome of an analysis run.
///
/// The orchestrator returns `Err` on any failed stage, so a returned
/// `AnalysisResults` always carries `Solved`; the `Failed` variant exists for
/// consumers that persist or display a status independently of the `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    /// The pipeline completed and the results are real
    Solved,
    /// The pipeline failed at some stage, with the reason
    Failed(String),
}

/// Options for a linear static analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Number of evenly spaced stations sampled along each member for the
    /// internal-force diagrams
    pub stations: usize,
    /// Deflection limit supplied by the caller (e.g. span/360) and echoed in
    /// the max-deflection summary; the engine hard-codes no code limits
    pub deflection_limit: Option<f64>,
    /// Verify global force equilibrium after the solve
    pub check_statics: bool,
    /// Tolerance for the equilibrium check, relative to the total applied
    /// load
    pub equilibrium_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            stations: 21,
            deflection_limit: None,
            check_statics: false,
            equilibrium_tolerance: 1e-6,
        }
    }
}

impl AnalysisOptions {
    /// Set the diagram station count
    pub fn with_stations(mut self, stations: usize) -> Self {
        self.stations = stations.max(2);
        self
    }

    /// Set the deflection limit echoed in the summary
    pub fn with_deflection_limit(mut self, limit: f64) -> Self {
        self.deflection_limit = Some(limit);
        self
    }

    /// Enable the post-solve equilibrium check
    pub fn with_statics_check(mut self) -> Self {
        self.check_statics = true;
        self
    }
}
