//! DeckFrame - parametric steel floor-system analysis
//!
//! A native Rust frame finite element engine for multi-bay steel floors:
//! - Parametric topology generation (column grid, main beams, secondary beams)
//! - 3D Euler-Bernoulli frame elements (12 DOF direct stiffness method)
//! - Distributed-load translation via work-equivalent fixed-end forces
//! - Linear static solve with singular-system detection
//! - Force/moment diagrams sampled along every member
//!
//! ## Example
//! ```rust
//! use deckframe::prelude::*;
//!
//! // Lay out a 12 m x 9 m floor on a 6 m x 4.5 m column grid
//! let layout = FloorLayout::new(12.0, 9.0, 3.5, 6.0, 4.5, BeamDirection::X, 1.5);
//! let framing = FloorFraming::new(
//!     Material::steel(),
//!     Section::wide_flange(0.2032, 0.2034, 0.0110, 0.0072),
//!     Section::wide_flange(0.3034, 0.1654, 0.0102, 0.0060),
//!     Section::wide_flange(0.2032, 0.1332, 0.0078, 0.0057),
//! );
//!
//! // 5 kPa floor pressure
//! let mut model = build_floor_model(&layout, &framing, 5.0e3).unwrap();
//! let results = model.analyze(&AnalysisOptions::default()).unwrap();
//!
//! println!(
//!     "max deflection {:.2} mm at {}",
//!     results.max_deflection.value * 1000.0,
//!     results.max_deflection.node
//! );
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;
pub mod topology;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, AnalysisStatus};
    pub use crate::elements::{Material, Member, MemberKind, Node, Section, Support};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::{DistributedLoad, LocalAxis, NodeLoad};
    pub use crate::model::StructuralModel;
    pub use crate::results::{
        AnalysisResults, DeflectionSummary, ForceDiagram, NodeDisplacement, Reactions,
    };
    pub use crate::topology::{build_floor_model, BeamDirection, FloorFraming, FloorLayout};
}
