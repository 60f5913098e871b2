//! Diagnostics produced alongside an enhancement.
//!
//! `EnhancementReport` captures counts and timings of each stage and the final
//! curve. The [`plot`] submodule is an optional sink rendering that curve as a
//! line graph; it never feeds back into the computation.

pub mod plot;
pub mod report;
pub mod timing;

pub use plot::{
    next_graph_color, reset_graph_color, set_custom_graph_color, CurvePlot, CurvePlotSink,
    CurveSink, GraphColors,
};
pub use report::{EnhancementReport, EvidenceStage, InputDescriptor, RegionStage};
pub use timing::{StageTiming, TimingBreakdown};
