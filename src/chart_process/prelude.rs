//! Prelude module for the timeline compiler.
//!
//! You can use `use pms_density::chart_process::prelude::*;` to import all of its types at once.

pub use super::{
    CompiledChart,
    clock::{Clock, STOP_UNITS_PER_MEASURE, measure_seconds},
    compile,
    event::{EventKind, TimelineEvent, expand_measure},
};
