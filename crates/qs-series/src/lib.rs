//! qs-series: time-series ingestion, alignment and ratio columns.
//!
//! Pipeline pieces, leaves first:
//! - `ingest`: raw CSV-like bytes into a sorted, finite [`TimeSeries`]
//! - `align`: two series onto their union time grid ([`AlignedEnergyFrame`])
//! - `ratio`: inertial ratio (RI) and work-evolution ratio (RET) columns
//! - `frame`: typed column access shared by detectors and reporting

pub mod align;
pub mod frame;
pub mod ingest;
pub mod ratio;
pub mod series;

pub use align::{AlignedEnergyFrame, align};
pub use frame::{Column, ColumnRef, Frame};
pub use ingest::{CsvLayout, IngestReport, ingest, ingest_reader, ingest_with_report};
pub use ratio::{DENOMINATOR_EPSILON, WorkFrame, compute_ret, compute_ri, inertial_ratio};
pub use series::TimeSeries;
