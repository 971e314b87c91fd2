//! Result persistence for verification runs.
//!
//! Every run produces exactly two artifacts, written once at run end:
//! - `<stem>.csv` with one `Clock Cycle,Probability` row per sample
//! - `<stem>.time.txt` with the run log and total elapsed time
//!
//! The stem is derived from the run configuration only, so repeating a run
//! overwrites its previous artifacts.

mod csv;
mod naming;
mod sink;
mod timing;

pub use csv::{parse_timeline_csv, read_timeline_csv, write_timeline_csv, CSV_HEADER};
pub use naming::ArtifactNames;
pub use sink::{ArtifactPaths, ResultSink, SinkError, SinkResult};
pub use timing::format_elapsed;
