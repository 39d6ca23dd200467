//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod clean;
mod generate;
mod list;
mod output;

pub use check::{CheckReport, CheckedFile};
pub use clean::CleanReport;
pub use generate::{GenerateReport, PreviewReport, PreviewedFile};
pub use list::ListReport;
pub use output::{Report, TerminalOutput};
