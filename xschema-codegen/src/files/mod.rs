//! Generated source files, one pair per namespace.

mod tests_rs;
mod types_rs;

pub use tests_rs::TestsRs;
pub use types_rs::TypesRs;
