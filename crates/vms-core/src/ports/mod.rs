//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The backend service is opaque to the
//! core: every remote operation the selection and comparison workflow needs is
//! expressed here as a request/response method.

pub mod catalog;
pub mod comparison;
pub mod errors;
pub mod investment;
pub mod rank;
pub mod selection;

pub use catalog::StartupCatalogPort;
pub use comparison::ComparisonPort;
pub use errors::{BackendError, BackendOperation};
pub use investment::InvestmentPort;
pub use rank::RankPort;
pub use selection::SelectionPort;
