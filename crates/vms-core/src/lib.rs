//! # vms-core
//!
//! Core domain models and ports for View My Startup.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! sort token codec, selection sets, the comparison session state machine,
//! investment form validation and the port traits the backend adapters implement.

pub mod config;
pub mod ids;
pub mod investment;
pub mod ports;
pub mod security;
pub mod selection;
pub mod session;
pub mod sort;
pub mod startup;

// Re-export commonly used types at the crate root
pub use config::{AppConfig, Locale};
pub use ids::{InvestorId, StartupId};
pub use investment::{InvestmentForm, InvestmentRecord, ValidationError};
pub use selection::{SelectionError, SelectionSet, SelectionSnapshot};
pub use session::{ComparisonSessionState, SessionOperation};
pub use sort::{SortDirection, SortToken};
pub use startup::{Category, Page, PageQuery, RankedStartup, Startup};
