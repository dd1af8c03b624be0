//! View My Startup application orchestration layer
//!
//! This crate contains the use cases that drive the selection and comparison
//! workflow: the selection store, the comparison session coordinator, the rank
//! query controller, their read-only views, and the investment / catalog use
//! cases.

pub mod deps;
pub mod usecase_factory;
pub mod usecases;

pub use deps::AppDeps;
pub use usecase_factory::UseCases;
