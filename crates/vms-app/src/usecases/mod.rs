//! Use cases.

pub mod catalog;
pub mod compare_session;
pub mod internal;
pub mod investment;
pub mod my_selection;
pub mod rank_query;
pub mod selection_store;
pub mod views;

pub use catalog::{GetStartup, ListStartups};
pub use compare_session::{CompareSessionCoordinator, CompareSessionError, CompareSessionSnapshot};
pub use internal::FetchOutcome;
pub use investment::{InvestmentError, SubmitInvestment};
pub use my_selection::MySelection;
pub use rank_query::{RankQueryController, RankQueryError, RankQuerySnapshot};
pub use selection_store::{SelectionReader, SelectionStore};
pub use views::{ComparisonResultView, RankResultView, ResultRow};
