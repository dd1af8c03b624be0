//! Investment submission use case.

mod submit_investment;

pub use submit_investment::{InvestmentError, SubmitInvestment};
