//! Building blocks shared by the query use cases.

pub mod latest;

pub use latest::{FetchOutcome, LatestResults, RequestTicket};
