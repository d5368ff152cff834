//! Match driver: alternates turns between two strategies and adjudicates.

mod driver;
mod report;

pub use driver::Match;
pub use report::{MatchReport, Move, Outcome};
