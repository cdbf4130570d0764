//! Best-first purchase optimization.
//!
//! The engine decomposes the demand by width (no transition ever mixes
//! widths), then runs a uniform-cost search per width class: states are
//! partial assignments, purchase edges cost the catalog price, reuse edges
//! are free, and the priority order (price, then plank count) makes the
//! first completed state the cheapest plan with the fewest planks.

mod driver;
mod partition;
mod state;

pub use driver::SearchStats;
pub use partition::{plan_purchase, PlanResult};
