//! Entropy regularized optimal transport between restaurants and users
//!
//! The Sinkhorn solver turns a cost matrix into a transport plan whose rows
//! and columns approximately match the requested marginals. A greedy
//! extractor then derives one user per restaurant from that plan.

mod assignment;
mod config;
mod sinkhorn;

pub use assignment::{Assignment, AssignmentEntry, extract_assignment};
pub use config::SinkhornConfig;
pub use sinkhorn::{TransportPlan, solve_transport};
