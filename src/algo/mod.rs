//! The three labeling algorithms: the plain engine, the graph reduction, and
//! the locality filter.

pub mod psl;
pub use psl::Psl;

pub mod psl_plus;
pub use psl_plus::{PartitionClass, Reduction};

pub mod psl_star;
pub use psl_star::PslStar;
