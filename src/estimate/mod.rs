//! Per-category estimation strategies, their shared financial math, and the
//! startup-built dispatch table.

pub mod capacity;
pub mod envelope;
pub mod estimator;
pub mod factory;
pub mod format;
pub mod general;
pub mod lighting;

pub use estimator::Estimator;
pub use factory::EstimatorFactory;
