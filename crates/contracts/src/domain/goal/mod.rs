pub mod aggregate;
pub mod deadline;
pub mod stats;
