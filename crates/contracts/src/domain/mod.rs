pub mod common;
pub mod goal;
