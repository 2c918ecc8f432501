//! Drive control: line centering and crossroad approach detection.

pub mod pid;
pub mod widening;

pub use pid::Pid;
pub use widening::WideningDetector;
