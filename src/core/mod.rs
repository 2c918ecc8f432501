//! Core data types: the bounded swipe history and sweep geometry.

pub mod history;
pub mod swipe;

pub use history::History;
pub use swipe::{Swipe, SwipeSample, SwipeSnapshot};
