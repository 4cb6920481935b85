//! Grid model, input protocol and step-wise depth-first search behind the
//! DFS visualizer.

pub use error::*;
pub use grid::*;
pub use input::*;
pub use session::*;
pub use traversal::*;
pub use types::*;

mod error;
mod grid;
mod input;
mod session;
mod traversal;
mod types;
