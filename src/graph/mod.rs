mod core;
mod edges;
mod marker;
mod session;

pub use core::{Graph, END, START};
pub use edges::{Condition, Edge};
pub use marker::{Built, NotBuilt};
pub use session::SessionGraph;
