mod context;
mod core;
mod function;

pub use context::Context;
pub use core::Node;
pub use function::FunctionNode;
