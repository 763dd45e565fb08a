mod function;
mod node;

pub use function::{ErasedTool, JsonSchema, ToolFunction, ToolSchema};
pub use node::{tools_condition, ToolNode};
