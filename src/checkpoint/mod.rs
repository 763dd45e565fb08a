mod memory;
mod store;

pub use memory::MemorySaver;
pub use store::Checkpointer;
