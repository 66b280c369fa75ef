pub mod file_provider;
pub mod memory_provider;
pub mod provider;

pub use file_provider::FileMessageStore;
pub use memory_provider::InMemoryMessageStore;
pub use provider::MessageStore;
