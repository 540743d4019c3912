//! Persistence Adapters
//!
//! Implementations of the order store and admin repository traits.

pub mod in_memory;
pub mod in_memory_admins;
pub mod timeout;

pub use in_memory::InMemoryOrderStore;
pub use in_memory_admins::InMemoryAdminRepository;
pub use timeout::TimeoutOrderStore;
