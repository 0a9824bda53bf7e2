//! Secret record store module.

mod r#trait;
pub use r#trait::SecretStore;

mod memory;
pub use memory::InMemorySecretStore;
