// Service exports
pub mod assistant;
pub mod maps;
pub mod memory;
pub mod postgres;
pub mod store;

pub use assistant::{AssistantClient, AssistantError, AssistantOptions};
pub use maps::{MapsClient, MapsError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use store::{JobStore, Storage, StoreError, UserStore};
