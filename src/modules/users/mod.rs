//! The users resource.
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: user lifecycle ([`UserService`])
//! - `store.rs`: persistence seam ([`UserStore`]) and list query resolution
//! - `postgres.rs` / `memory.rs`: store implementations
//! - `model.rs`: records and DTOs
//! - `router.rs`: Axum router

pub mod controller;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod router;
pub mod service;
pub mod store;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;
pub use service::UserService;
pub use store::UserStore;
