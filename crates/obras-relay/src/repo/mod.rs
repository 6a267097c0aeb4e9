//! Repository modules for data store operations.

pub mod client;
pub mod contatos;
pub mod gastos;
pub mod obras;

pub use client::{StoreClient, StoreError};
pub use contatos::ContatoRepo;
pub use gastos::GastoRepo;
pub use obras::ObraRepo;
