pub mod auth_service;
pub mod client_service;
pub mod inventory_service;
pub mod order_service;

pub use auth_service::*;
pub use client_service::*;
pub use inventory_service::*;
pub use order_service::*;
