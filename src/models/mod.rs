pub mod account;
pub mod auth;
pub mod client;
pub mod common;
pub mod order;
pub mod pagination;
pub mod storefront;

pub use account::*;
pub use auth::*;
pub use client::*;
pub use common::*;
pub use order::*;
pub use pagination::*;
pub use storefront::*;
