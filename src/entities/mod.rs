pub mod accounts;
pub mod clients;
pub mod orders;

pub use accounts as account_entity;
pub use clients as client_entity;
pub use orders as order_entity;

pub use accounts::AccountStatus;
pub use orders::OrderStatus;
