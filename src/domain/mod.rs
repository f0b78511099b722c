pub mod build;
pub mod dispatch;
pub mod encode;
pub mod gateway;
pub mod intent;
pub mod result;
pub mod session;
pub mod signature;
pub mod transaction;
pub mod tron;

pub use self::gateway::Gateway;
