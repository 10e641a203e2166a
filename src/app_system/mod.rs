//! System orchestration, configuration, and the error and payload types
//! shared by every client.

pub mod error;
pub mod order_system;
pub mod payload;
pub mod settings;
pub mod telemetry;

pub use error::*;
pub use order_system::*;
pub use payload::*;
pub use settings::*;
pub use telemetry::*;
