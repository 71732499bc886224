//! # Application Layer
//!
//! Orchestration on top of the domain: session ownership, quote routing,
//! two-phase execution, and the periodic sweep.
//!
//! - [`RfqSessionManager`]: front door owning every live RFQ session
//! - [`ExecutionCoordinator`]: two-phase execute against one quote
//! - [`EngineConfig`]: timing knobs (deadlines, TTLs, retention)

pub mod config;
pub mod coordinator;
pub mod error;
pub mod session;
pub mod session_manager;

pub use config::EngineConfig;
pub use coordinator::ExecutionCoordinator;
pub use error::{EngineError, EngineResult};
pub use session::RfqSession;
pub use session_manager::{RfqSessionManager, SweepReport};
