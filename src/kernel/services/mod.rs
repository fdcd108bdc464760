//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types shared by the engine and its consumers.
//! - `adapters`: OS/runtime specific implementations (IO/async).

pub mod adapters;
pub mod ports;
