//! frame_storm library components
//!
//! Beacon flood and deauthentication sessions built on `libdot11`. The binary
//! is a thin clap front end over these modules.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod governor;
pub mod injector;
pub mod rawsocks;
pub mod session;
pub mod stats;
pub mod status;

pub use config::{BeaconConfig, BssidSource, DeauthConfig, DeauthTarget, SsidSource};
pub use error::AttackError;
pub use injector::{FrameInjector, InjectError};
pub use session::{AttackSession, SessionReport, SessionState, StopReason};
