//! # octavelab-core
//!
//! Parameter store and real-time render bridge for the octavelab plugin.
//!
//! The crate splits a plugin instance into two isolated concurrency domains:
//! a cooperative UI domain owning all parameter definitions, mutation, and
//! observer dispatch, and a hard-real-time render domain that reads the
//! latest committed values through a wait-free single-slot-per-parameter
//! channel. No lock is ever held across that boundary.
//!
//! ## Main Types
//!
//! - [`TreeSpec`] / [`GroupSpec`] / [`ParameterSpec`] - static declarative
//!   parameter tree
//! - [`ParameterStore`] - UI-domain owner of definitions and current values
//! - [`BridgeWriter`] / [`BridgeReader`] - the two ends of the lock-free
//!   value channel
//! - [`RenderSnapshot`] - per-quantum copy of all current values
//! - [`ObserverScope`] / [`Subscription`] - coalesced change notifications
//! - [`RenderAlgorithm`] / [`RenderUnit`] - pluggable audio transform and
//!   its real-time driver
//! - [`PluginConfig`] - plugin identity metadata
//! - [`ConfigError`] - setup-time failures

pub mod bridge;
pub mod config;
pub mod error;
pub mod observer;
pub mod render;
pub mod snapshot;
pub mod spec;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use bridge::{channel, BridgeReader, BridgeWriter};
pub use config::PluginConfig;
pub use error::{ConfigError, ConfigResult};
pub use observer::{ChangeCallback, ObserverScope, Subscription};
pub use render::{AudioSetup, PassThrough, RenderAlgorithm, RenderUnit};
pub use snapshot::{RenderSnapshot, SnapshotEntry};
pub use spec::{GroupSpec, ParamFlags, ParameterSpec, TreeSpec, UnitKind};
pub use store::{ParameterStore, StoreBuilder};
pub use types::{ParamAddress, ParamValue, MAX_PARAMETERS};
