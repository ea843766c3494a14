//! Process-wide table of typed, addressable parameters.
//!
//! The [`ParameterStore`] owns every parameter definition and its current
//! value. It lives entirely in the UI domain: definition, mutation, and
//! observer dispatch all happen on the UI thread, and every committed value
//! is published through the [`bridge`](crate::bridge) so the render domain
//! sees it at the next quantum without touching the store.
//!
//! # Example
//!
//! ```
//! use octavelab_core::spec::{GroupSpec, ParameterSpec, TreeSpec};
//! use octavelab_core::store::ParameterStore;
//!
//! static TREE: TreeSpec = TreeSpec::new(&[GroupSpec::new("global", "Global", &[
//!     ParameterSpec::new(1, "octaveShift", "Octave Shift")
//!         .with_range(0.0, 4.0)
//!         .with_default(2.0)
//!         .indexed(&["2 Octaves Up", "1 Octave Up", "Normal", "1 Octave Down", "2 Octaves Down"]),
//! ])]);
//!
//! let (store, reader) = ParameterStore::from_tree(&TREE).unwrap();
//! assert_eq!(store.set_value(1, 1.6).unwrap(), 2.0);
//! assert_eq!(reader.read_latest(1), 2.0);
//! ```

use std::sync::atomic::{AtomicU32, Ordering};

use crate::bridge::{self, BridgeReader, BridgeWriter};
use crate::error::{ConfigError, ConfigResult};
use crate::observer::{ChangeCallback, ObserverHub, ObserverScope, Subscription};
use crate::spec::{ParameterSpec, TreeSpec};
use crate::types::{ParamAddress, ParamValue, MAX_PARAMETERS};

struct ParamEntry {
    spec: ParameterSpec,
    group: &'static str,
    /// Bits of the current committed value.
    value: AtomicU32,
}

impl ParamEntry {
    fn current(&self) -> ParamValue {
        f32::from_bits(self.value.load(Ordering::Relaxed))
    }
}

/// Incremental construction of a [`ParameterStore`].
///
/// Each [`define`](Self::define) registers one parameter and fails fast on a
/// duplicate address or identifier; [`build`](Self::build) seals the set and
/// creates the connected bridge. [`ParameterStore::from_tree`] drives this
/// from a static [`TreeSpec`].
pub struct StoreBuilder {
    defined: Vec<(ParameterSpec, &'static str)>,
}

impl StoreBuilder {
    /// Start with no parameters defined.
    pub fn new() -> Self {
        Self {
            defined: Vec::new(),
        }
    }

    /// Register a parameter under the named group.
    ///
    /// Fails with [`ConfigError::DuplicateAddress`] if the address is taken
    /// anywhere in the store, [`ConfigError::DuplicateIdentifier`] if the
    /// identifier is taken within the same group, and
    /// [`ConfigError::TooManyParameters`] past the bridge capacity.
    pub fn define(&mut self, group: &'static str, spec: ParameterSpec) -> ConfigResult<()> {
        if self.defined.len() >= MAX_PARAMETERS {
            return Err(ConfigError::TooManyParameters {
                declared: self.defined.len() + 1,
            });
        }
        for (existing, existing_group) in &self.defined {
            if existing.address == spec.address {
                return Err(ConfigError::DuplicateAddress(spec.address));
            }
            if *existing_group == group && existing.identifier == spec.identifier {
                return Err(ConfigError::DuplicateIdentifier(spec.identifier));
            }
        }
        self.defined.push((spec, group));
        Ok(())
    }

    /// Seal the definitions and create the store plus the render-domain end
    /// of its bridge.
    pub fn build(self) -> (ParameterStore, BridgeReader) {
        let seed: Vec<(ParamAddress, ParamValue)> = self
            .defined
            .iter()
            .map(|(spec, _)| (spec.address, spec.clamp(spec.default)))
            .collect();
        let (writer, reader) = bridge::channel(&seed);

        let entries = self
            .defined
            .into_iter()
            .map(|(spec, group)| {
                let default = spec.clamp(spec.default);
                ParamEntry {
                    spec,
                    group,
                    value: AtomicU32::new(default.to_bits()),
                }
            })
            .collect();

        (
            ParameterStore {
                entries,
                writer,
                hub: ObserverHub::new(),
            },
            reader,
        )
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner of all parameter definitions and current values.
///
/// Created once at plugin initialization from a static tree; definitions are
/// immutable afterwards, only values change. All mutating operations belong
/// to the UI domain; the render thread reads through the
/// [`BridgeReader`](crate::bridge::BridgeReader) instead.
pub struct ParameterStore {
    entries: Vec<ParamEntry>,
    writer: BridgeWriter,
    hub: ObserverHub,
}

impl ParameterStore {
    /// Build a store (and the render end of its bridge) from a static tree.
    pub fn from_tree(tree: &TreeSpec) -> ConfigResult<(Self, BridgeReader)> {
        let mut builder = StoreBuilder::new();
        for (group, spec) in tree.parameters() {
            builder.define(group.identifier, *spec)?;
        }
        Ok(builder.build())
    }

    /// Commit a new value for an address.
    ///
    /// The value is clamped into the declared range (indexed parameters
    /// round to the nearest valid index), stored atomically, published to
    /// the render bridge, and the address is marked changed for observers.
    /// Returns the value actually stored. Writes to a read-only parameter
    /// are ignored and return the current value.
    ///
    /// Never blocks and never allocates on the common path. Must be called
    /// from the UI domain only.
    pub fn set_value(&self, address: ParamAddress, value: ParamValue) -> ConfigResult<ParamValue> {
        let entry = self.entry(address)?;
        if !entry.spec.flags.is_writable {
            return Ok(entry.current());
        }
        let committed = entry.spec.clamp(value);
        entry.value.store(committed.to_bits(), Ordering::Relaxed);
        self.writer.publish(address, committed);
        self.hub.mark_changed(address);
        Ok(committed)
    }

    /// The current committed value for an address.
    pub fn value(&self, address: ParamAddress) -> ConfigResult<ParamValue> {
        Ok(self.entry(address)?.current())
    }

    /// Reset one parameter to its declared default.
    pub fn reset_to_default(&self, address: ParamAddress) -> ConfigResult<ParamValue> {
        let default = self.entry(address)?.spec.default;
        self.set_value(address, default)
    }

    /// Reset every parameter to its declared default.
    pub fn reset_all_to_defaults(&self) {
        for entry in &self.entries {
            // Addresses come from our own table, so this cannot fail
            let _ = self.set_value(entry.spec.address, entry.spec.default);
        }
    }

    /// The spec for an address, if defined.
    pub fn spec(&self, address: ParamAddress) -> Option<&ParameterSpec> {
        self.entries
            .iter()
            .find(|entry| entry.spec.address == address)
            .map(|entry| &entry.spec)
    }

    /// The display label the current value of an indexed parameter selects.
    pub fn current_label(&self, address: ParamAddress) -> Option<&'static str> {
        let entry = self.entries.iter().find(|e| e.spec.address == address)?;
        entry.spec.label_for(entry.current())
    }

    /// Iterate over `(group identifier, spec)` in definition order.
    pub fn parameters(&self) -> impl Iterator<Item = (&'static str, &ParameterSpec)> {
        self.entries.iter().map(|entry| (entry.group, &entry.spec))
    }

    /// Number of defined parameters.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    // =========================================================================
    // Observer interface
    // =========================================================================

    /// Subscribe to value-changed notifications for one address or a group.
    ///
    /// Notifications are coalesced and delivered on the UI thread during
    /// [`drain_changes`](Self::drain_changes); the callback receives the
    /// changed address and its latest value.
    pub fn subscribe(&self, scope: ObserverScope, callback: ChangeCallback) -> Subscription {
        self.hub.subscribe(scope, callback)
    }

    /// Release a subscription. No-op if it was already released.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.hub.unsubscribe(subscription);
    }

    /// Deliver pending coalesced notifications on the calling (UI) thread.
    pub fn drain_changes(&self) {
        self.hub.drain(|address| {
            self.entries
                .iter()
                .find(|entry| entry.spec.address == address)
                .map(|entry| (entry.current(), entry.group))
        });
    }

    fn entry(&self, address: ParamAddress) -> ConfigResult<&ParamEntry> {
        self.entries
            .iter()
            .find(|entry| entry.spec.address == address)
            .ok_or(ConfigError::UnknownAddress(address))
    }
}
