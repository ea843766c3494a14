//! Declarative parameter tree specification.
//!
//! This module provides the static specification types a plugin uses to
//! declare its parameters: [`ParameterSpec`] for a single parameter,
//! [`GroupSpec`] for a named ordered collection, and [`TreeSpec`] for the
//! whole tree. All constructors are `const`, so a plugin's tree is plain
//! static data:
//!
//! ```
//! use octavelab_core::spec::{GroupSpec, ParameterSpec, TreeSpec};
//!
//! static TREE: TreeSpec = TreeSpec::new(&[GroupSpec::new("global", "Global", &[
//!     ParameterSpec::new(0, "gain", "Gain")
//!         .with_range(0.0, 1.0)
//!         .with_default(1.0),
//! ])]);
//!
//! assert_eq!(TREE.parameter_count(), 1);
//! ```
//!
//! Addresses and identifiers declared here are the persisted contract that
//! host automation and preset files rely on; they must stay stable across
//! plugin versions.

use crate::types::{ParamAddress, ParamValue};

/// How a parameter's value domain should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitKind {
    /// Continuous value anywhere in `[min, max]`.
    #[default]
    Generic,
    /// Discrete value selecting one of an ordered list of labels.
    /// Valid values are the integers `[min, max]`; committed values are
    /// rounded to the nearest index.
    Indexed,
}

/// Read/write capability flags for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags {
    /// Value can be read by the host and UI.
    pub is_readable: bool,
    /// Value can be written by the host and UI.
    pub is_writable: bool,
}

impl ParamFlags {
    /// Readable and writable, the default for ordinary control parameters.
    pub const fn read_write() -> Self {
        Self {
            is_readable: true,
            is_writable: true,
        }
    }

    /// Readable only (display/meter parameters).
    pub const fn read_only() -> Self {
        Self {
            is_readable: true,
            is_writable: false,
        }
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::read_write()
    }
}

/// Static specification of a single parameter.
///
/// Built with const builder methods and collected into a [`GroupSpec`].
/// Immutable; the runtime current value lives in the
/// [`ParameterStore`](crate::store::ParameterStore).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    /// Stable integer address (the render thread's key).
    pub address: ParamAddress,
    /// Stable string identifier (the preset file's key).
    pub identifier: &'static str,
    /// Human-readable display name.
    pub name: &'static str,
    /// Value domain interpretation.
    pub unit: UnitKind,
    /// Inclusive lower bound.
    pub min: ParamValue,
    /// Inclusive upper bound.
    pub max: ParamValue,
    /// Default value, used at startup and by reset operations.
    pub default: ParamValue,
    /// Ordered display labels for indexed parameters. Empty for continuous.
    pub value_strings: &'static [&'static str],
    /// Abbreviated labels for constrained UIs. Empty = fall back to
    /// `value_strings`.
    pub short_value_strings: &'static [&'static str],
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParameterSpec {
    /// Create a continuous read/write parameter with range `[0, 1]` and
    /// default `0`.
    pub const fn new(
        address: ParamAddress,
        identifier: &'static str,
        name: &'static str,
    ) -> Self {
        Self {
            address,
            identifier,
            name,
            unit: UnitKind::Generic,
            min: 0.0,
            max: 1.0,
            default: 0.0,
            value_strings: &[],
            short_value_strings: &[],
            flags: ParamFlags::read_write(),
        }
    }

    /// Set the closed value range.
    pub const fn with_range(mut self, min: ParamValue, max: ParamValue) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the default value.
    pub const fn with_default(mut self, default: ParamValue) -> Self {
        self.default = default;
        self
    }

    /// Mark the parameter as indexed and attach its ordered display labels.
    pub const fn indexed(mut self, value_strings: &'static [&'static str]) -> Self {
        self.unit = UnitKind::Indexed;
        self.value_strings = value_strings;
        self
    }

    /// Attach abbreviated labels for constrained UIs (button captions).
    pub const fn with_short_strings(mut self, short: &'static [&'static str]) -> Self {
        self.short_value_strings = short;
        self
    }

    /// Set capability flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamp a requested value into the declared range, rounding indexed
    /// parameters to the nearest valid index (half rounds away from zero).
    ///
    /// This is the single place commit semantics live: out-of-range input is
    /// never an error, it lands on the nearest bound.
    pub fn clamp(&self, value: ParamValue) -> ParamValue {
        let clamped = value.clamp(self.min, self.max);
        match self.unit {
            UnitKind::Generic => clamped,
            UnitKind::Indexed => clamped.round(),
        }
    }

    /// The display label for a value of an indexed parameter.
    ///
    /// Returns `None` for continuous parameters or values outside the label
    /// list.
    pub fn label_for(&self, value: ParamValue) -> Option<&'static str> {
        self.index_of(value)
            .and_then(|index| self.value_strings.get(index).copied())
    }

    /// The abbreviated label for a value, falling back to the full label.
    pub fn short_label_for(&self, value: ParamValue) -> Option<&'static str> {
        let index = self.index_of(value)?;
        self.short_value_strings
            .get(index)
            .copied()
            .or_else(|| self.value_strings.get(index).copied())
    }

    /// The label index a value selects, for indexed parameters.
    pub fn index_of(&self, value: ParamValue) -> Option<usize> {
        if self.unit != UnitKind::Indexed {
            return None;
        }
        let rounded = value.round();
        if rounded < 0.0 {
            return None;
        }
        Some(rounded as usize)
    }
}

/// Named, ordered collection of parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSpec {
    /// Stable group identifier (unique within its parent).
    pub identifier: &'static str,
    /// Human-readable group name.
    pub name: &'static str,
    /// The group's parameters, in declaration order.
    pub parameters: &'static [ParameterSpec],
}

impl GroupSpec {
    /// Create a new group.
    pub const fn new(
        identifier: &'static str,
        name: &'static str,
        parameters: &'static [ParameterSpec],
    ) -> Self {
        Self {
            identifier,
            name,
            parameters,
        }
    }
}

/// The complete static parameter tree of a plugin instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSpec {
    /// Top-level groups, in declaration order.
    pub groups: &'static [GroupSpec],
}

impl TreeSpec {
    /// Create a new tree.
    pub const fn new(groups: &'static [GroupSpec]) -> Self {
        Self { groups }
    }

    /// Total number of parameters across all groups.
    pub fn parameter_count(&self) -> usize {
        self.groups.iter().map(|group| group.parameters.len()).sum()
    }

    /// Iterate over every parameter paired with its owning group.
    pub fn parameters(&self) -> impl Iterator<Item = (&'static GroupSpec, &'static ParameterSpec)> {
        self.groups
            .iter()
            .flat_map(|group| group.parameters.iter().map(move |spec| (group, spec)))
    }

    /// Find a parameter spec by address.
    pub fn find(&self, address: ParamAddress) -> Option<&'static ParameterSpec> {
        self.parameters()
            .map(|(_, spec)| spec)
            .find(|spec| spec.address == address)
    }
}
