//! Toolkit-agnostic control surface model.
//!
//! The shell does not draw anything itself; it maintains a description of
//! the controls a UI toolkit should render: one control per parameter, a
//! button grid for indexed parameters and a generic continuous control
//! otherwise. An embedder maps this model to actual widgets and feeds
//! gestures back through [`HostShell`](crate::shell::HostShell).

use octavelab_core::spec::UnitKind;
use octavelab_core::store::ParameterStore;
use octavelab_core::types::{ParamAddress, ParamValue};

/// One button in an indexed parameter's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonModel {
    /// The index this button commits when tapped.
    pub index: usize,
    /// Abbreviated caption shown on the button face.
    pub short_caption: &'static str,
    /// Full caption shown beneath it.
    pub caption: &'static str,
}

/// A renderable control bound to one parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Button grid for an indexed parameter; `selected` highlights the
    /// button matching the current value.
    ButtonGrid {
        address: ParamAddress,
        name: &'static str,
        buttons: Vec<ButtonModel>,
        selected: Option<usize>,
    },
    /// Generic continuous control (slider/knob).
    Continuous {
        address: ParamAddress,
        name: &'static str,
        min: ParamValue,
        max: ParamValue,
        value: ParamValue,
    },
}

impl Control {
    /// The parameter address this control is bound to.
    pub fn address(&self) -> ParamAddress {
        match self {
            Self::ButtonGrid { address, .. } | Self::Continuous { address, .. } => *address,
        }
    }
}

/// The full set of controls for a plugin instance, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlSurface {
    controls: Vec<Control>,
}

impl ControlSurface {
    /// Build one control per parameter from the store's definitions and
    /// current values.
    pub fn from_store(store: &ParameterStore) -> Self {
        let mut controls = Vec::with_capacity(store.count());
        for (_, spec) in store.parameters() {
            let value = store.value(spec.address).unwrap_or(spec.default);
            let control = match spec.unit {
                UnitKind::Indexed => Control::ButtonGrid {
                    address: spec.address,
                    name: spec.name,
                    buttons: spec
                        .value_strings
                        .iter()
                        .enumerate()
                        .map(|(index, caption)| ButtonModel {
                            index,
                            short_caption: spec
                                .short_value_strings
                                .get(index)
                                .copied()
                                .unwrap_or(caption),
                            caption,
                        })
                        .collect(),
                    selected: spec.index_of(value),
                },
                UnitKind::Generic => Control::Continuous {
                    address: spec.address,
                    name: spec.name,
                    min: spec.min,
                    max: spec.max,
                    value,
                },
            };
            controls.push(control);
        }
        Self { controls }
    }

    /// Update selection/value state from the store's current values,
    /// keeping the control structure.
    pub fn refresh(&mut self, store: &ParameterStore) {
        for control in &mut self.controls {
            let address = control.address();
            let Ok(current) = store.value(address) else {
                continue;
            };
            match control {
                Control::ButtonGrid { selected, .. } => {
                    *selected = store.spec(address).and_then(|spec| spec.index_of(current));
                }
                Control::Continuous { value, .. } => *value = current,
            }
        }
    }

    /// All controls, in declaration order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// The control bound to an address, if any.
    pub fn control(&self, address: ParamAddress) -> Option<&Control> {
        self.controls
            .iter()
            .find(|control| control.address() == address)
    }
}
