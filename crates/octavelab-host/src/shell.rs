//! The host shell: gestures in, refreshed control state out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use octavelab_core::config::PluginConfig;
use octavelab_core::observer::{ObserverScope, Subscription};
use octavelab_core::store::ParameterStore;
use octavelab_core::types::{ParamAddress, ParamValue};

use crate::status::HostStatus;
use crate::surface::ControlSurface;

/// A user interaction against one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Tap on button `index` of an indexed parameter's grid.
    ButtonTap {
        address: ParamAddress,
        index: usize,
    },
    /// Drag/step on a continuous control to an absolute value.
    SetContinuous {
        address: ParamAddress,
        value: ParamValue,
    },
}

/// Presentation layer binding the parameter store to a control surface.
///
/// The shell translates gestures into store commits, keeps its surface in
/// sync through the store's coalesced change notifications, and displays
/// whatever status the external loader collaborator supplies. It lives
/// entirely in the UI domain and never touches the render thread.
pub struct HostShell {
    store: Arc<ParameterStore>,
    config: &'static PluginConfig,
    surface: ControlSurface,
    status: HostStatus,
    dirty: Arc<AtomicBool>,
    subscriptions: Vec<Subscription>,
}

impl HostShell {
    /// Build a shell over a store, subscribing to every parameter group so
    /// any commit schedules a surface refresh.
    pub fn new(store: Arc<ParameterStore>, config: &'static PluginConfig) -> Self {
        let surface = ControlSurface::from_store(&store);
        let dirty = Arc::new(AtomicBool::new(false));

        let mut groups: Vec<&'static str> = store.parameters().map(|(group, _)| group).collect();
        groups.dedup();
        let subscriptions = groups
            .into_iter()
            .map(|group| {
                let flag = Arc::clone(&dirty);
                store.subscribe(
                    ObserverScope::Group(group),
                    Box::new(move |_, _| {
                        flag.store(true, Ordering::Relaxed);
                    }),
                )
            })
            .collect();

        Self {
            store,
            config,
            surface,
            status: HostStatus::default(),
            dirty,
            subscriptions,
        }
    }

    /// Translate one gesture into a store commit.
    ///
    /// Gestures against unknown addresses are tolerated with a warning; a
    /// stale UI may race a reconfiguration.
    pub fn handle_gesture(&self, gesture: Gesture) {
        let (address, requested) = match gesture {
            Gesture::ButtonTap { address, index } => (address, index as ParamValue),
            Gesture::SetContinuous { address, value } => (address, value),
        };
        match self.store.set_value(address, requested) {
            Ok(committed) => {
                debug!(
                    "gesture committed: address {} -> {} (requested {})",
                    address, committed, requested
                );
            }
            Err(error) => warn!("gesture dropped: {}", error),
        }
    }

    /// Deliver pending change notifications and refresh the surface if
    /// anything changed.
    pub fn refresh(&mut self) {
        self.store.drain_changes();
        if self.dirty.swap(false, Ordering::Relaxed) {
            self.surface.refresh(&self.store);
        }
    }

    /// Record what the loader collaborator reported for the loaded
    /// instance.
    pub fn plugin_loaded(&mut self, status: HostStatus) {
        info!("plugin loaded: {} ({})", status.title, status.message);
        self.status = status;
    }

    /// Current status display state.
    pub fn status(&self) -> &HostStatus {
        &self.status
    }

    /// Current control surface description.
    pub fn surface(&self) -> &ControlSurface {
        &self.surface
    }

    /// Header line: the plugin's display name.
    pub fn header(&self) -> &'static str {
        self.config.name
    }

    /// Version caption, e.g. `v0.1.2`.
    pub fn version_label(&self) -> String {
        format!("v{}", self.config.version)
    }

    /// Release every change subscription this shell holds.
    pub fn disconnect(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            self.store.unsubscribe(&subscription);
        }
    }
}

impl Drop for HostShell {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Control;
    use octavelab_core::spec::{GroupSpec, ParameterSpec, TreeSpec};
    use octavelab_utils::fourcc;

    static TREE: TreeSpec = TreeSpec::new(&[GroupSpec::new("global", "Global", &[
        ParameterSpec::new(1, "octaveShift", "Octave Shift")
            .with_range(0.0, 4.0)
            .with_default(2.0)
            .indexed(&[
                "2 Octaves Up",
                "1 Octave Up",
                "Normal",
                "1 Octave Down",
                "2 Octaves Down",
            ]),
    ])]);

    static CONFIG: PluginConfig =
        PluginConfig::new("Guitar Octave Shifter", fourcc!(b"alab"), fourcc!(b"octv"))
            .with_vendor("AudioLab")
            .with_version("1.2.0");

    fn shell() -> HostShell {
        let (store, _reader) = ParameterStore::from_tree(&TREE).unwrap();
        HostShell::new(Arc::new(store), &CONFIG)
    }

    #[test]
    fn test_tap_commits_and_refresh_updates_selection() {
        let mut shell = shell();
        shell.handle_gesture(Gesture::ButtonTap {
            address: 1,
            index: 4,
        });
        shell.refresh();

        let Some(Control::ButtonGrid { selected, .. }) = shell.surface().control(1) else {
            unreachable!()
        };
        assert_eq!(*selected, Some(4));
    }

    #[test]
    fn test_gesture_against_unknown_address_is_tolerated() {
        let shell = shell();
        // Must not panic; warning only
        shell.handle_gesture(Gesture::SetContinuous {
            address: 99,
            value: 0.5,
        });
    }

    #[test]
    fn test_refresh_without_changes_keeps_surface() {
        let mut shell = shell();
        let before = shell.surface().clone();
        shell.refresh();
        assert_eq!(before, *shell.surface());
    }

    #[test]
    fn test_status_transitions() {
        let mut shell = shell();
        assert_eq!(shell.status().title, "-");

        shell.plugin_loaded(HostStatus {
            title: "Guitar Octave Shifter".to_string(),
            message: "Audio Unit loaded.".to_string(),
            show_audio_controls: true,
            show_midi_controls: false,
        });
        assert!(shell.status().is_loaded());
        assert_eq!(shell.status().title, "Guitar Octave Shifter");
    }

    #[test]
    fn test_header_and_version_come_from_config() {
        let shell = shell();
        assert_eq!(shell.header(), "Guitar Octave Shifter");
        assert_eq!(shell.version_label(), "v1.2.0");
    }

    #[test]
    fn test_disconnected_shell_stops_refreshing() {
        let mut shell = shell();
        shell.disconnect();
        shell.handle_gesture(Gesture::ButtonTap {
            address: 1,
            index: 0,
        });
        shell.refresh();
        // Selection still shows the default; no subscription fired
        let Some(Control::ButtonGrid { selected, .. }) = shell.surface().control(1) else {
            unreachable!()
        };
        assert_eq!(*selected, Some(2));
    }
}
