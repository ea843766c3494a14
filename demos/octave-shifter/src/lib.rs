//! Guitar octave shifter built on the octavelab core.
//!
//! This crate declares the plugin's parameter tree and identity, plus the
//! octave-step semantics the render algorithm consumes. The pitch-shifting
//! transform itself is supplied externally as a
//! [`RenderAlgorithm`](octavelab_core::render::RenderAlgorithm)
//! implementation; everything here is the contract around it.

use octavelab_core::spec::{GroupSpec, ParameterSpec, TreeSpec};
use octavelab_core::types::ParamValue;
use octavelab_core::PluginConfig;
use octavelab_utils::fourcc;

/// Stable parameter addresses.
///
/// These are the persisted automation/preset contract; never renumber.
pub mod address {
    use octavelab_core::types::ParamAddress;

    pub const GAIN: ParamAddress = 0;
    pub const OCTAVE_SHIFT: ParamAddress = 1;
}

/// Display labels for the octave steps, in address-index order.
pub const OCTAVE_LABELS: &[&str] = &[
    "2 Octaves Up",
    "1 Octave Up",
    "Normal",
    "1 Octave Down",
    "2 Octaves Down",
];

/// Button-face captions for the octave steps.
pub const OCTAVE_SHORT_LABELS: &[&str] =
    &["2\u{2191}", "1\u{2191}", "N", "1\u{2193}", "2\u{2193}"];

/// The plugin's parameter tree: one global group holding output gain and
/// the octave-shift selector.
pub static PARAMETER_TREE: TreeSpec = TreeSpec::new(&[GroupSpec::new("global", "Global", &[
    ParameterSpec::new(address::GAIN, "gain", "Gain")
        .with_range(0.0, 1.0)
        .with_default(1.0),
    ParameterSpec::new(address::OCTAVE_SHIFT, "octaveShift", "Octave Shift")
        .with_range(0.0, 4.0)
        .with_default(2.0)
        .indexed(OCTAVE_LABELS)
        .with_short_strings(OCTAVE_SHORT_LABELS),
])]);

/// Plugin identity.
pub static CONFIG: PluginConfig =
    PluginConfig::new("Guitar Octave Shifter", fourcc!(b"alab"), fourcc!(b"octv"))
        .with_vendor("AudioLab")
        .with_version(env!("CARGO_PKG_VERSION"));

/// One step of the octave-shift selector.
///
/// The discriminants are the parameter's indexed values; the pitch ratio is
/// the playback-speed factor a shifting algorithm applies for that step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctaveShift {
    TwoOctavesUp = 0,
    OneOctaveUp = 1,
    Normal = 2,
    OneOctaveDown = 3,
    TwoOctavesDown = 4,
}

impl OctaveShift {
    /// All steps, in indexed-value order.
    pub const ALL: [Self; 5] = [
        Self::TwoOctavesUp,
        Self::OneOctaveUp,
        Self::Normal,
        Self::OneOctaveDown,
        Self::TwoOctavesDown,
    ];

    /// The step a committed parameter value selects.
    ///
    /// Values are clamped and rounded the same way the store commits them,
    /// so a raw bridge read maps cleanly.
    pub fn from_value(value: ParamValue) -> Self {
        let index = value.clamp(0.0, 4.0).round() as usize;
        Self::ALL[index]
    }

    /// The indexed parameter value for this step.
    pub const fn value(self) -> ParamValue {
        self as u8 as ParamValue
    }

    /// Playback-speed ratio for this step: 4x reads two octaves up,
    /// quarter speed two octaves down.
    pub const fn pitch_ratio(self) -> f32 {
        match self {
            Self::TwoOctavesUp => 4.0,
            Self::OneOctaveUp => 2.0,
            Self::Normal => 1.0,
            Self::OneOctaveDown => 0.5,
            Self::TwoOctavesDown => 0.25,
        }
    }

    /// Full display label.
    pub const fn label(self) -> &'static str {
        OCTAVE_LABELS[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octavelab_core::render::{AudioSetup, RenderAlgorithm, RenderUnit};
    use octavelab_core::snapshot::RenderSnapshot;
    use octavelab_core::store::ParameterStore;

    #[test]
    fn test_tree_is_well_formed() {
        let (store, _reader) = ParameterStore::from_tree(&PARAMETER_TREE).unwrap();
        assert_eq!(store.count(), 2);
        assert_eq!(
            store.spec(address::OCTAVE_SHIFT).unwrap().value_strings.len(),
            5
        );
    }

    #[test]
    fn test_octave_shift_commit_scenario() {
        let (store, _reader) = ParameterStore::from_tree(&PARAMETER_TREE).unwrap();

        assert_eq!(store.set_value(address::OCTAVE_SHIFT, 4.0).unwrap(), 4.0);
        assert_eq!(
            store.current_label(address::OCTAVE_SHIFT),
            Some("2 Octaves Down")
        );

        assert_eq!(store.set_value(address::OCTAVE_SHIFT, -1.0).unwrap(), 0.0);
        assert_eq!(store.set_value(address::OCTAVE_SHIFT, 1.6).unwrap(), 2.0);
        assert_eq!(store.current_label(address::OCTAVE_SHIFT), Some("Normal"));
    }

    #[test]
    fn test_pitch_ratios_halve_per_octave_down() {
        let ratios: Vec<f32> = OctaveShift::ALL.iter().map(|s| s.pitch_ratio()).collect();
        assert_eq!(ratios, [4.0, 2.0, 1.0, 0.5, 0.25]);
        for pair in ratios.windows(2) {
            assert_eq!(pair[1], pair[0] / 2.0);
        }
    }

    #[test]
    fn test_from_value_clamps_and_rounds() {
        assert_eq!(OctaveShift::from_value(-3.0), OctaveShift::TwoOctavesUp);
        assert_eq!(OctaveShift::from_value(1.6), OctaveShift::Normal);
        assert_eq!(OctaveShift::from_value(9.0), OctaveShift::TwoOctavesDown);
        assert_eq!(OctaveShift::from_value(2.0), OctaveShift::Normal);
    }

    #[test]
    fn test_labels_match_tree_declaration() {
        for step in OctaveShift::ALL {
            assert_eq!(
                PARAMETER_TREE
                    .find(address::OCTAVE_SHIFT)
                    .unwrap()
                    .label_for(step.value()),
                Some(step.label())
            );
        }
    }

    /// Minimal shifting stand-in: applies only the step's gain-independent
    /// ratio bookkeeping so the test can observe what the render domain saw.
    struct RatioProbe {
        last_ratio: f32,
    }

    impl RenderAlgorithm for RatioProbe {
        fn prepare(&mut self, _setup: &AudioSetup) {}

        fn render(
            &mut self,
            snapshot: &RenderSnapshot,
            _input: &[&[f32]],
            _output: &mut [&mut [f32]],
        ) {
            let value = snapshot.value(address::OCTAVE_SHIFT).unwrap_or(2.0);
            self.last_ratio = OctaveShift::from_value(value).pitch_ratio();
        }
    }

    #[test]
    fn test_commit_reaches_render_domain_as_ratio() {
        let (store, reader) = ParameterStore::from_tree(&PARAMETER_TREE).unwrap();
        let mut unit = RenderUnit::new(RatioProbe { last_ratio: 0.0 }, reader);
        unit.prepare(AudioSetup {
            sample_rate: 48_000.0,
            max_frames: 64,
            input_channels: 1,
            output_channels: 1,
        });

        store
            .set_value(address::OCTAVE_SHIFT, OctaveShift::OneOctaveDown.value())
            .unwrap();

        let input = [0.0f32; 64];
        let mut output = [0.0f32; 64];
        unit.render_quantum(&[&input], &mut [&mut output]);

        assert_eq!(unit.latest(address::OCTAVE_SHIFT), 3.0);
        assert_eq!(unit.algorithm().last_ratio, 0.5);
    }
}
