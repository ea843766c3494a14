//! Render-domain interface: the pluggable algorithm and its driver.
//!
//! The actual pitch-shifting transform is externally specified; this module
//! only fixes its contract. A [`RenderAlgorithm`] consumes the latest
//! [`RenderSnapshot`] and audio frames; the [`RenderUnit`] is the object the
//! real-time host drives once per quantum, and the only place the
//! [`BridgeReader`] is consumed.
//!
//! Everything on the `render_quantum` path is allocation-free and wait-free:
//! it must finish before the next hardware callback.

use crate::bridge::BridgeReader;
use crate::snapshot::RenderSnapshot;

/// Audio configuration handed to the render domain before processing starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSetup {
    /// Samples per second.
    pub sample_rate: f64,
    /// Upper bound on frames per render quantum.
    pub max_frames: usize,
    /// Input channel count.
    pub input_channels: usize,
    /// Output channel count.
    pub output_channels: usize,
}

/// The pluggable audio transform.
///
/// Implementations may allocate and precompute in [`prepare`](Self::prepare);
/// [`render`](Self::render) runs under the real-time deadline and must not
/// block or allocate. Parameter state arrives solely through the snapshot;
/// algorithms never reach back into the store.
pub trait RenderAlgorithm: Send {
    /// Called from the non-real-time side before processing starts, and
    /// again whenever the audio configuration changes.
    fn prepare(&mut self, setup: &AudioSetup);

    /// Drop any buffered audio state (e.g. on transport relocation).
    fn reset(&mut self) {}

    /// Process one render quantum. `input` and `output` hold one slice per
    /// channel, all of equal frame length, at most `max_frames` long.
    fn render(
        &mut self,
        snapshot: &RenderSnapshot,
        input: &[&[f32]],
        output: &mut [&mut [f32]],
    );
}

/// Transform that copies input to output untouched.
///
/// Stands in wherever a real algorithm is not wired yet, and carries the
/// bypass/wiring tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl RenderAlgorithm for PassThrough {
    fn prepare(&mut self, _setup: &AudioSetup) {}

    fn render(
        &mut self,
        _snapshot: &RenderSnapshot,
        input: &[&[f32]],
        output: &mut [&mut [f32]],
    ) {
        copy_frames(input, output);
    }
}

fn copy_frames(input: &[&[f32]], output: &mut [&mut [f32]]) {
    for (channel, out) in output.iter_mut().enumerate() {
        match input.get(channel) {
            Some(source) => out.copy_from_slice(source),
            None => out.fill(0.0),
        }
    }
}

/// Driver for one plugin instance's render domain.
///
/// Owns the algorithm, the bridge reader, and a reusable snapshot. The
/// external render host calls [`render_quantum`](Self::render_quantum) on
/// the real-time clock; the unit refreshes the snapshot wait-free and hands
/// it to the algorithm.
pub struct RenderUnit<A: RenderAlgorithm> {
    algorithm: A,
    reader: BridgeReader,
    snapshot: RenderSnapshot,
    setup: Option<AudioSetup>,
    bypassed: bool,
}

impl<A: RenderAlgorithm> RenderUnit<A> {
    /// Pair an algorithm with the render end of a store's bridge.
    pub fn new(algorithm: A, reader: BridgeReader) -> Self {
        Self {
            algorithm,
            reader,
            snapshot: RenderSnapshot::empty(),
            setup: None,
            bypassed: false,
        }
    }

    /// Configure for processing. Non-real-time; may allocate inside the
    /// algorithm.
    pub fn prepare(&mut self, setup: AudioSetup) {
        self.setup = Some(setup);
        self.algorithm.prepare(&setup);
    }

    /// Release the audio configuration and drop buffered state.
    pub fn unprepare(&mut self) {
        self.setup = None;
        self.algorithm.reset();
    }

    /// The active audio configuration, if prepared.
    pub fn setup(&self) -> Option<&AudioSetup> {
        self.setup.as_ref()
    }

    /// Upper bound on frames per quantum, once prepared.
    pub fn max_frames(&self) -> Option<usize> {
        self.setup.map(|setup| setup.max_frames)
    }

    /// Whether the unit is currently bypassed.
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Toggle bypass. While bypassed, input is copied straight to output
    /// and the algorithm is not invoked.
    pub fn set_bypassed(&mut self, bypassed: bool) {
        self.bypassed = bypassed;
    }

    /// Process one render quantum under the real-time deadline.
    ///
    /// Wait-free with respect to the UI domain: the only shared state
    /// touched is the bridge's atomic slots.
    pub fn render_quantum(&mut self, input: &[&[f32]], output: &mut [&mut [f32]]) {
        debug_assert!(self.setup.is_some(), "render_quantum before prepare");
        if self.bypassed {
            copy_frames(input, output);
            return;
        }
        self.reader.read_into(&mut self.snapshot);
        self.algorithm.render(&self.snapshot, input, output);
    }

    /// Read one parameter's latest committed value directly.
    pub fn latest(&self, address: crate::types::ParamAddress) -> crate::types::ParamValue {
        self.reader.read_latest(address)
    }

    /// The wrapped algorithm.
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Mutable access to the wrapped algorithm (non-real-time side only).
    pub fn algorithm_mut(&mut self) -> &mut A {
        &mut self.algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge;

    const SETUP: AudioSetup = AudioSetup {
        sample_rate: 48_000.0,
        max_frames: 512,
        input_channels: 1,
        output_channels: 1,
    };

    /// Records the octave-shift value it saw on each call.
    struct Probe {
        seen: Vec<f32>,
    }

    impl RenderAlgorithm for Probe {
        fn prepare(&mut self, _setup: &AudioSetup) {}

        fn render(
            &mut self,
            snapshot: &RenderSnapshot,
            _input: &[&[f32]],
            _output: &mut [&mut [f32]],
        ) {
            self.seen.push(snapshot.value(1).unwrap());
        }
    }

    #[test]
    fn test_passthrough_copies_input() {
        let (_writer, reader) = bridge::channel(&[]);
        let mut unit = RenderUnit::new(PassThrough, reader);
        unit.prepare(SETUP);

        let input = [1.0, -0.5, 0.25, 0.0];
        let mut out = [0.0f32; 4];
        unit.render_quantum(&[&input], &mut [&mut out]);
        assert_eq!(out, input);
    }

    #[test]
    fn test_missing_input_channel_renders_silence() {
        let (_writer, reader) = bridge::channel(&[]);
        let mut unit = RenderUnit::new(PassThrough, reader);
        unit.prepare(SETUP);

        let mut left = [9.0f32; 4];
        let mut right = [9.0f32; 4];
        let input = [0.5f32; 4];
        unit.render_quantum(&[&input], &mut [&mut left, &mut right]);
        assert_eq!(left, [0.5; 4]);
        assert_eq!(right, [0.0; 4]);
    }

    #[test]
    fn test_algorithm_sees_latest_published_value() {
        let (writer, reader) = bridge::channel(&[(1, 2.0)]);
        let mut unit = RenderUnit::new(Probe { seen: Vec::new() }, reader);
        unit.prepare(SETUP);

        let input = [0.0f32; 4];
        let mut out = [0.0f32; 4];
        unit.render_quantum(&[&input], &mut [&mut out]);

        writer.publish(1, 4.0);
        unit.render_quantum(&[&input], &mut [&mut out]);

        assert_eq!(unit.algorithm.seen, [2.0, 4.0]);
    }

    #[test]
    fn test_bypass_skips_algorithm() {
        let (_writer, reader) = bridge::channel(&[(1, 2.0)]);
        let mut unit = RenderUnit::new(Probe { seen: Vec::new() }, reader);
        unit.prepare(SETUP);
        unit.set_bypassed(true);
        assert!(unit.is_bypassed());

        let input = [0.75f32; 4];
        let mut out = [0.0f32; 4];
        unit.render_quantum(&[&input], &mut [&mut out]);

        // Input copied through, algorithm untouched
        assert_eq!(out, input);
        assert!(unit.algorithm.seen.is_empty());
    }

    #[test]
    fn test_prepare_and_unprepare() {
        let (_writer, reader) = bridge::channel(&[]);
        let mut unit = RenderUnit::new(PassThrough, reader);
        assert!(unit.setup().is_none());
        unit.prepare(SETUP);
        assert_eq!(unit.max_frames(), Some(512));
        unit.unprepare();
        assert!(unit.setup().is_none());
    }
}
