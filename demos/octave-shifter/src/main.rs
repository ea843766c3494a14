//! Demonstration host: wires the octave shifter's store, shell, and a
//! pass-through render unit, then drives a few gestures against a simulated
//! render clock.
//!
//! Run with `RUST_LOG=debug` to watch gesture commits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::info;

use octave_shifter::{address, OctaveShift, CONFIG, PARAMETER_TREE};
use octavelab_core::error::ConfigError;
use octavelab_core::render::{AudioSetup, PassThrough, RenderUnit};
use octavelab_core::store::ParameterStore;
use octavelab_host::surface::Control;
use octavelab_host::{Gesture, HostShell, HostStatus};

const QUANTUM_FRAMES: usize = 512;
const CHANNELS: usize = 2;

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let (store, reader) = ParameterStore::from_tree(&PARAMETER_TREE)?;
    let store = Arc::new(store);

    let mut shell = HostShell::new(Arc::clone(&store), &CONFIG);
    shell.plugin_loaded(HostStatus {
        title: CONFIG.name.to_string(),
        message: "Audio Unit loaded.".to_string(),
        show_audio_controls: true,
        show_midi_controls: false,
    });

    let mut unit = RenderUnit::new(PassThrough, reader);
    unit.prepare(AudioSetup {
        sample_rate: 48_000.0,
        max_frames: QUANTUM_FRAMES,
        input_channels: CHANNELS,
        output_channels: CHANNELS,
    });

    // Simulated hardware clock: one quantum per tick until told to stop.
    let running = Arc::new(AtomicBool::new(true));
    let render_running = Arc::clone(&running);
    let render_thread = thread::spawn(move || {
        let input = vec![vec![0.0f32; QUANTUM_FRAMES]; CHANNELS];
        let mut output = vec![vec![0.0f32; QUANTUM_FRAMES]; CHANNELS];
        let input_refs: Vec<&[f32]> = input.iter().map(|channel| channel.as_slice()).collect();
        while render_running.load(Ordering::Relaxed) {
            {
                let mut output_refs: Vec<&mut [f32]> = output
                    .iter_mut()
                    .map(|channel| channel.as_mut_slice())
                    .collect();
                unit.render_quantum(&input_refs, &mut output_refs);
            }
            thread::sleep(Duration::from_millis(10));
        }
        let shift = OctaveShift::from_value(unit.latest(address::OCTAVE_SHIFT));
        info!(
            "render thread parting state: {} (ratio {})",
            shift.label(),
            shift.pitch_ratio()
        );
    });

    println!("{}  {}", shell.header(), shell.version_label());
    println!("{}: {}", shell.status().title, shell.status().message);
    println!();

    for step in [
        OctaveShift::OneOctaveUp,
        OctaveShift::TwoOctavesDown,
        OctaveShift::Normal,
    ] {
        shell.handle_gesture(Gesture::ButtonTap {
            address: address::OCTAVE_SHIFT,
            index: step as usize,
        });
        shell.refresh();
        print_surface(&shell);
        thread::sleep(Duration::from_millis(30));
    }

    running.store(false, Ordering::Relaxed);
    if render_thread.join().is_err() {
        log::error!("render thread panicked");
    }
    Ok(())
}

fn print_surface(shell: &HostShell) {
    for control in shell.surface().controls() {
        match control {
            Control::ButtonGrid {
                name,
                buttons,
                selected,
                ..
            } => {
                let row: Vec<String> = buttons
                    .iter()
                    .map(|button| {
                        if Some(button.index) == *selected {
                            format!("[{}]", button.short_caption)
                        } else {
                            format!(" {} ", button.short_caption)
                        }
                    })
                    .collect();
                println!("{:<14} {}", name, row.join(" "));
            }
            Control::Continuous {
                name,
                min,
                max,
                value,
                ..
            } => {
                println!("{:<14} {:.2}  (range {:.2}..{:.2})", name, value, min, max);
            }
        }
    }
    println!();
}
