//! # octavelab-host
//!
//! Presentation layer for the octavelab plugin: a toolkit-agnostic control
//! surface bound to the parameter store, gesture translation, and the
//! host-status display the external loader collaborator fills in.
//!
//! Nothing here draws pixels; an embedder renders the
//! [`ControlSurface`] model with whatever UI toolkit it uses and feeds user
//! interactions back as [`Gesture`]s. Everything runs in the UI domain.

pub mod shell;
pub mod status;
pub mod surface;

pub use shell::{Gesture, HostShell};
pub use status::HostStatus;
pub use surface::{ButtonModel, Control, ControlSurface};
