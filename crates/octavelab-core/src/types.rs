//! Common types used throughout the octavelab core.

// =============================================================================
// Parameter Table Limits
// =============================================================================
//
// The render bridge and render snapshot are fixed-capacity so that the render
// domain never allocates. MAX_PARAMETERS is the compile-time ceiling for the
// number of addressable parameters in one plugin instance.
//
// Trees that declare more parameters than this fail at setup with a
// ConfigError rather than degrading at render time.
// =============================================================================

/// Maximum number of parameters one plugin instance may declare.
///
/// Bounds the render snapshot and the bridge slot table. 64 is far above
/// anything the octave shifter needs, but leaves room for effect chains that
/// reuse this core.
pub const MAX_PARAMETERS: usize = 64;

/// Stable integer key identifying a control parameter.
///
/// Addresses are the persisted contract: host automation and preset files
/// reference parameters by address, so an address must never change meaning
/// across plugin versions.
pub type ParamAddress = u64;

/// Current scalar value of a parameter.
///
/// Always within the parameter's declared `[min, max]` range once committed.
pub type ParamValue = f32;
