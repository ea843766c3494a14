//! Shared plugin identity configuration.
//!
//! Metadata the loader collaborator and component registry see: display
//! name, vendor, version, and the four-character component identity codes.
//!
//! # Example
//!
//! ```
//! use octavelab_core::PluginConfig;
//! use octavelab_utils::fourcc;
//!
//! pub static CONFIG: PluginConfig =
//!     PluginConfig::new("Guitar Octave Shifter", fourcc!(b"alab"), fourcc!(b"octv"))
//!         .with_vendor("AudioLab")
//!         .with_version(env!("CARGO_PKG_VERSION"));
//! ```

use octavelab_utils::FourCharCode;

/// Plugin identity metadata.
///
/// Declared once as a `static`; the manufacturer/subtype pair must stay
/// stable across versions, like parameter addresses.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Plugin name displayed by the host.
    pub name: &'static str,

    /// Vendor/company name.
    pub vendor: &'static str,

    /// Plugin version string.
    pub version: &'static str,

    /// Manufacturer code (4-character identifier, unique per vendor).
    pub manufacturer: FourCharCode,

    /// Subtype code (4-character identifier, unique within the vendor).
    pub subtype: FourCharCode,
}

impl PluginConfig {
    /// Create a new configuration with default vendor and version.
    pub const fn new(
        name: &'static str,
        manufacturer: FourCharCode,
        subtype: FourCharCode,
    ) -> Self {
        Self {
            name,
            vendor: "Unknown Vendor",
            version: "0.0.0",
            manufacturer,
            subtype,
        }
    }

    /// Set the vendor name.
    pub const fn with_vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    /// Set the version string.
    pub const fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }
}
