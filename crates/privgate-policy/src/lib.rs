//! # privgate-policy
//!
//! TOML-driven configuration for the privgate approval gate.
//!
//! ## Overview
//!
//! This crate provides the [`RequesterRegistry`](privgate_core::traits::RequesterRegistry)
//! implementations [`TomlRequesterRegistry`] and [`FileRequesterRegistry`],
//! and the loader for the gate's check toggles.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use privgate_policy::{load_settings, FileRequesterRegistry, Overrides};
//!
//! let config = Overrides::default().apply(load_settings(Path::new("privgate.toml"))?);
//! let registry = FileRequesterRegistry::new(".github/privileged-requesters.toml");
//! ```

pub mod config;
pub mod registry;
pub mod settings;

pub use config::{RegistryConfig, SettingsFile};
pub use registry::{FileRequesterRegistry, TomlRequesterRegistry};
pub use settings::{load_settings, parse_settings_toml, Overrides};

// ── Tests ─────────────────────────────────────────────────────────────────────
