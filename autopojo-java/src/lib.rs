//! Java backend for the autopojo generator.
//!
//! Renders [`GeneratedTypeDescriptor`] trees produced by the engine to
//! Java source text and writes one file per top-level generated type.
//!
//! # Module Organization
//!
//! - [`code`] - Indented source assembly
//! - [`renderer`] - Descriptor-to-Java rendering
//! - [`files`] - Filesystem sink and the `generate_into` entry point
//!
//! [`GeneratedTypeDescriptor`]: autopojo_engine::GeneratedTypeDescriptor

pub mod code;
pub mod files;
pub mod renderer;

pub use code::CodeBuilder;
pub use files::{generate_into, FsSink};
pub use renderer::JavaRenderer;
