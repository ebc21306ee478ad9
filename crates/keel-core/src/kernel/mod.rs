//! # Keel Core Kernel
//!
//! The `kernel` module forms the heart of the Keel bootstrap engine. It is
//! responsible for creating the application context, running the
//! configuration validation pipeline, and handing components out to the
//! surrounding subsystems.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Application Bootstrapping**: [`Application`](bootstrap::Application)
//!   owns the context and the pipeline and runs the bootstrap exactly once.
//! - **Context Ownership**: [`AppContext`](context::AppContext) is the
//!   explicit, single-owner context object passed to every subsystem:
//!   aliases, container, symbolic registries, the application's own
//!   event/behavior attachments, modules, and plugins.
//! - **Core Constants**: system-wide constants via the `constants`
//!   submodule.
//! - **Error Handling**: the top-level [`Error`](error::Error) enum and the
//!   `Result` alias in the `error` submodule.

pub mod bootstrap;
pub mod constants;
pub mod context;
pub mod error;

pub use bootstrap::Application;
pub use context::{AppContext, ModuleDefinition};
pub use error::{Error, Result};

// Test module declaration
#[cfg(test)]
mod tests;
