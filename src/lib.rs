//! Envmeld: Deterministic Shell Environment State Management
//!
//! Reconciles a host shell's live environment with the environment that should
//! be active for the current directory. Each invocation computes a minimal,
//! invertible diff between the previously-applied environment and the new one,
//! and emits shell code that applies exactly that difference.

pub mod cli;
pub mod codec;
pub mod config;
pub mod diff;
pub mod env;
pub mod error;
pub mod export;
pub mod ignore;
pub mod logging;
pub mod shell;
