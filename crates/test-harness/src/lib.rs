//! Test harness for the box measurement tool.
//!
//! Provides scripted sessions that drive the tool through real pointer
//! gestures, mock collaborators for the host-side services, and assertion
//! helpers with diagnostics.
//!
//! # Key Components
//!
//! - [`BoxSession`]: fluent API for scripting construction and edits
//! - [`helpers`]: error type, pointer builders, recording observer, terrain viewpoint
//! - [`assertions`]: point and measurement assertions returning [`HarnessError`]

pub mod assertions;
pub mod helpers;
pub mod workflow;

pub use helpers::{HarnessError, Notification, RecordingObserver, TerrainViewpoint, init_tracing};
pub use workflow::BoxSession;
