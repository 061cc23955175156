//! Compose module: turn several scene identifiers into one window.
//!
//! The composer generates a document that loads the shared runtime once and
//! mounts the scenes in order, hands it to a [`Stager`], then asks a
//! [`WindowOpener`] to show the staged result in the composed window.

mod composer;
mod document;
mod scene_bundle;
mod stager;
mod window;

pub use composer::{Composition, SceneComposer};
pub use document::{ComposedDocument, ComposerConfig};
pub use scene_bundle::SceneBundleRef;
pub use stager::{FileStager, MemoryStager, StagedDocument, Stager};
pub use window::{OpenWindow, WindowId, WindowOpener, WindowRegistry, WindowRequest};
