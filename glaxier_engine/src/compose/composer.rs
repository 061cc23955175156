/// SceneComposer: combines scene identifiers into one host document,
/// stages it, and opens it in the composed window.

use crate::error::Result;
use crate::{engine_bail, engine_info};
use super::document::{ComposedDocument, ComposerConfig};
use super::scene_bundle::SceneBundleRef;
use super::stager::{StagedDocument, Stager};
use super::window::{WindowId, WindowOpener, WindowRequest};

/// Result of one successful [`SceneComposer::compose`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub document: ComposedDocument,
    pub staged: StagedDocument,
    pub window: WindowId,
}

pub struct SceneComposer<St: Stager, W: WindowOpener> {
    config: ComposerConfig,
    stager: St,
    opener: W,
}

impl<St: Stager, W: WindowOpener> SceneComposer<St, W> {
    pub fn new(stager: St, opener: W) -> Self {
        Self::with_config(ComposerConfig::default(), stager, opener)
    }

    pub fn with_config(config: ComposerConfig, stager: St, opener: W) -> Self {
        Self { config, stager, opener }
    }

    /// Compose `scenes` into one window.
    ///
    /// Identifiers are embedded as given, in order, duplicates included;
    /// they are only resolved when the runtime mounts the document.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for an empty list, before anything is staged
    /// - `StagingFailed` / `WindowOpenFailed` from the collaborators
    pub fn compose(&mut self, scenes: &[SceneBundleRef]) -> Result<Composition> {
        if scenes.is_empty() {
            engine_bail!("glaxier::SceneComposer", InvalidArgument: "nothing to compose");
        }

        let document = ComposedDocument::generate(&self.config, scenes)?;
        let staged = self.stager.stage(&document)?;
        let window = self.opener.open(WindowRequest {
            name: self.config.window_name.clone(),
            src: staged.src().to_string(),
        })?;

        engine_info!("glaxier::SceneComposer", "Composed {} scene(s) into window '{}'",
            scenes.len(), self.config.window_name);
        Ok(Composition { document, staged, window })
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn stager(&self) -> &St {
        &self.stager
    }

    pub fn opener(&self) -> &W {
        &self.opener
    }

    pub fn opener_mut(&mut self) -> &mut W {
        &mut self.opener
    }
}

#[cfg(test)]
#[path = "composer_tests.rs"]
mod tests;
