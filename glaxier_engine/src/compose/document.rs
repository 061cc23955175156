/// ComposedDocument: the host document loading the shared runtime once and
/// mounting an ordered list of scenes.

use crate::error::Result;
use crate::engine_bail;
use super::scene_bundle::SceneBundleRef;

/// Names and references baked into every composed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Name of the window the document is opened in
    pub window_name: String,
    pub title: String,
    /// Third-party bundle, included before the runtime
    pub vendor_bundle: String,
    /// Shared scene runtime bundle
    pub runtime_bundle: String,
    /// Runtime function receiving the scene identifiers
    pub entry_point: String,
    /// Variable the mounted stage is assigned to
    pub binding: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            window_name: "composed".to_string(),
            title: "Composed Scene".to_string(),
            vendor_bundle: "dist://vendors.js".to_string(),
            runtime_bundle: "dist://renderer-lib.js".to_string(),
            entry_point: "Scenes.compose".to_string(),
            binding: "$scene".to_string(),
        }
    }
}

/// Generated document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDocument {
    scenes: Vec<SceneBundleRef>,
    bundles: Vec<String>,
    instruction: String,
    markup: String,
}

impl ComposedDocument {
    /// Build the document for `scenes`, in order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `scenes` is empty.
    pub fn generate(config: &ComposerConfig, scenes: &[SceneBundleRef]) -> Result<Self> {
        if scenes.is_empty() {
            engine_bail!("glaxier::ComposedDocument", InvalidArgument:
                "a composed document needs at least one scene");
        }

        let arguments = scenes
            .iter()
            .map(|id| quote(id.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        let instruction = format!("{} = {}({})", config.binding, config.entry_point, arguments);
        let bundles = vec![config.vendor_bundle.clone(), config.runtime_bundle.clone()];

        let markup = format!(
            r#"<html>
    <head>
        <title>{title}</title>
        <style>
            body {{ margin: 0; }}
            canvas {{ display: block; }}
        </style>
    </head>
    <body>
        <script src="{vendor}"></script>
        <script src="{runtime}"></script>
        <script>
            {instruction}
        </script>
    </body>
</html>
"#,
            title = config.title,
            vendor = config.vendor_bundle,
            runtime = config.runtime_bundle,
            instruction = instruction,
        );

        Ok(Self {
            scenes: scenes.to_vec(),
            bundles,
            instruction,
            markup,
        })
    }

    /// Scenes, in mount order
    pub fn scenes(&self) -> &[SceneBundleRef] {
        &self.scenes
    }

    /// Bundles included by the document, in include order
    pub fn bundles(&self) -> &[String] {
        &self.bundles
    }

    /// The inline mount instruction, e.g. `$scene = Scenes.compose('a', 'b')`
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

/// Single-quote `id` as a script string literal.
///
/// Backslash and single quote are backslash-escaped. Line breaks become
/// `\n` / `\r` so the literal stays on one line, and `<` becomes `\u003c`
/// so an identifier can never close the inline script element.
fn quote(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 2);
    out.push('\'');
    for c in id.chars() {
        match c {
            '\\' | '\'' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\u003c"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
