/// Opaque scene identifier handed to the composer and the scene runtime.

use std::fmt;

/// Identifier of a built scene bundle (e.g. `"cameras"`).
///
/// The composer never validates it; only the runtime resolves it when the
/// composed document is mounted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneBundleRef(String);

impl SceneBundleRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneBundleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneBundleRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SceneBundleRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for SceneBundleRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
