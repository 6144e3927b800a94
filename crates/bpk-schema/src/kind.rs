//! Artifact kinds and the descriptor files that mark them.

/// Descriptor file marking a buildpack source tree.
pub const BUILDPACK_DESCRIPTOR: &str = "buildpack.toml";

/// Descriptor file marking an extension source tree.
pub const EXTENSION_DESCRIPTOR: &str = "extension.toml";

/// What a source tree builds into.
///
/// The kind selects the builder flag, the descriptor handed to the builder,
/// and the packaging tool's subcommand.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A buildpack (`buildpack.toml`)
    #[default]
    Buildpack,
    /// An image extension (`extension.toml`)
    Extension,
}

impl ArtifactKind {
    /// Descriptor file name for this kind.
    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::Buildpack => BUILDPACK_DESCRIPTOR,
            Self::Extension => EXTENSION_DESCRIPTOR,
        }
    }

    /// Flag telling the builder tool which descriptor it is given.
    pub fn builder_flag(&self) -> &'static str {
        match self {
            Self::Buildpack => "--buildpack",
            Self::Extension => "--extension",
        }
    }

    /// Top-level packaging-tool subcommand (`<subcommand> package ...`).
    pub fn package_subcommand(&self) -> &'static str {
        match self {
            Self::Buildpack => "buildpack",
            Self::Extension => "extension",
        }
    }

    /// Whether the packaging tool accepts `--target` for this kind.
    ///
    /// Extension packaging has no multi-arch support yet.
    // TODO: return true for extensions once pack supports multi-arch extension packages
    pub fn supports_target(&self) -> bool {
        matches!(self, Self::Buildpack)
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        self.package_subcommand()
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
