//! Target architectures and platforms.
//!
//! The packaging tool names architectures the way Go does (`amd64`, `arm64`),
//! while Rust reports `x86_64` and `aarch64`. [`Arch`] accepts both spellings
//! and always renders the packaging tool's name.

use thiserror::Error;

/// Operating system component of every packaged [`Platform`].
pub const TARGET_OS: &str = "linux";

/// A CPU architecture, named as the packaging tool expects it.
///
/// # Example
///
/// ```
/// use bpk_schema::Arch;
///
/// let arch: Arch = "x86_64".parse().unwrap();
/// assert_eq!(arch.as_str(), "amd64");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 64-bit x86 (`x86_64`)
    Amd64,
    /// 64-bit ARM (`aarch64`)
    Arm64,
    /// 32-bit ARM
    Arm,
    /// 32-bit x86
    #[serde(rename = "386")]
    I386,
    /// 64-bit big-endian POWER
    Ppc64,
    /// 64-bit little-endian POWER
    Ppc64le,
    /// 64-bit LoongArch
    Loong64,
    /// 32-bit big-endian MIPS
    Mips,
    /// 32-bit little-endian MIPS
    Mipsle,
    /// 64-bit big-endian MIPS
    Mips64,
    /// 64-bit little-endian MIPS
    Mips64le,
    /// 64-bit RISC-V
    Riscv64,
    /// IBM Z
    S390x,
}

/// Returned when an architecture name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown architecture: {0}")]
pub struct ParseArchError(String);

impl Arch {
    /// Architecture of the running host, or `None` when the packaging tool
    /// has no name for it.
    pub fn current() -> Option<Self> {
        Self::from_rust_name(std::env::consts::ARCH)
    }

    /// Map a `std::env::consts::ARCH` value onto the packaging tool's names.
    pub fn from_rust_name(name: &str) -> Option<Self> {
        match name {
            "x86_64" => Some(Self::Amd64),
            "aarch64" => Some(Self::Arm64),
            "arm" => Some(Self::Arm),
            "x86" => Some(Self::I386),
            "powerpc64" if cfg!(target_endian = "little") => Some(Self::Ppc64le),
            "powerpc64" => Some(Self::Ppc64),
            "loongarch64" => Some(Self::Loong64),
            "mips" if cfg!(target_endian = "little") => Some(Self::Mipsle),
            "mips" => Some(Self::Mips),
            "mips64" if cfg!(target_endian = "little") => Some(Self::Mips64le),
            "mips64" => Some(Self::Mips64),
            "riscv64" => Some(Self::Riscv64),
            "s390x" => Some(Self::S390x),
            _ => None,
        }
    }

    /// Packaging-tool string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
            Self::I386 => "386",
            Self::Ppc64 => "ppc64",
            Self::Ppc64le => "ppc64le",
            Self::Loong64 => "loong64",
            Self::Mips => "mips",
            Self::Mipsle => "mipsle",
            Self::Mips64 => "mips64",
            Self::Mips64le => "mips64le",
            Self::Riscv64 => "riscv64",
            Self::S390x => "s390x",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Arch {
    type Err = ParseArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amd64" | "x86_64" | "x86-64" => Ok(Self::Amd64),
            "arm64" | "aarch64" => Ok(Self::Arm64),
            "arm" | "armv7" => Ok(Self::Arm),
            "386" | "i386" | "i686" | "x86" => Ok(Self::I386),
            "ppc64" | "powerpc64" => Ok(Self::Ppc64),
            "ppc64le" | "powerpc64le" => Ok(Self::Ppc64le),
            "loong64" | "loongarch64" => Ok(Self::Loong64),
            "mips" => Ok(Self::Mips),
            "mipsle" | "mipsel" => Ok(Self::Mipsle),
            "mips64" => Ok(Self::Mips64),
            "mips64le" | "mips64el" => Ok(Self::Mips64le),
            "riscv64" => Ok(Self::Riscv64),
            "s390x" => Ok(Self::S390x),
            _ => Err(ParseArchError(s.to_string())),
        }
    }
}

/// An `os/arch` pair passed to the packaging tool's `--target` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    arch: Arch,
}

impl Platform {
    /// A Linux platform for the given architecture.
    pub fn linux(arch: Arch) -> Self {
        Self { arch }
    }

    /// The platform's architecture.
    pub fn arch(&self) -> Arch {
        self.arch
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{TARGET_OS}/{}", self.arch)
    }
}
