//! The closed enumerations that describe a tool invocation: which binary was
//! wrapped, what language/standard/optimization level it was invoked with,
//! which compilation stage it's running, and what kind of file an input or
//! output path names.

use std::fmt;
use std::str::FromStr;

/// Which build-toolchain program a shim binary stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ToolKind {
    Cc,
    Cxx,
    Cpp,
    Ld,
    As,
    Ar,
    Strip,
    Install,
}

impl ToolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Cc => "CC",
            ToolKind::Cxx => "CXX",
            ToolKind::Cpp => "CPP",
            ToolKind::Ld => "LD",
            ToolKind::As => "AS",
            ToolKind::Ar => "AR",
            ToolKind::Strip => "STRIP",
            ToolKind::Install => "INSTALL",
        }
    }

    /// The env var suffix used for `BLIGHT_WRAPPED_<KIND>`.
    pub fn env_suffix(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CC" => Ok(ToolKind::Cc),
            "CXX" => Ok(ToolKind::Cxx),
            "CPP" => Ok(ToolKind::Cpp),
            "LD" => Ok(ToolKind::Ld),
            "AS" => Ok(ToolKind::As),
            "AR" => Ok(ToolKind::Ar),
            "STRIP" => Ok(ToolKind::Strip),
            "INSTALL" => Ok(ToolKind::Install),
            _ => Err(()),
        }
    }
}

/// The source language a compiler tool was invoked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Lang {
    C,
    Cxx,
    Unknown,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::C => write!(f, "C"),
            Lang::Cxx => write!(f, "C++"),
            Lang::Unknown => write!(f, "unknown"),
        }
    }
}

/// The language standard requested via `-std=` (or `-ansi`).
///
/// Mirrors the exhaustive flag table blight's Python implementation keeps:
/// every standard name the GNU and Clang frontends accept, plus the GNU and
/// unknown-suffix fallback buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Std {
    C89,
    C94,
    C99,
    C11,
    C17,
    C2x,
    Gnu89,
    Gnu99,
    Gnu11,
    Gnu17,
    Gnu2x,
    Cxx03,
    Cxx11,
    Cxx14,
    Cxx17,
    Cxx2a,
    Gnuxx03,
    Gnuxx11,
    Gnuxx14,
    Gnuxx17,
    Gnuxx2a,
    /// A `-std=c...` value that didn't match a known standard.
    CUnknown,
    /// A `-std=c++...` value that didn't match a known standard.
    CxxUnknown,
    /// No recognized standard but a C++-style `gnu++...` prefix.
    GnuxxUnknown,
    /// No recognized standard but a `gnu...` prefix, or none given for a C tool.
    GnuUnknown,
    /// No `-std=` given at all, for a tool whose language couldn't be determined.
    Unknown,
}

impl Std {
    pub fn is_unknown(&self) -> bool {
        matches!(
            self,
            Std::CUnknown
                | Std::CxxUnknown
                | Std::GnuUnknown
                | Std::GnuxxUnknown
                | Std::Unknown
        )
    }

    pub fn is_cxx_std(&self) -> bool {
        matches!(
            self,
            Std::Cxx03
                | Std::Cxx11
                | Std::Cxx14
                | Std::Cxx17
                | Std::Cxx2a
                | Std::Gnuxx03
                | Std::Gnuxx11
                | Std::Gnuxx14
                | Std::Gnuxx17
                | Std::Gnuxx2a
                | Std::CxxUnknown
                | Std::GnuxxUnknown
        )
    }

    /// Parses a `-std=` flag value (without the `-std=` prefix).
    pub fn from_flag_value(value: &str) -> Std {
        match value {
            "c89" | "c90" | "iso9899:1990" => Std::C89,
            "iso9899:199409" => Std::C94,
            "c99" | "c9x" | "iso9899:1999" | "iso9899:199x" => Std::C99,
            "c11" | "c1x" | "iso9899:2011" => Std::C11,
            "c17" | "c18" | "iso9899:2017" | "iso9899:2018" => Std::C17,
            "c2x" => Std::C2x,
            "gnu89" | "gnu90" => Std::Gnu89,
            "gnu99" | "gnu9x" => Std::Gnu99,
            "gnu11" | "gnu1x" => Std::Gnu11,
            "gnu17" | "gnu18" => Std::Gnu17,
            "gnu2x" => Std::Gnu2x,
            "c++98" | "c++03" => Std::Cxx03,
            "c++11" | "c++0x" => Std::Cxx11,
            "c++14" | "c++1y" => Std::Cxx14,
            "c++17" | "c++1z" => Std::Cxx17,
            "c++2a" => Std::Cxx2a,
            "gnu++98" | "gnu++03" => Std::Gnuxx03,
            "gnu++11" | "gnu++0x" => Std::Gnuxx11,
            "gnu++14" | "gnu++1y" => Std::Gnuxx14,
            "gnu++17" | "gnu++1z" => Std::Gnuxx17,
            "gnu++2a" => Std::Gnuxx2a,
            other => {
                if other.starts_with("c++") {
                    Std::CxxUnknown
                } else if other.starts_with("gnu++") {
                    Std::GnuxxUnknown
                } else if other.starts_with("gnu") {
                    Std::GnuUnknown
                } else if other.starts_with('c') || other.starts_with("iso9899") {
                    Std::CUnknown
                } else {
                    Std::Unknown
                }
            }
        }
    }

    /// The default standard for a tool with no `-std=`/`-ansi` flag at all.
    pub fn default_for(lang: Lang) -> Std {
        match lang {
            Lang::C => Std::GnuUnknown,
            Lang::Cxx => Std::GnuxxUnknown,
            Lang::Unknown => Std::Unknown,
        }
    }

    /// The standard implied by a bare `-ansi` flag, which predates `-std=`.
    pub fn ansi_for(lang: Lang) -> Std {
        match lang {
            Lang::C => Std::C89,
            Lang::Cxx => Std::Cxx03,
            Lang::Unknown => Std::Unknown,
        }
    }
}

/// The optimization level requested via `-O...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OptLevel {
    O0,
    O1,
    O2,
    O3,
    OFast,
    OSize,
    OSizeZ,
    ODebug,
    Unknown,
}

impl OptLevel {
    pub fn for_size(&self) -> bool {
        matches!(self, OptLevel::OSize | OptLevel::OSizeZ)
    }

    pub fn for_performance(&self) -> bool {
        matches!(
            self,
            OptLevel::O1 | OptLevel::O2 | OptLevel::O3 | OptLevel::OFast
        )
    }

    pub fn for_debug(&self) -> bool {
        matches!(self, OptLevel::ODebug)
    }

    /// Matches a literal `-O...` flag against the exact-match table. Returns
    /// `None` for flags that need the `-O[1-9]\d*` fallback handled by the
    /// caller.
    pub fn from_flag(flag: &str) -> Option<OptLevel> {
        match flag {
            "-O0" => Some(OptLevel::O0),
            "-O" | "-O1" => Some(OptLevel::O1),
            "-O2" => Some(OptLevel::O2),
            "-O3" => Some(OptLevel::O3),
            "-Ofast" => Some(OptLevel::OFast),
            "-Os" => Some(OptLevel::OSize),
            "-Oz" => Some(OptLevel::OSizeZ),
            "-Og" => Some(OptLevel::ODebug),
            _ => None,
        }
    }
}

/// The compilation stage a compiler driver invocation will stop at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Stage {
    Preprocess,
    SyntaxOnly,
    Assemble,
    CompileObject,
    AllStages,
    Unknown,
}

/// The target architecture's code model, relevant to compilers that accept
/// `-mcmodel=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CodeModel {
    Small,
    Medium,
    Large,
    Kernel,
    Unknown,
}

impl CodeModel {
    /// `medlow`/`medany` are GCC's historical aliases for `small`/`medium`.
    pub fn from_flag_value(value: &str) -> CodeModel {
        match value {
            "small" | "medlow" => CodeModel::Small,
            "medium" | "medany" => CodeModel::Medium,
            "large" => CodeModel::Large,
            "kernel" => CodeModel::Kernel,
            _ => CodeModel::Unknown,
        }
    }
}

/// The compiler lineage behind a wrapped `CC`/`CXX` executable, determined
/// by invoking it once with `-###` and inspecting stderr. Consulted lazily;
/// the only derived property that touches the real tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ToolchainFamily {
    Gcc,
    Clang,
    AppleClang,
    Tcc,
    Unknown,
}

impl ToolchainFamily {
    /// Classifies a `-###` probe's stderr and exit status.
    pub fn from_probe(stderr: &str, exit_success: bool) -> ToolchainFamily {
        if stderr.contains("Apple clang version") {
            ToolchainFamily::AppleClang
        } else if stderr.contains("clang version") {
            ToolchainFamily::Clang
        } else if stderr.contains("gcc version") {
            ToolchainFamily::Gcc
        } else if !exit_success && stderr.contains("tcc: error") {
            ToolchainFamily::Tcc
        } else {
            ToolchainFamily::Unknown
        }
    }
}

/// The kind of artifact an output path names, inferred from its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OutputKind {
    Object,
    SharedLibrary,
    StaticLibrary,
    Executable,
    KernelModule,
    Unknown,
}

/// The kind of artifact an input path names, inferred from its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum InputKind {
    Source,
    Header,
    Object,
    StaticLibrary,
    SharedLibrary,
    Assembly,
    Unknown,
}
