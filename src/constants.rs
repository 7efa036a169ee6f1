//! Suffix tables used to classify input and output paths, and the recursion
//! limit applied when expanding `@`-response files.

use crate::enums::{InputKind, OutputKind};
use std::sync::LazyLock;

/// Matches blight's Python response-file recursion ceiling.
pub const RESPONSE_FILE_RECURSION_LIMIT: usize = 64;

/// Every swizzle directory the CLI creates on `PATH` has a basename ending
/// in this sentinel, so the wrapped tool's own lookups can have it pruned
/// from the `PATH` it inherits (preventing infinite shim recursion).
pub const SWIZZLE_SENTINEL: &str = "@blight-swizzle@";

/// Removes every `PATH` entry whose basename ends in [`SWIZZLE_SENTINEL`],
/// returning the platform-joined result.
pub fn sanitize_path(path: &str) -> String {
    std::env::join_paths(
        std::env::split_paths(path).filter(|p| {
            !p.file_name()
                .map(|n| n.to_string_lossy().ends_with(SWIZZLE_SENTINEL))
                .unwrap_or(false)
        }),
    )
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_else(|_| path.to_string())
}

/// Plain suffix -> output kind. Checked before the versioned shared-library
/// patterns below.
pub fn output_kind_for_suffix(suffix: &str) -> Option<OutputKind> {
    match suffix {
        ".o" | ".obj" => Some(OutputKind::Object),
        ".so" | ".dylib" | ".dll" => Some(OutputKind::SharedLibrary),
        ".a" | ".lib" => Some(OutputKind::StaticLibrary),
        "" | ".exe" | ".bin" | ".elf" | ".com" => Some(OutputKind::Executable),
        ".ko" | ".sys" => Some(OutputKind::KernelModule),
        _ => None,
    }
}

static SHARED_LIB_PATTERNS: LazyLock<Vec<regex::Regex>> = LazyLock::new(|| {
    vec![
        regex::Regex::new(r"\.so\.\d+\.\d+\.\d+$").unwrap(),
        regex::Regex::new(r"\.so\.\d+\.\d+$").unwrap(),
        regex::Regex::new(r"\.so\.\d+$").unwrap(),
        regex::Regex::new(r"\.dylib\.\d+\.\d+\.\d+$").unwrap(),
        regex::Regex::new(r"\.dylib\.\d+\.\d+$").unwrap(),
        regex::Regex::new(r"\.dylib\.\d+$").unwrap(),
    ]
});

/// Classifies an output filename, first by exact suffix then by the
/// libtool-style versioned shared-library patterns (`libfoo.so.1.2.3`).
pub fn classify_output(filename: &str) -> OutputKind {
    if filename == "a.out" {
        return OutputKind::Executable;
    }
    let suffix = std::path::Path::new(filename)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    if let Some(kind) = output_kind_for_suffix(&suffix) {
        return kind;
    }
    if SHARED_LIB_PATTERNS.iter().any(|re| re.is_match(filename)) {
        return OutputKind::SharedLibrary;
    }
    OutputKind::Unknown
}

/// Plain suffix -> input kind, used by the `FindInputs` action. Not present
/// in blight's upstream `constants.py` snapshot; added to cover the same
/// ground the output table covers for the opposite direction.
pub fn classify_input(filename: &str) -> InputKind {
    let suffix = std::path::Path::new(filename)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    match suffix.as_str() {
        ".c" | ".cc" | ".cpp" | ".cxx" | ".c++" => InputKind::Source,
        ".h" | ".hh" | ".hpp" | ".hxx" | ".inc" => InputKind::Header,
        ".s" | ".sx" => InputKind::Assembly,
        ".o" | ".obj" => InputKind::Object,
        ".a" | ".lib" => InputKind::StaticLibrary,
        ".so" | ".dylib" | ".dll" => InputKind::SharedLibrary,
        _ => InputKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_plain_suffixes() {
        assert_eq!(classify_output("foo.o"), OutputKind::Object);
        assert_eq!(classify_output("libfoo.a"), OutputKind::StaticLibrary);
        assert_eq!(classify_output("a.out"), OutputKind::Executable);
    }

    #[test]
    fn classifies_versioned_shared_libs() {
        assert_eq!(classify_output("libfoo.so.1.2.3"), OutputKind::SharedLibrary);
        assert_eq!(classify_output("libfoo.so.1"), OutputKind::SharedLibrary);
        assert_eq!(classify_output("libfoo.dylib.2.0"), OutputKind::SharedLibrary);
    }

    #[test]
    fn classifies_inputs() {
        assert_eq!(classify_input("main.c"), InputKind::Source);
        assert_eq!(classify_input("main.S"), InputKind::Assembly);
        assert_eq!(classify_input("main.s"), InputKind::Assembly);
        assert_eq!(classify_input("header.h"), InputKind::Header);
    }

    #[test]
    #[cfg(unix)]
    fn sanitize_path_drops_swizzle_directories() {
        let path = "/usr/bin:/tmp/abc123@blight-swizzle@:/usr/local/bin";
        let sanitized = sanitize_path(path);
        assert_eq!(sanitized, "/usr/bin:/usr/local/bin");
    }

    #[test]
    #[cfg(unix)]
    fn sanitize_path_is_identity_without_swizzle_dirs() {
        let path = "/usr/bin:/usr/local/bin";
        assert_eq!(sanitize_path(path), path);
    }
}
