//! Argument-list utilities shared by every tool: reverse lookup helpers that
//! model "last flag wins" semantics, response-file expansion, and splicing.

use crate::constants::RESPONSE_FILE_RECURSION_LIMIT;
use std::path::{Path, PathBuf};

/// Returns the index of the last element equal to `needle`, scanning from
/// the end. Compiler drivers resolve repeated flags by taking the last one,
/// so most lookups in this crate go through this or [`rindex_prefix`].
pub fn rindex(items: &[String], needle: &str) -> Option<usize> {
    items.iter().rposition(|item| item == needle)
}

/// Returns the index of the last element that starts with `prefix`.
pub fn rindex_prefix(items: &[String], prefix: &str) -> Option<usize> {
    items.iter().rposition(|item| item.starts_with(prefix))
}

/// Splices `new_items` into `parent` at `idx`, replacing the single element
/// that was there (used to inline a response file's expanded tokens in
/// place of the `@file` token that named it).
pub fn splice_at(parent: &mut Vec<String>, idx: usize, new_items: Vec<String>) {
    parent.splice(idx..idx + 1, new_items);
}

/// Expands every `@file` response-file reference in `args`, recursively, up
/// to [`RESPONSE_FILE_RECURSION_LIMIT`] levels deep. Relative response-file
/// paths are resolved against `cwd` at the top level, and against the
/// parent directory of the including file for nested references.
///
/// A reference to a file that doesn't exist expands to nothing, matching
/// the permissive behavior of the reference implementation (a build system
/// that names a response file it never wrote is not this crate's problem to
/// diagnose).
///
/// Depth is tracked per-token across splices, not just within one file's
/// own nested references: a response file that (directly or transitively)
/// references itself is expanded exactly [`RESPONSE_FILE_RECURSION_LIMIT`]
/// times and then left as a literal `@file` token, rather than being
/// re-expanded at the same depth forever.
pub fn expand_response_files(args: &[String], cwd: &Path) -> Vec<String> {
    let mut expanded: Vec<String> = args.to_vec();
    let mut depths: Vec<usize> = vec![0; expanded.len()];
    let mut dirs: Vec<PathBuf> = vec![cwd.to_path_buf(); expanded.len()];

    loop {
        let Some(idx) = (0..expanded.len())
            .find(|&i| expanded[i].starts_with('@') && depths[i] < RESPONSE_FILE_RECURSION_LIMIT)
        else {
            break;
        };

        let token = expanded[idx].clone();
        let depth = depths[idx];
        let working_dir = dirs[idx].clone();

        let (tokens, next_dir) = expand_one(&token, &working_dir);
        let count = tokens.len();

        splice_at(&mut expanded, idx, tokens);
        depths.splice(idx..idx + 1, std::iter::repeat(depth + 1).take(count));
        dirs.splice(idx..idx + 1, std::iter::repeat(next_dir).take(count));
    }

    expanded
}

/// Expands a single `@file` token one level deep: reads the named response
/// file and shell-word-splits its contents. Returns the resulting tokens
/// alongside the directory any `@file` reference among them should resolve
/// against (the response file's own parent directory) - the caller is
/// responsible for recursing into those, tracking depth itself.
fn expand_one(token: &str, working_dir: &Path) -> (Vec<String>, PathBuf) {
    let Some(name) = token.strip_prefix('@') else {
        return (vec![token.to_string()], working_dir.to_path_buf());
    };
    let path = resolve_response_file_path(name, working_dir);
    let parent = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| working_dir.to_path_buf());
    let Ok(contents) = std::fs::read_to_string(&path) else {
        return (Vec::new(), parent);
    };
    let Ok(tokens) = shell_words::split(&contents) else {
        return (Vec::new(), parent);
    };
    (tokens, parent)
}

fn resolve_response_file_path(name: &str, working_dir: &Path) -> PathBuf {
    let p = Path::new(name);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        working_dir.join(p)
    }
}

/// Collects the values of a possibly-repeated option in argument order,
/// accepting both `-Dname` (glued) and `-D name` (separate token) forms.
pub fn collect_glued_or_separate<'a>(args: &'a [String], flag: &str) -> Vec<&'a str> {
    let mut values = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == flag {
            if let Some(next) = args.get(i + 1) {
                values.push(next.as_str());
                i += 1;
            }
        } else if let Some(rest) = arg.strip_prefix(flag) {
            if !rest.is_empty() {
                values.push(rest);
            }
        }
        i += 1;
    }
    values
}
