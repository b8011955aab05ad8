//! Language detection from file name, extension and content.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use crate::core::types::LanguageGroup;

use LanguageGroup::{Data, Markup, Programming, Prose};

/// Languages recognised by exact file name
const FILENAMES: &[(&str, &str)] = &[
    ("Makefile", "Makefile"),
    ("GNUmakefile", "Makefile"),
    ("makefile", "Makefile"),
    ("Dockerfile", "Dockerfile"),
    ("Containerfile", "Dockerfile"),
    ("Jenkinsfile", "Groovy"),
    ("Rakefile", "Ruby"),
    ("Gemfile", "Ruby"),
    ("Gemfile.lock", "Gemfile.lock"),
    ("Vagrantfile", "Ruby"),
    ("CMakeLists.txt", "CMake"),
    ("BUILD", "Starlark"),
    ("BUILD.bazel", "Starlark"),
    ("WORKSPACE", "Starlark"),
    ("Cargo.lock", "TOML"),
    ("Pipfile", "TOML"),
    ("go.mod", "Go Module"),
    ("go.sum", "Go Checksums"),
    ("LICENSE", "Text"),
    ("COPYING", "Text"),
    (".gitignore", "Ignore List"),
    (".dockerignore", "Ignore List"),
    (".npmignore", "Ignore List"),
    (".gitattributes", "Git Attributes"),
    (".gitmodules", "Git Config"),
    (".editorconfig", "EditorConfig"),
    (".bashrc", "Shell"),
    (".zshrc", "Shell"),
    (".profile", "Shell"),
    (".env", "Dotenv"),
];

/// Languages recognised by (lowercased) extension
const EXTENSIONS: &[(&str, &str)] = &[
    ("go", "Go"),
    ("rs", "Rust"),
    ("py", "Python"),
    ("pyi", "Python"),
    ("rb", "Ruby"),
    ("js", "JavaScript"),
    ("mjs", "JavaScript"),
    ("cjs", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TSX"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("kts", "Kotlin"),
    ("scala", "Scala"),
    ("groovy", "Groovy"),
    ("c", "C"),
    ("cc", "C++"),
    ("cpp", "C++"),
    ("cxx", "C++"),
    ("hpp", "C++"),
    ("hh", "C++"),
    ("cs", "C#"),
    ("fs", "F#"),
    ("swift", "Swift"),
    ("php", "PHP"),
    ("pl", "Perl"),
    ("lua", "Lua"),
    ("r", "R"),
    ("jl", "Julia"),
    ("hs", "Haskell"),
    ("ml", "OCaml"),
    ("ex", "Elixir"),
    ("exs", "Elixir"),
    ("erl", "Erlang"),
    ("clj", "Clojure"),
    ("dart", "Dart"),
    ("zig", "Zig"),
    ("nim", "Nim"),
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("zsh", "Shell"),
    ("fish", "fish"),
    ("ps1", "PowerShell"),
    ("bat", "Batchfile"),
    ("cmd", "Batchfile"),
    ("sql", "SQL"),
    ("proto", "Protocol Buffer"),
    ("tf", "HCL"),
    ("hcl", "HCL"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("html", "HTML"),
    ("htm", "HTML"),
    ("xml", "XML"),
    ("svg", "SVG"),
    ("css", "CSS"),
    ("scss", "SCSS"),
    ("sass", "Sass"),
    ("less", "Less"),
    ("md", "Markdown"),
    ("markdown", "Markdown"),
    ("rst", "reStructuredText"),
    ("adoc", "AsciiDoc"),
    ("tex", "TeX"),
    ("org", "Org"),
    ("json", "JSON"),
    ("jsonc", "JSON with Comments"),
    ("yaml", "YAML"),
    ("yml", "YAML"),
    ("toml", "TOML"),
    ("ini", "INI"),
    ("cfg", "INI"),
    ("csv", "CSV"),
    ("lock", "Lockfile"),
    ("txt", "Text"),
];

/// Group assignment for every label the tables can produce
const GROUPS: &[(&str, LanguageGroup)] = &[
    ("Go", Programming),
    ("Rust", Programming),
    ("Python", Programming),
    ("Ruby", Programming),
    ("JavaScript", Programming),
    ("TypeScript", Programming),
    ("TSX", Programming),
    ("Java", Programming),
    ("Kotlin", Programming),
    ("Scala", Programming),
    ("Groovy", Programming),
    ("C", Programming),
    ("C++", Programming),
    ("Objective-C", Programming),
    ("MATLAB", Programming),
    ("C#", Programming),
    ("F#", Programming),
    ("Swift", Programming),
    ("PHP", Programming),
    ("Perl", Programming),
    ("Lua", Programming),
    ("R", Programming),
    ("Julia", Programming),
    ("Haskell", Programming),
    ("OCaml", Programming),
    ("Elixir", Programming),
    ("Erlang", Programming),
    ("Clojure", Programming),
    ("Dart", Programming),
    ("Zig", Programming),
    ("Nim", Programming),
    ("Shell", Programming),
    ("fish", Programming),
    ("PowerShell", Programming),
    ("Batchfile", Programming),
    ("Makefile", Programming),
    ("Dockerfile", Programming),
    ("CMake", Programming),
    ("Starlark", Programming),
    ("HCL", Programming),
    ("SQL", Data),
    ("Protocol Buffer", Data),
    ("Vue", Markup),
    ("Svelte", Markup),
    ("HTML", Markup),
    ("XML", Data),
    ("SVG", Data),
    ("CSS", Markup),
    ("SCSS", Markup),
    ("Sass", Markup),
    ("Less", Markup),
    ("Markdown", Prose),
    ("reStructuredText", Prose),
    ("AsciiDoc", Prose),
    ("TeX", Markup),
    ("Org", Prose),
    ("Text", Prose),
    ("JSON", Data),
    ("JSON with Comments", Data),
    ("YAML", Data),
    ("TOML", Data),
    ("INI", Data),
    ("CSV", Data),
    ("Lockfile", Data),
    ("Gemfile.lock", Data),
    ("Go Module", Data),
    ("Go Checksums", Data),
    ("Ignore List", Data),
    ("Git Attributes", Data),
    ("Git Config", Data),
    ("EditorConfig", Data),
    ("Dotenv", Data),
];

/// Interpreters recognised on a shebang line
const INTERPRETERS: &[(&str, &str)] = &[
    ("python", "Python"),
    ("python3", "Python"),
    ("python2", "Python"),
    ("ruby", "Ruby"),
    ("node", "JavaScript"),
    ("deno", "TypeScript"),
    ("perl", "Perl"),
    ("php", "PHP"),
    ("lua", "Lua"),
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("zsh", "Shell"),
    ("dash", "Shell"),
    ("fish", "fish"),
    ("Rscript", "R"),
];

static BY_FILENAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| FILENAMES.iter().copied().collect());

static BY_EXTENSION: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EXTENSIONS.iter().copied().collect());

static BY_INTERPRETER: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| INTERPRETERS.iter().copied().collect());

static GROUP_OF: Lazy<HashMap<&'static str, LanguageGroup>> =
    Lazy::new(|| GROUPS.iter().copied().collect());

static SHEBANG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#!\s*(?:/usr)?(?:/local)?/bin/(?:env\s+(?:-\S+\s+)*)?([A-Za-z0-9_.+-]+)")
        .expect("valid shebang regex")
});

static OBJC_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:@interface|@implementation|@protocol|@end|#import\s)")
        .expect("valid objective-c regex")
});

static CPP_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:namespace\s|template\s*<|class\s+\w+\s*[:{]|#include\s*<(?:iostream|string|vector|memory|map)>|using\s+namespace\s)")
        .expect("valid c++ regex")
});

static MATLAB_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:function\s+.*=|%\s|end\s*$)").expect("valid matlab regex")
});

/// Determine the language of a file, or `None` if nothing matches
pub fn detect(path: &Path, content: &[u8]) -> Option<&'static str> {
    let file_name = path.file_name().and_then(|n| n.to_str())?;

    if let Some(lang) = BY_FILENAME.get(file_name) {
        return Some(lang);
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("h") => return Some(disambiguate_header(content)),
        Some("m") => return Some(disambiguate_m(content)),
        Some(ext) => {
            if let Some(lang) = BY_EXTENSION.get(ext) {
                return Some(lang);
            }
        }
        None => {}
    }

    from_shebang(content)
}

/// Language family for a label; unrecognised labels are `Unknown`
pub fn group_of(language: &str) -> LanguageGroup {
    GROUP_OF
        .get(language)
        .copied()
        .unwrap_or(LanguageGroup::Unknown)
}

/// Languages whose root-level files count as configuration
pub fn is_data_language(language: &str) -> bool {
    group_of(language) == LanguageGroup::Data
}

fn from_shebang(content: &[u8]) -> Option<&'static str> {
    let first_line = content.split(|b| *b == b'\n').next()?;
    let first_line = std::str::from_utf8(first_line).ok()?;
    let interpreter = SHEBANG.captures(first_line)?.get(1)?.as_str();
    BY_INTERPRETER.get(interpreter).copied()
}

fn disambiguate_header(content: &[u8]) -> &'static str {
    let text = String::from_utf8_lossy(content);
    if OBJC_MARKERS.is_match(&text) {
        "Objective-C"
    } else if CPP_MARKERS.is_match(&text) {
        "C++"
    } else {
        "C"
    }
}

fn disambiguate_m(content: &[u8]) -> &'static str {
    let text = String::from_utf8_lossy(content);
    if OBJC_MARKERS.is_match(&text) {
        "Objective-C"
    } else if MATLAB_MARKERS.is_match(&text) {
        "MATLAB"
    } else {
        "Objective-C"
    }
}
