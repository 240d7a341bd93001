//! Mapping from user-facing language names to the compiler service's
//! language codes. Unknown names pass through unchanged, matching the
//! service's own tags.

/// Language code that is executed by the local interpreter instead of the
/// remote compiler service.
pub const LOCAL_INTERPRETER: &str = "python3";

pub fn resolve(language: &str) -> String {
    let code = match language.to_ascii_lowercase().as_str() {
        "python" | "python3" => "python3",
        "python2" => "python2",
        "c" => "c",
        "c++" | "cpp" => "cpp17",
        "java" => "java",
        "javascript" | "nodejs" | "node" => "nodejs",
        "c#" | "csharp" => "csharp",
        "go" | "golang" => "go",
        "rust" => "rust",
        "php" => "php",
        "ruby" => "ruby",
        "swift" => "swift",
        "kotlin" => "kotlin",
        "scala" => "scala",
        "r" => "r",
        "bash" | "sh" => "bash",
        "sql" => "sql",
        "pascal" => "pascal",
        "haskell" => "haskell",
        "perl" => "perl",
        _ => return language.to_string(),
    };
    code.to_string()
}
