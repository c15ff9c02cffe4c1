/// Utility functions for working with PHP class names.
///
/// Class names travel through the generator in two spellings: registry keys
/// without a leading `\` (`App\Models\User`) and absolute names with one
/// (`\App\Models\User`) for anything rendered into a stub.

/// The last segment of a namespace-qualified name.
///
/// `"Illuminate\\Support\\Facades\\DB"` → `"DB"`.
pub fn short_name(name: &str) -> &str {
    let name = name.trim_start_matches('\\');
    name.rsplit('\\').next().unwrap_or(name)
}

/// The namespace portion of a qualified name, empty for the root namespace.
///
/// `"Illuminate\\Support\\Facades\\DB"` → `"Illuminate\\Support\\Facades"`.
pub fn namespace_of(name: &str) -> &str {
    let name = name.trim_start_matches('\\');
    match name.rfind('\\') {
        Some(pos) => &name[..pos],
        None => "",
    }
}

/// Normalise a class name to registry form (no leading `\`).
pub fn normalize_class_name(name: &str) -> &str {
    name.trim().trim_start_matches('\\')
}

/// Normalise a class name to absolute form (exactly one leading `\`).
pub fn absolute_class_name(name: &str) -> String {
    format!("\\{}", normalize_class_name(name))
}
