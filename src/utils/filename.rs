//! Filesystem-safe file names for downloaded media

/// Title used when the API does not report one
pub const FALLBACK_TITLE: &str = "video";

/// Extension used when the chosen variant does not report one
pub const FALLBACK_EXTENSION: &str = "mp4";

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
///
/// The mapping is one character in, one character out, so the result has the same
/// number of characters as the input.
///
/// # Examples
/// ```
/// use clipfetch::utils::filename::sanitize_filename;
/// assert_eq!(sanitize_filename("My Video! (HD).mp4"), "My_Video___HD_.mp4");
/// assert_eq!(sanitize_filename("a/b\\c.webm"), "a_b_c.webm");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-' | '.' => c,
            _ => '_',
        })
        .collect()
}

/// Build `<title>.<extension>` and sanitize the whole thing.
pub fn media_filename(title: &str, extension: &str) -> String {
    let title = if title.is_empty() { FALLBACK_TITLE } else { title };
    let extension = if extension.is_empty() {
        FALLBACK_EXTENSION
    } else {
        extension
    };
    sanitize_filename(&format!("{}.{}", title, extension))
}
