use std::collections::HashSet;

/// Strips all HTML markup from a free-text form field using the ammonia library.
///
/// Identity fields (name, class) are echoed back on the feedback page, so the
/// stored values must be plain text. With an empty tag whitelist ammonia drops
/// every tag, including <script> with its content, and keeps only the text.
///
/// Note: the surviving text is entity-encoded the way ammonia emits it
/// (e.g. `&` becomes `&amp;`). Clients rendering into HTML can use it as is.
pub fn strip_markup(input: &str) -> String {
    ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(input)
        .to_string()
}
