//! Folding queued reference texts into an outgoing message body.

/// Combine queued reference texts and typed content into one prompt.
///
/// Each reference becomes a labeled block, blocks are joined by a blank
/// line, and a `---` separator divides them from the typed content:
///
/// ```text
/// [Reference 1]
/// <text>
///
/// [Reference 2]
/// <text>
///
/// ---
///
/// <typed content>
/// ```
pub fn compose_with_references(references: &[String], content: &str) -> String {
    if references.is_empty() {
        return content.to_string();
    }

    let references_section = references
        .iter()
        .enumerate()
        .map(|(index, text)| format!("[Reference {}]\n{}", index + 1, text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n---\n\n{}", references_section, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_references_passes_content_through() {
        assert_eq!(compose_with_references(&[], "hello"), "hello");
    }

    #[test]
    fn test_single_reference() {
        let refs = vec!["quoted".to_string()];
        assert_eq!(
            compose_with_references(&refs, "question"),
            "[Reference 1]\nquoted\n\n---\n\nquestion"
        );
    }

    #[test]
    fn test_references_are_numbered_in_order() {
        let refs = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            compose_with_references(&refs, "c"),
            "[Reference 1]\na\n\n[Reference 2]\nb\n\n---\n\nc"
        );
    }
}
