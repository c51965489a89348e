use apollo_parser::cst::CstNode;

/// Whitespace, commas, comments and the byte order mark carry no meaning.
pub(super) fn is_ignored(text: &str) -> bool {
    text == ","
        || text.starts_with('#')
        || text
            .chars()
            .all(|c| c.is_whitespace() || c == '\u{feff}')
}

/// Source text of `node` with every ignored token left out.
pub(super) fn significant_text(node: &impl CstNode) -> String {
    node.syntax()
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !is_ignored(token.text()))
        .map(|token| token.text().to_string())
        .collect()
}

pub(super) fn start_offset(node: &impl CstNode) -> usize {
    usize::from(node.syntax().text_range().start())
}
