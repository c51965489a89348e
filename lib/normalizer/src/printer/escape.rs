/// Writes `value` as a regular, double-quoted string literal.
///
/// Only the characters that cannot appear raw are escaped. Everything else,
/// supplementary-plane characters included, is written as-is.
pub(crate) fn write_quoted(buffer: &mut String, value: &str) {
    buffer.reserve(value.len() + 2);
    buffer.push('"');
    for c in value.chars() {
        match c {
            '\u{8}' => buffer.push_str(r"\b"),
            '\t' => buffer.push_str(r"\t"),
            '\n' => buffer.push_str(r"\n"),
            '\u{c}' => buffer.push_str(r"\f"),
            '\r' => buffer.push_str(r"\r"),
            '"' => buffer.push_str("\\\""),
            '\\' => buffer.push_str(r"\\"),
            '\u{0}'..='\u{7}' | '\u{b}' | '\u{e}'..='\u{1f}' | '\u{7f}'..='\u{9f}' => {
                buffer.push_str(&format!("\\u{:04X}", c as u32));
            }
            _ => buffer.push(c),
        }
    }
    buffer.push('"');
}

/// Writes `value` as a `"""` block string, in its most compact form that
/// still reads back to the same value.
pub(crate) fn write_block_string(buffer: &mut String, value: &str) {
    let escaped = value.replace(r#"""""#, r#"\""""#);
    let lines = split_lines(&escaped);

    let force_leading_newline = lines.len() > 1
        && lines[1..]
            .iter()
            .all(|line| line.is_empty() || line.starts_with([' ', '\t']));
    let has_trailing_triple_quotes = escaped.ends_with(r#"\""""#);
    let has_trailing_quote = value.ends_with('"') && !has_trailing_triple_quotes;
    let force_trailing_newline = has_trailing_quote || value.ends_with('\\');

    buffer.push_str(r#"""""#);
    if force_leading_newline {
        buffer.push('\n');
    }
    buffer.push_str(&escaped);
    if force_trailing_newline {
        buffer.push('\n');
    }
    buffer.push_str(r#"""""#);
}

/// Splits on `\r\n`, `\n` and `\r`, the line terminators of GraphQL source.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = vec![];
    let mut rest = text;
    while let Some(end) = rest.find(['\r', '\n']) {
        lines.push(&rest[..end]);
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
    }
    lines.push(rest);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(value: &str) -> String {
        let mut buffer = String::new();
        write_quoted(&mut buffer, value);
        buffer
    }

    #[test]
    fn escapes_named_control_characters() {
        assert_eq!(quoted("a\u{8}b\tc\nd\u{c}e\rf"), r#""a\bb\tc\nd\fe\rf""#);
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(quoted(r#"say "hi" \o/"#), r#""say \"hi\" \\o/""#);
    }

    #[test]
    fn escapes_other_control_characters_as_code_points() {
        assert_eq!(quoted("\u{0}"), r#""\u0000""#);
        assert_eq!(quoted("\u{b}"), r#""\u000B""#);
        assert_eq!(quoted("\u{1f}"), r#""\u001F""#);
        assert_eq!(quoted("\u{7f}"), r#""\u007F""#);
        assert_eq!(quoted("\u{9f}"), r#""\u009F""#);
    }

    #[test]
    fn keeps_unicode_literal() {
        assert_eq!(quoted("caf\u{e9} \u{1F600}"), "\"caf\u{e9} \u{1F600}\"");
        assert_eq!(quoted("\u{a0}"), "\"\u{a0}\"");
    }

    #[test]
    fn splits_on_every_line_terminator() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn block_string_forms() {
        let block = |value: &str| {
            let mut buffer = String::new();
            write_block_string(&mut buffer, value);
            buffer
        };

        assert_eq!(block("hello"), r#""""hello""""#);
        assert_eq!(block(r#"a """ b"#), r#""""a \""" b""""#);
        assert_eq!(block("ends with \""), "\"\"\"ends with \"\n\"\"\"");
        assert_eq!(block("a\n  b"), "\"\"\"\na\n  b\"\"\"");
    }
}
