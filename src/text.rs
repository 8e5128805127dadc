//! Text post-processing for translated strings.

/// What: Remove the common leading whitespace from every line of `text`.
///
/// Inputs:
/// - `text`: Possibly indented multi-line text
///
/// Output:
/// - Dedented text; line endings are preserved
///
/// Details:
/// - Lines made only of spaces and tabs are emptied and ignored when the margin
///   is computed.
/// - The margin is a literal prefix, so a tab and a run of spaces never match.
#[must_use]
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for (line, _) in text.split_inclusive('\n').map(split_ending) {
        let content = line.trim_start_matches([' ', '\t']);
        if content.is_empty() {
            continue;
        }
        let indent = &line[..line.len() - content.len()];
        margin = Some(margin.map_or(indent, |m| common_prefix(m, indent)));
    }
    let margin = margin.unwrap_or("");

    let mut out = String::with_capacity(text.len());
    for (line, ending) in text.split_inclusive('\n').map(split_ending) {
        if !line.trim_start_matches([' ', '\t']).is_empty() {
            out.push_str(line.strip_prefix(margin).unwrap_or(line));
        }
        out.push_str(ending);
    }
    out
}

/// Split a line into its text and its `\n` or `\r\n` terminator.
fn split_ending(line: &str) -> (&str, &str) {
    line.strip_suffix("\r\n")
        .map(|text| (text, "\r\n"))
        .or_else(|| line.strip_suffix('\n').map(|text| (text, "\n")))
        .unwrap_or((line, ""))
}

/// Longest shared prefix of two indentation strings.
fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
