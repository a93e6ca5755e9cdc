use crate::error::{Error, Result};
use crate::LabelMatrix;

/// What to do with a `{` that is never closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BracePolicy {
    /// report it as [`Error::UnmatchedBrace`]
    Strict,
    /// drop it (and everything after it) with a warning
    Lenient,
}

/// Parses the bracket notation `<{a,b},{c}>` into rows of labels.
///
/// An unmatched `{` is an error.
/// ```
/// use label_adjacency::format::parse;
/// let m = parse("<{a,b},{b,c}>").unwrap();
/// assert_eq!(m, vec![vec!["a", "b"], vec!["b", "c"]]);
/// assert!(parse("<{a,b},{c>").is_err());
/// ```
pub fn parse(raw: &str) -> Result<LabelMatrix> {
    parse_with(raw, BracePolicy::Strict)
}

/// Like [`parse`], but an unmatched `{` only ends the scan.
/// ```
/// use label_adjacency::format::parse_lenient;
/// assert_eq!(parse_lenient("<{a,b},{c>"), vec![vec!["a", "b"]]);
/// ```
pub fn parse_lenient(raw: &str) -> LabelMatrix {
    // the lenient scan has no error path
    parse_with(raw, BracePolicy::Lenient).unwrap_or_default()
}

pub fn parse_with(raw: &str, policy: BracePolicy) -> Result<LabelMatrix> {
    // one `<` and one `>` at most, missing ones are fine
    let lead = if raw.starts_with('<') { 1 } else { 0 };
    let body = &raw[lead..];
    let body = body.strip_suffix('>').unwrap_or(body);

    let mut matrix = vec![];
    let mut pos = 0;
    while let Some(open) = body[pos..].find('{') {
        let start = pos + open + 1;
        match body[start..].find('}') {
            Some(len) => {
                matrix.push(split_row(&body[start..start + len]));
                pos = start + len + 1;
            }
            None => {
                let offset = lead + pos + open;
                match policy {
                    BracePolicy::Strict => return Err(Error::UnmatchedBrace { offset }),
                    BracePolicy::Lenient => {
                        log::warn!("skipping unmatched '{{' at byte {}", offset);
                        break;
                    }
                }
            }
        }
    }
    log::debug!("parsed {} rows", matrix.len());
    Ok(matrix)
}

fn split_row(group: &str) -> Vec<String> {
    if group.is_empty() {
        return vec![];
    }
    group.split(',').map(String::from).collect()
}

/// Writes a matrix back in the bracket notation.
///
/// Reading the result with [`parse`] gives `matrix` back, except that a row
/// holding only the empty label, `[""]`, is written as `{}` and so reads back
/// as an empty row. Labels containing `{`, `}` or `,` do not survive either.
/// ```
/// use label_adjacency::format::render;
/// let m = vec![vec!["a".to_string(), "b".to_string()], vec![]];
/// assert_eq!(render(&m), "<{a,b},{}>");
/// ```
pub fn render(matrix: &LabelMatrix) -> String {
    let groups: Vec<String> = matrix.iter().map(|row| format!("{{{}}}", row.join(","))).collect();
    format!("<{}>", groups.join(","))
}


#[cfg(test)]
fn rows(m: &[&[&str]]) -> LabelMatrix {
    m.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect()
}

#[test]
fn test_parse_rows_in_order() {
    let m = parse("<{a,b},{b,c}>").unwrap();
    assert_eq!(m, rows(&[&["a", "b"], &["b", "c"]]));

    let m = parse("<{x,y,x}>").unwrap();
    assert_eq!(m, rows(&[&["x", "y", "x"]]));

    // no separator needed between groups
    let m = parse("<{a}{b}{c,d}>").unwrap();
    assert_eq!(m, rows(&[&["a"], &["b"], &["c", "d"]]));
}

#[test]
fn test_parse_angle_brackets_optional() {
    let expected = rows(&[&["a", "b"]]);
    assert_eq!(parse("{a,b}").unwrap(), expected);
    assert_eq!(parse("<{a,b}").unwrap(), expected);
    assert_eq!(parse("{a,b}>").unwrap(), expected);
    // only one of each is stripped, the rest is outside any group
    assert_eq!(parse("<<{a,b}>>").unwrap(), expected);
}

#[test]
fn test_parse_empty() {
    assert_eq!(parse("").unwrap(), LabelMatrix::new());
    assert_eq!(parse("<>").unwrap(), LabelMatrix::new());
    assert_eq!(parse("<{}>").unwrap(), vec![Vec::<String>::new()]);
    assert_eq!(parse("<{},{a}>").unwrap(), rows(&[&[], &["a"]]));
}

#[test]
fn test_parse_keeps_empty_and_untrimmed_labels() {
    assert_eq!(parse("<{a,,b}>").unwrap(), rows(&[&["a", "", "b"]]));
    assert_eq!(parse("<{a,}>").unwrap(), rows(&[&["a", ""]]));
    assert_eq!(parse("<{,}>").unwrap(), rows(&[&["", ""]]));
    assert_eq!(parse("<{ a , b}>").unwrap(), rows(&[&[" a ", " b"]]));
}

#[test]
fn test_parse_nested_open_brace_is_text() {
    // scanning resumes after the `}` that closed the group
    assert_eq!(parse("<{a{b},{c}>").unwrap(), rows(&[&["a{b"], &["c"]]));
    // stray closing braces and separators are ignored
    assert_eq!(parse("<},{a}, }>").unwrap(), rows(&[&["a"]]));
}

#[test]
fn test_parse_unmatched_brace() {
    match parse("<{a,b},{c>") {
        Err(Error::UnmatchedBrace { offset }) => assert_eq!(offset, 7),
        other => panic!("expected unmatched brace, got {:?}", other),
    }
    match parse("{c") {
        Err(Error::UnmatchedBrace { offset }) => assert_eq!(offset, 0),
        other => panic!("expected unmatched brace, got {:?}", other),
    }
}

#[test]
fn test_parse_lenient_skips_unmatched() {
    assert_eq!(parse_lenient("<{a,b},{c>"), rows(&[&["a", "b"]]));
    assert_eq!(parse_lenient("<{c>"), LabelMatrix::new());
    assert_eq!(parse_lenient("<{a}>"), parse("<{a}>").unwrap());
}

#[test]
fn test_render_roundtrip() {
    let m = rows(&[&["a", "b"], &[], &["", "c", ""], &["x y"]]);
    let text = render(&m);
    assert_eq!(text, "<{a,b},{},{,c,},{x y}>");
    assert_eq!(parse(&text).unwrap(), m);
    assert_eq!(render(&LabelMatrix::new()), "<>");
}

#[test]
fn test_render_lone_empty_label_reads_back_empty() {
    let m = rows(&[&[""], &["a"]]);
    let text = render(&m);
    assert_eq!(text, "<{},{a}>");
    assert_eq!(parse(&text).unwrap(), rows(&[&[], &["a"]]));
}
