use std::fs::File;
use std::io::prelude::*;
use std::str::FromStr;

use crate::adjacency::AdjacencyMatrix;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::LabelMatrix;

/// Reads the whole input file. Trailing line terminators are dropped so that a
/// closing `>` followed by a newline is still recognised.
pub fn read_input_file(fname: &str) -> Result<String> {
    let mut fcontents = String::new();
    File::open(fname)
        .and_then(|mut file| file.read_to_string(&mut fcontents))
        .map_err(|source| Error::Io { path: fname.to_string(), source })?;
    let trimmed = fcontents.trim_end_matches(&['\r', '\n'][..]).len();
    fcontents.truncate(trimmed);
    log::debug!("read {} bytes from {}", fcontents.len(), fname);
    Ok(fcontents)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// bare cells, one row per line
    Matrix,
    /// cells with a label header row and column
    Labelled,
    /// flagser edge list
    Flag,
    /// undirected graphviz graph
    Dot,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "matrix" => Ok(OutputFormat::Matrix),
            "labelled" => Ok(OutputFormat::Labelled),
            "flag" => Ok(OutputFormat::Flag),
            "dot" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown format '{}', expected one of: matrix, labelled, flag, dot, json", s)),
        }
    }
}

pub fn write_adjacency<W: Write>(out: &mut W, m: &AdjacencyMatrix, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Matrix => write_matrix(out, m),
        OutputFormat::Labelled => write_labelled(out, m),
        OutputFormat::Flag => write_flag(out, m),
        OutputFormat::Dot => write_dot(out, m),
        OutputFormat::Json => write_json(out, m),
    }
}

pub fn save_adjacency(fname: &str, m: &AdjacencyMatrix, format: OutputFormat) -> Result<()> {
    let mut file = File::create(fname).map_err(|source| Error::Io { path: fname.to_string(), source })?;
    write_adjacency(&mut file, m, format)?;
    file.flush()?;
    Ok(())
}

pub fn write_matrix<W: Write>(out: &mut W, m: &AdjacencyMatrix) -> Result<()> {
    write!(out, "{}", m)?;
    Ok(())
}

pub fn write_labelled<W: Write>(out: &mut W, m: &AdjacencyMatrix) -> Result<()> {
    let labels: Vec<&str> = m.labels().collect();
    writeln!(out, "\t{}", labels.join("\t"))?;
    for (label, row) in labels.iter().zip(m.rows()) {
        let cells: Vec<&str> = row.iter().map(|c| c.as_str()).collect();
        writeln!(out, "{}\t{}", label, cells.join("\t"))?;
    }
    Ok(())
}

/// flagser layout: one vertex weight per label, then every edge once
pub fn write_flag<W: Write>(out: &mut W, m: &AdjacencyMatrix) -> Result<()> {
    let mut content = "dim 0:\n".to_string();
    content += &("1 ".repeat(m.dim()).trim_end().to_owned() + "\n"); // add vertices
    content += "dim 1:\n";
    for [i, j] in m.graph().edges() {
        content += &format!("{} {} 1\n", i, j);
    }
    out.write_all(content.as_bytes())?;
    Ok(())
}

fn dot_quote(label: &str) -> String {
    format!("\"{}\"", label.replace('\\', "\\\\").replace('"', "\\\""))
}

pub fn write_dot<W: Write>(out: &mut W, m: &AdjacencyMatrix) -> Result<()> {
    let labels: Vec<&str> = m.labels().collect();
    writeln!(out, "graph {{")?;
    for label in &labels {
        writeln!(out, "    {};", dot_quote(label))?;
    }
    for [i, j] in m.edges() {
        writeln!(out, "    {} -- {};", dot_quote(labels[i as usize]), dot_quote(labels[j as usize]))?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, m: &AdjacencyMatrix) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &m.report())?;
    writeln!(out)?;
    Ok(())
}

/// The parsed rows: the bracket notation, then one row per line.
pub fn write_label_matrix<W: Write>(out: &mut W, matrix: &LabelMatrix) -> Result<()> {
    writeln!(out, "Matrix:")?;
    writeln!(out, "{}", crate::format::render(matrix))?;
    writeln!(out, "-------")?;
    for row in matrix {
        writeln!(out, "{:?}", row)?;
    }
    Ok(())
}


/// A traversal order on one line: `dfs a: a b c`.
pub fn write_order<W: Write>(out: &mut W, name: &str, start: &str, order: &[&str]) -> Result<()> {
    writeln!(out, "{} {}: {}", name, start, order.join(" "))?;
    Ok(())
}

fn level_str(level: Option<usize>) -> String {
    match level {
        Some(l) => l.to_string(),
        None => "-1".to_string(),
    }
}

/// One `label: level` line per label, `-1` where unreachable.
pub fn write_levels<W: Write>(out: &mut W, levels: &[(&str, Option<usize>)]) -> Result<()> {
    for (label, level) in levels {
        writeln!(out, "{}: {}", label, level_str(*level))?;
    }
    Ok(())
}

pub fn write_components<W: Write>(out: &mut W, m: &AdjacencyMatrix) -> Result<()> {
    let components = m.components();
    writeln!(out, "{}", if components.len() <= 1 { "connected" } else { "not connected" })?;
    for (i, c) in components.iter().enumerate() {
        writeln!(out, "component {}: {}", i + 1, c.join(" "))?;
    }
    Ok(())
}

/// Hop distances as a labelled table, `-1` where unreachable.
pub fn write_distances<W: Write>(out: &mut W, m: &AdjacencyMatrix) -> Result<()> {
    let labels: Vec<&str> = m.labels().collect();
    writeln!(out, "\t{}", labels.join("\t"))?;
    for (label, row) in labels.iter().zip(m.distances()) {
        let cells: Vec<String> = row.into_iter().map(level_str).collect();
        writeln!(out, "{}\t{}", label, cells.join("\t"))?;
    }
    Ok(())
}


#[cfg(test)]
fn written(m: &AdjacencyMatrix, format: OutputFormat) -> String {
    let mut out = vec![];
    write_adjacency(&mut out, m, format).unwrap();
    String::from_utf8(out).unwrap()
}

#[cfg(test)]
fn sample() -> AdjacencyMatrix {
    crate::adjacency_from_str("<{a,b},{b,c}>", crate::BracePolicy::Strict).unwrap()
}

#[test]
fn test_read_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, "<{a,b},{b,c}>\r\n").unwrap();
    let text = read_input_file(path.to_str().unwrap()).unwrap();
    assert_eq!(text, "<{a,b},{b,c}>");

    std::fs::write(&path, "").unwrap();
    assert_eq!(read_input_file(path.to_str().unwrap()).unwrap(), "");
}

#[test]
fn test_read_input_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.txt");
    match read_input_file(path.to_str().unwrap()) {
        Err(Error::Io { path: p, source }) => {
            assert!(p.ends_with("nope.txt"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_format_from_str() {
    assert_eq!("matrix".parse::<OutputFormat>(), Ok(OutputFormat::Matrix));
    assert_eq!("dot".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
    assert!("csv".parse::<OutputFormat>().is_err());
}

#[test]
fn test_write_matrix() {
    assert_eq!(written(&sample(), OutputFormat::Matrix), "X 1 0\n1 X 1\n0 1 X\n");
}

#[test]
fn test_write_labelled() {
    assert_eq!(written(&sample(), OutputFormat::Labelled),
        "\ta\tb\tc\na\tX\t1\t0\nb\t1\tX\t1\nc\t0\t1\tX\n");
}

#[test]
fn test_write_flag() {
    assert_eq!(written(&sample(), OutputFormat::Flag), "dim 0:\n1 1 1\ndim 1:\n0 1 1\n1 2 1\n");
}

#[test]
fn test_write_dot() {
    let m = crate::adjacency_from_str("<{a,\"q\"}>", crate::BracePolicy::Strict).unwrap();
    assert_eq!(written(&m, OutputFormat::Dot),
        "graph {\n    \"\\\"q\\\"\";\n    \"a\";\n    \"\\\"q\\\"\" -- \"a\";\n}\n");
}

#[test]
fn test_write_json() {
    let json: serde_json::Value = serde_json::from_str(&written(&sample(), OutputFormat::Json)).unwrap();
    assert_eq!(json["labels"], serde_json::json!(["a", "b", "c"]));
    assert_eq!(json["matrix"][1], serde_json::json!(["1", "X", "1"]));
}

#[test]
fn test_save_adjacency() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.flag");
    save_adjacency(path.to_str().unwrap(), &sample(), OutputFormat::Flag).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), written(&sample(), OutputFormat::Flag));
}

#[test]
fn test_write_label_matrix() {
    let mut out = vec![];
    let matrix = vec![vec!["x".to_string(), "y".to_string()]];
    write_label_matrix(&mut out, &matrix).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Matrix:\n<{x,y}>\n-------\n[\"x\", \"y\"]\n");
}

#[cfg(test)]
fn captured<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
    let mut out = vec![];
    f(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_write_traversals() {
    let m = crate::adjacency_from_str("<{a,b},{b,c},{d}>", crate::BracePolicy::Strict).unwrap();
    let order = m.dfs("c").unwrap();
    assert_eq!(captured(|out| write_order(out, "dfs", "c", &order)), "dfs c: c b a d\n");
    let levels = m.levels("a").unwrap();
    assert_eq!(captured(|out| write_levels(out, &levels)), "a: 0\nb: 1\nc: 2\nd: -1\n");
    assert_eq!(captured(|out| write_components(out, &m)),
        "not connected\ncomponent 1: a b c\ncomponent 2: d\n");
    assert_eq!(captured(|out| write_distances(out, &m)),
        "\ta\tb\tc\td\na\t0\t1\t2\t-1\nb\t1\t0\t1\t-1\nc\t2\t1\t0\t-1\nd\t-1\t-1\t-1\t0\n");
}

#[test]
fn test_write_components_connected() {
    let m = sample();
    assert_eq!(captured(|out| write_components(out, &m)), "connected\ncomponent 1: a b c\n");
}
