pub mod error;
pub use error::{Error, Result};

pub mod format;
pub mod graph;
pub mod adjacency;
pub mod io;

pub use adjacency::{build, AdjacencyMatrix, Cell, LabelUniverse};
pub use format::{parse, parse_lenient, BracePolicy};

pub type Label = String;

/// rows of labels in source order, one row per `{...}` group
pub type LabelMatrix = Vec<Vec<Label>>;

/// Parses `raw` with `policy` and builds its adjacency matrix.
/// ```
/// use label_adjacency::*;
/// let m = adjacency_from_str("<{a,b},{b,c}>", BracePolicy::Strict).unwrap();
/// assert_eq!(m.to_string(), "X 1 0\n1 X 1\n0 1 X\n");
/// ```
pub fn adjacency_from_str(raw: &str, policy: BracePolicy) -> Result<AdjacencyMatrix> {
    let matrix = format::parse_with(raw, policy)?;
    Ok(build(&matrix))
}


#[test]
fn test_pipeline_idempotent() {
    let raw = "<{d,a},{b,c,a},{e},{c,,d}>";
    let first = adjacency_from_str(raw, BracePolicy::Strict).unwrap();
    let second = adjacency_from_str(raw, BracePolicy::Strict).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_pipeline_policies() {
    assert!(matches!(adjacency_from_str("<{a,b},{c>", BracePolicy::Strict), Err(Error::UnmatchedBrace { offset: 7 })));
    let m = adjacency_from_str("<{a,b},{c>", BracePolicy::Lenient).unwrap();
    assert_eq!(m.labels().collect::<Vec<_>>(), vec!["a", "b"]);
}
