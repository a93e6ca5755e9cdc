// Authors: "label-adjacency contributors"
use label_adjacency::*;
use label_adjacency::io::{self, OutputFormat};

use clap::Parser;
use std::io::Write;

/// Co-occurrence adjacency matrix of the labels in a `<{a,b},{b,c}>` file
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// input file location
    input: String,

    /// second argument, accepted but not used
    context: String,

    /// output format: matrix, labelled, flag, dot or json
    #[clap(short, long, default_value = "matrix")]
    format: OutputFormat,

    /// write the adjacency output to this file instead of stdout
    #[clap(short, long)]
    output: Option<String>,

    /// skip an unclosed '{' instead of failing
    #[clap(long)]
    lenient: bool,

    /// also print the parsed label matrix
    #[clap(long)]
    show_matrix: bool,


    // Graph queries, printed after the matrix
    /// depth first order starting at this label
    #[clap(long, value_name = "LABEL")]
    dfs: Option<String>,

    /// breadth first order starting at this label
    #[clap(long, value_name = "LABEL")]
    bfs: Option<String>,

    /// hop distance from this label to every label (-1: unreachable)
    #[clap(long, value_name = "LABEL")]
    levels: Option<String>,

    /// connected components
    #[clap(long)]
    components: bool,

    /// hop distances between all labels (-1: unreachable)
    #[clap(long)]
    distances: bool,


    /// debug logging
    #[clap(short, long)]
    verbose: bool,

    /// errors only
    #[clap(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn unknown(label: &str) -> Error {
    Error::UnknownLabel(label.to_string())
}

fn run<W: Write>(args: &Args, out: &mut W) -> label_adjacency::Result<()> {
    log::debug!("ignoring second argument {:?}", args.context);

    let raw = io::read_input_file(&args.input)?;
    let policy = if args.lenient { BracePolicy::Lenient } else { BracePolicy::Strict };
    let matrix = format::parse_with(&raw, policy)?;
    let graph = build(&matrix);

    if args.show_matrix {
        io::write_label_matrix(out, &matrix)?;
    }
    match &args.output {
        Some(fname) => io::save_adjacency(fname, &graph, args.format)?,
        None => io::write_adjacency(out, &graph, args.format)?,
    }

    if let Some(start) = &args.dfs {
        let order = graph.dfs(start).ok_or_else(|| unknown(start))?;
        io::write_order(out, "dfs", start, &order)?;
    }
    if let Some(start) = &args.bfs {
        let order = graph.bfs(start).ok_or_else(|| unknown(start))?;
        io::write_order(out, "bfs", start, &order)?;
    }
    if let Some(start) = &args.levels {
        let levels = graph.levels(start).ok_or_else(|| unknown(start))?;
        io::write_levels(out, &levels)?;
    }
    if args.components {
        io::write_components(out, &graph)?;
    }
    if args.distances {
        io::write_distances(out, &graph)?;
    }
    return Ok(());
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)?;
    out.flush()?;
    Ok(())
}


#[cfg(test)]
fn run_on(input: &str, extra: &[&str]) -> (String, label_adjacency::Result<()>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, input).unwrap();
    let mut argv = vec!["adjacency".to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    argv.push(path.to_str().unwrap().to_string());
    argv.push("unused".to_string());
    let args = Args::try_parse_from(argv).unwrap();
    let mut out = vec![];
    let res = run(&args, &mut out);
    (String::from_utf8(out).unwrap(), res)
}

#[test]
fn test_args() {
    let args = Args::try_parse_from(["adjacency", "in.txt", "unused"]).unwrap();
    assert_eq!(args.input, "in.txt");
    assert_eq!(args.context, "unused");
    assert_eq!(args.format, OutputFormat::Matrix);
    assert!(!args.lenient && !args.show_matrix && args.output.is_none());
    assert!(args.dfs.is_none() && args.bfs.is_none() && !args.components);

    let args = Args::try_parse_from(["adjacency", "-f", "dot", "--lenient", "--dfs", "a", "in.txt", "x"]).unwrap();
    assert_eq!(args.format, OutputFormat::Dot);
    assert!(args.lenient);
    assert_eq!(args.dfs.as_deref(), Some("a"));
}

#[test]
fn test_args_wrong_count() {
    assert!(Args::try_parse_from(["adjacency"]).is_err());
    assert!(Args::try_parse_from(["adjacency", "in.txt"]).is_err());
    assert!(Args::try_parse_from(["adjacency", "in.txt", "a", "b"]).is_err());
    assert!(Args::try_parse_from(["adjacency", "-f", "csv", "in.txt", "a"]).is_err());
}

#[test]
fn test_run_prints_matrix() {
    let (out, res) = run_on("<{x,y,x}>\n", &[]);
    res.unwrap();
    assert_eq!(out, "X 1\n1 X\n");
}

#[test]
fn test_run_show_matrix_comes_first() {
    let (out, res) = run_on("<{a,b},{b,c}>", &["--show-matrix"]);
    res.unwrap();
    assert_eq!(out, "Matrix:\n<{a,b},{b,c}>\n-------\n[\"a\", \"b\"]\n[\"b\", \"c\"]\nX 1 0\n1 X 1\n0 1 X\n");
}

#[test]
fn test_run_missing_input() {
    let args = Args::try_parse_from(["adjacency", "/nonexistent/input.txt", "x"]).unwrap();
    let mut out = vec![];
    match run(&args, &mut out) {
        Err(e @ Error::Io { .. }) => assert!(e.to_string().contains("/nonexistent/input.txt")),
        other => panic!("expected io error, got {:?}", other),
    }
    assert!(out.is_empty());
}

#[test]
fn test_run_unmatched_brace() {
    let (out, res) = run_on("<{a,b},{c>", &[]);
    assert!(matches!(res, Err(Error::UnmatchedBrace { offset: 7 })));
    assert!(out.is_empty());

    let (out, res) = run_on("<{a,b},{c>", &["--lenient"]);
    res.unwrap();
    assert_eq!(out, "X 1\n1 X\n");
}

#[test]
fn test_run_graph_queries() {
    let (out, res) = run_on("<{a,b},{b,c},{d}>",
        &["--dfs", "c", "--bfs", "a", "--levels", "a", "--components"]);
    res.unwrap();
    assert_eq!(out, "X 1 0 0\n1 X 1 0\n0 1 X 0\n0 0 0 X\n\
        dfs c: c b a d\n\
        bfs a: a b c d\n\
        a: 0\nb: 1\nc: 2\nd: -1\n\
        not connected\ncomponent 1: a b c\ncomponent 2: d\n");

    let (_, res) = run_on("<{a,b}>", &["--dfs", "z"]);
    assert!(matches!(res, Err(Error::UnknownLabel(l)) if l == "z"));
}

#[test]
fn test_run_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.json");
    let (out, res) = run_on("<{a,b}>", &["-f", "json", "-o", target.to_str().unwrap()]);
    res.unwrap();
    assert!(out.is_empty());
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(json["labels"], serde_json::json!(["a", "b"]));
}
