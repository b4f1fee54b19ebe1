use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use path_engine::{
    error::GraphError,
    graphs::graph_factory::GraphFactory,
    report::comparison::{
        compare_searches, compare_traversals, summarize_traversals, SearchComparison,
        TraversalComparison,
    },
    utility::{format_distance, init_tracing},
    OutputFormat,
};
use serde_json::json;

/// Compares the weighted shortest path with the hop-minimal one
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph description in .json format
    #[arg(short, long)]
    graph: PathBuf,

    /// Source and target separated by a comma, may be repeated
    #[arg(short, long = "pair", value_parser = parse_pair, required = true)]
    pairs: Vec<(String, String)>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[arg(long)]
    debug: bool,
}

fn parse_pair(pair: &str) -> Result<(String, String), String> {
    match pair.split_once(',') {
        Some((source, target)) => Ok((source.trim().to_string(), target.trim().to_string())),
        None => Err(format!("expected SOURCE,TARGET but got {}", pair)),
    }
}

fn describe(path: &Option<Vec<String>>) -> String {
    path.as_ref()
        .map(|path| path.iter().join(" -> "))
        .unwrap_or_else(|| "no path".to_string())
}

fn print_table(searches: &SearchComparison<String>, traversals: &TraversalComparison<String>) {
    println!("{} -> {}", searches.source, searches.target);
    println!(
        "dijkstra  cost {:>10}  {}",
        format_distance(searches.dijkstra_cost),
        describe(&searches.dijkstra_path)
    );
    println!(
        "bfs       cost {:>10}  {}",
        format_distance(searches.bfs_cost),
        describe(&searches.bfs_path)
    );
    println!("weight saved by dijkstra: {}", searches.weight_saved);
    println!(
        "dfs  {:>3} hops {:>3} visited  {}",
        traversals.dfs_length,
        traversals.dfs_visited,
        describe(&traversals.dfs_path)
    );
    println!(
        "bfs  {:>3} hops {:>3} visited  {}",
        traversals.bfs_length,
        traversals.bfs_visited,
        describe(&traversals.bfs_path)
    );
    println!();
}

fn main() -> Result<(), GraphError> {
    let args = Args::parse();
    init_tracing(args.debug);

    let graph = GraphFactory::from_json_file(&args.graph)?;
    let mut searches = Vec::with_capacity(args.pairs.len());
    let mut traversals = Vec::with_capacity(args.pairs.len());
    for (source, target) in args.pairs.iter() {
        searches.push(compare_searches(&graph, source, target)?);
        traversals.push(compare_traversals(&graph, source, target)?);
    }
    let summary = summarize_traversals(&traversals);

    match args.format {
        OutputFormat::Json => {
            let report = json!({
                "searches": searches,
                "traversals": traversals,
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            for (searches, traversals) in searches.iter().zip(traversals.iter()) {
                print_table(searches, traversals);
            }
            println!(
                "bfs shorter in {}/{}, dfs shorter in {}/{}, equal in {}/{}",
                summary.bfs_shorter,
                summary.comparisons,
                summary.dfs_shorter,
                summary.comparisons,
                summary.equal_length,
                summary.comparisons
            );
            println!(
                "average visited vertices: dfs {:.1}, bfs {:.1}",
                summary.average_dfs_visited, summary.average_bfs_visited
            );
        }
    }

    Ok(())
}
