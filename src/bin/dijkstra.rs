use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use path_engine::{
    error::GraphError,
    graphs::graph_factory::GraphFactory,
    search::{
        dijkstra::{shortest_path, shortest_paths},
        path::route_segments,
    },
    utility::{format_distance, init_tracing},
    OutputFormat,
};
use tracing::info;

/// Shortest paths from one vertex of a weighted graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph description in .json format
    #[arg(short, long)]
    graph: PathBuf,

    #[arg(short, long)]
    source: String,

    /// Only search the path to this vertex
    #[arg(short, long)]
    target: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), GraphError> {
    let args = Args::parse();
    init_tracing(args.debug);

    let graph = GraphFactory::from_json_file(&args.graph)?;
    info!(
        vertices = graph.vertices().count(),
        source = %args.source,
        "searching shortest paths"
    );

    match &args.target {
        Some(target) => {
            let path = shortest_path(&graph, &args.source, target)?;
            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&path)?),
                OutputFormat::Table => match path {
                    Some(path) => {
                        println!("{}", path.vertices.iter().join(" -> "));
                        let segments = route_segments(&graph, &path.vertices)?.unwrap_or_default();
                        for segment in segments {
                            println!(
                                "{:>12} -> {:<12} {:>10} {:>10}",
                                segment.from, segment.to, segment.weight, segment.cumulative_weight
                            );
                        }
                        println!("total {}", format_distance(path.distance));
                    }
                    None => println!("{} is not reachable from {}", target, args.source),
                },
            }
        }
        None => {
            let paths = shortest_paths(&graph, &args.source)?;
            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&paths)?),
                OutputFormat::Table => {
                    for (vertex, &distance) in paths.distances.iter() {
                        let route = paths
                            .path(vertex)
                            .map(|path| path.vertices.iter().join(" -> "))
                            .unwrap_or_else(|| "-".to_string());
                        println!("{:<16} {:>10} {}", vertex, format_distance(distance), route);
                    }
                }
            }
        }
    }

    Ok(())
}
