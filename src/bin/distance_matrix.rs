use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use path_engine::{
    error::GraphError,
    graphs::graph_factory::GraphFactory,
    report::{
        centrality::Centrality,
        distance_matrix::DistanceMatrix,
        statistics::{GraphSummary, PathStatistics},
    },
    utility::{format_distance, get_progressbar, init_tracing},
    OutputFormat,
};
use serde_json::json;
use tracing::info;

/// All-pairs shortest distances of a weighted graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph description in .json format
    #[arg(short, long)]
    graph: PathBuf,

    /// Write the json report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), GraphError> {
    let args = Args::parse();
    init_tracing(args.debug);

    let graph = GraphFactory::from_json_file(&args.graph)?;
    let bar = get_progressbar("distance matrix", graph.vertices().count() as u64);
    let matrix = DistanceMatrix::with_progress(&graph, bar)?;
    let statistics = PathStatistics::new(&matrix);
    let summary = GraphSummary::with_matrix(&graph, &matrix);
    let centrality = Centrality::with_matrix(&graph, &matrix)?;
    let report = json!({
        "matrix": matrix,
        "statistics": statistics,
        "summary": summary,
        "centrality": centrality,
    });

    if let Some(output) = &args.output {
        let writer = BufWriter::new(File::create(output)?);
        serde_json::to_writer_pretty(writer, &report)?;
        info!(path = %output.display(), "wrote report");
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print!("{:<12}", "");
            for vertex in matrix.vertices() {
                print!(" {:>8}", vertex);
            }
            println!();
            for source in matrix.vertices() {
                print!("{:<12}", source);
                for &distance in matrix.row(source)? {
                    print!(" {:>8}", format_distance(distance));
                }
                println!();
            }

            println!();
            println!(
                "{} vertices, {} edges, average degree {:.2}, density {:.3}",
                summary.number_of_vertices,
                summary.number_of_edges,
                summary.average_degree,
                summary.density
            );
            if let (Some(diameter), Some(radius)) = (summary.diameter, summary.radius) {
                println!("weighted diameter {}, radius {}", diameter, radius);
            }
            if let (Some(diameter), Some(radius)) = (summary.hop_diameter, summary.hop_radius) {
                println!("hop diameter {}, radius {}", diameter, radius);
            }

            for (name, values) in [
                ("degree", &centrality.degree),
                ("closeness", &centrality.closeness),
                ("betweenness", &centrality.betweenness),
            ] {
                println!("top {} centrality:", name);
                for (vertex, value) in values.iter().take(3) {
                    println!("  {:<24} {:.4}", vertex, value);
                }
            }
            println!("average clustering {:.4}", centrality.average_clustering);
            println!();

            match statistics {
                Some(statistics) => {
                    println!(
                        "longest route {} -> {} ({})",
                        statistics.longest.source,
                        statistics.longest.target,
                        statistics.longest.distance
                    );
                    println!(
                        "shortest route {} -> {} ({})",
                        statistics.shortest.source,
                        statistics.shortest.target,
                        statistics.shortest.distance
                    );
                    println!(
                        "mean {:.2}, median {:.2}, standard deviation {:.2}",
                        statistics.mean, statistics.median, statistics.standard_deviation
                    );
                    for (vertex, mean) in statistics.accessibility.iter().take(5) {
                        println!("{:<12} mean distance {:.2}", vertex, mean);
                    }
                }
                None => println!("no vertex reaches another one"),
            }
        }
    }

    Ok(())
}
