use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use social_graph::config::EngineConfig;
use social_graph::logger::init_logger;
use social_graph::script::{parse_script, run_script};
use social_graph::SocialGraph;

/// Replay a social graph command script and print every query result.
#[derive(Parser, Debug)]
#[command(name = "social-graph", version)]
struct Args {
    /// The command script, one command per line.
    script: PathBuf,

    /// YAML engine config.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON, one object per line.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        None => EngineConfig::default(),
        Some(path) => EngineConfig::from_yaml_file(path)?,
    };
    init_logger(&config)?;

    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let commands = parse_script(&text)?;
    info!("Loaded {} commands from {}", commands.len(), args.script.display());

    let mut graph = SocialGraph::new();
    let outputs = run_script(&mut graph, &commands);
    let json = args.json || config.json_output;
    for output in &outputs {
        if json {
            println!("{}", serde_json::to_string(output)?);
        } else {
            println!("{}", output);
        }
    }
    info!(
        "Script done: {} users, {} connections, {} outputs",
        graph.user_count(),
        graph.edge_count(),
        outputs.len()
    );
    Ok(())
}
