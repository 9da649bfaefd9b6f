//! Command-line front end: read a datamodel file, write graph JSON.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::config;
use crate::dmmf::Datamodel;
use crate::error::Error;
use crate::layout::{LayoutHint, LayoutRequest};
use crate::transform;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Datamodel JSON file (DMMF)
    pub input: PathBuf,

    /// Layout engine result (ELK JSON) to position nodes with
    #[arg(short, long)]
    pub layout: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emit the layout engine's input graph instead of the diagram graph
    #[arg(long)]
    pub request: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Run the transform described by `args`, returning the JSON it produced.
pub fn run(args: &Args) -> Result<String, Error> {
    info!(input = args.input.display().to_string(); "Reading datamodel");

    let config = config::load_config(args.config.as_deref())?;
    let datamodel = Datamodel::from_json(&fs::read_to_string(&args.input)?)?;

    let layout = match &args.layout {
        Some(path) => {
            let hint = LayoutHint::from_json(&fs::read_to_string(path)?)?;
            info!(path = path.display().to_string(), nodes = hint.len(); "Loaded layout");
            Some(hint)
        }
        None => None,
    };

    let graph = transform::transform(&datamodel, layout.as_ref(), &config)?;
    info!(nodes = graph.nodes.len(), edges = graph.edges.len(); "Graph generated");

    let json = if args.request {
        LayoutRequest::from_graph(&graph, &config).to_json()?
    } else {
        graph.to_json()?
    };

    if let Some(path) = &args.output {
        fs::write(path, &json)?;
        info!(output = path.display().to_string(); "Output written");
    }

    Ok(json)
}
