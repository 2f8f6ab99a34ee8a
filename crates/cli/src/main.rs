use std::path::PathBuf;
use std::process;

use clap::Parser;

use multiface_core::fanout::MultiFaceFilter;
use multiface_core::filtering::infrastructure::filter_factory::create_filter;
use multiface_core::runtime::infrastructure::image_file_sink::ImageFileSink;
use multiface_core::runtime::infrastructure::image_file_source::ImageFileSource;
use multiface_core::runtime::infrastructure::threaded_session_runner::{
    SessionConfig, ThreadedSessionRunner,
};
use multiface_core::shared::constants::DEFAULT_FILTER_NAME;
use multiface_core::shared::face_region::FaceRegion;

/// Fans an image out to per-face child filters.
///
/// Face regions are supplied on the command line; in a live pipeline they
/// would arrive from a detection subsystem through the same intake.
#[derive(Parser)]
#[command(name = "multiface")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Output image file.
    output: PathBuf,

    /// A face bounding box as x,y,w,h (repeatable; order pairs with --filter).
    #[arg(long = "face")]
    faces: Vec<FaceRegion>,

    /// Child filter to register, in order (repeatable).
    /// One of: passthrough, pixelate[:block], tint, invert.
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// Mirror face coordinates horizontally before dispatch.
    #[arg(long)]
    mirror: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let node = build_node(&cli)?;
    log::info!(
        "fanning {} face(s) out to {} child filter(s){}",
        cli.faces.len(),
        node.child_count(),
        if cli.mirror { ", mirrored" } else { "" }
    );

    run_session(node, &cli)
}

fn build_node(cli: &Cli) -> Result<MultiFaceFilter, Box<dyn std::error::Error>> {
    let mut node = MultiFaceFilter::new();

    if cli.filters.is_empty() {
        // No filters requested: one default child per face.
        for _ in &cli.faces {
            node.add_filter(create_filter(DEFAULT_FILTER_NAME)?);
        }
    } else {
        for name in &cli.filters {
            node.add_filter(create_filter(name).map_err(|e| format!("--filter {name}: {e}"))?);
        }
    }

    node.set_mirror(cli.mirror);
    node.detection_sender().deliver(cli.faces.clone());
    Ok(node)
}

fn run_session(mut node: MultiFaceFilter, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let progress: Box<dyn Fn(usize, usize) -> bool + Send> = Box::new(|current, total| {
        log::debug!("processed frame {current}/{total}");
        true
    });

    ThreadedSessionRunner::new().run(
        Box::new(ImageFileSource::new()),
        Box::new(ImageFileSink::new()),
        &mut node,
        &cli.input,
        &cli.output,
        SessionConfig {
            on_progress: Some(progress),
            ..Default::default()
        },
    )
}
