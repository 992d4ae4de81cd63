use anyhow::{Context, Result};
use tracing::{info, info_span};

use embla_cli::report::{conditions_table, files_table, recording_table};
use embla_ingest::{
    CollectingSink, ExtractOptions, decode_document, decode_recording_text, discover_inputs,
    extract_recording_info, is_embla_recording,
};

use crate::cli::{DetectArgs, MetadataArgs};

/// Prints whether `args.dir` is a recording and the files it holds.
///
/// Returns `false` when the directory is not an Embla recording.
pub fn run_detect(args: &DetectArgs) -> Result<bool> {
    let span = info_span!("detect", dir = %args.dir.display());
    let _guard = span.enter();

    let options = ExtractOptions::new().with_input_path(&args.dir);
    let detected = is_embla_recording(&args.dir, &options);
    let files = discover_inputs(&args.dir, &options)
        .with_context(|| format!("list {}", args.dir.display()))?;

    if detected {
        println!("{}: Embla recording", args.dir.display());
    } else {
        println!("{}: not an Embla recording", args.dir.display());
    }
    println!("{}", files_table(&files));
    Ok(detected)
}

/// Decodes an exported recording document and prints its fields and any
/// recoverable conditions.
pub fn run_metadata(args: &MetadataArgs) -> Result<()> {
    let span = info_span!("metadata", file = %args.file.display());
    let _guard = span.enter();

    let bytes =
        std::fs::read(&args.file).with_context(|| format!("read {}", args.file.display()))?;
    let xml = decode_recording_text(&bytes);
    let mut sink = CollectingSink::new();
    let document = decode_document(&xml, &mut sink).context("decode recording document")?;
    let recording = extract_recording_info(&document, &args.manufacturer)
        .context("extract recording fields")?;
    info!(
        nodes = document.node_count(),
        conditions = sink.len(),
        "decoded recording document"
    );

    println!("{}", recording_table(&recording));
    if !sink.is_empty() {
        println!("{}", conditions_table(&sink.conditions));
    }
    Ok(())
}
