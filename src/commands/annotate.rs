//! Annotate command handler.

use crate::args::AnnotateArgs;
use crate::config::load_schema;

/// Print the schema with generator tags attached.
pub async fn run_annotate(args: AnnotateArgs) -> anyhow::Result<()> {
    let schema = load_schema(&args.schema)?;
    let annotated = synth_generator::annotate(&schema);

    println!("{}", serde_json::to_string_pretty(&annotated)?);
    Ok(())
}
