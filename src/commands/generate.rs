//! Generate command handler.

use crate::args::GenerateArgs;
use crate::config::load_inputs;
use crate::output::write_records;
use anyhow::Context;
use synth_generator::{BatchDriver, BatchOptions, FailurePolicy, SampleGenerator};

/// Run the generate command.
pub async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.inputs.schema, &args.inputs.locations)?;

    tracing::info!("Generating {} records (seed={})", args.count, args.seed);
    tracing::info!("Timestamp ordering: {:?}", args.timestamp_order);

    // Convert CLI enums to internal types
    let options = BatchOptions {
        failure_policy: if args.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::RecordAndContinue
        },
        timestamp_ordering: args.timestamp_order.into(),
    };

    let mut generator = SampleGenerator::new(&inputs.schema, inputs.vocabulary);
    if let Some(now) = args.now {
        generator = generator.with_now(now);
    }

    let mut driver = BatchDriver::new(generator, args.seed).with_options(options);
    let report = driver
        .run(args.count)
        .context("Record generation failed")?;

    write_records(&args.output, &report.records)
        .await
        .with_context(|| format!("Failed to save records to {:?}", args.output))?;

    println!(
        "Generated {} records and saved to {}",
        report.records.len(),
        args.output.display()
    );
    if !report.failures.is_empty() {
        println!("Skipped {} records that failed:", report.failures.len());
        for failure in &report.failures {
            println!("  record {}: {}", failure.index, failure.error);
        }
    }

    Ok(())
}
