//! Verify command handler.

use crate::args::VerifyArgs;
use crate::config::load_vocabulary;
use crate::output::read_records;
use synth_generator::verify_record;

/// Check every record in a generated file.
///
/// Fails when any record breaks the temporal or location invariants.
pub async fn run_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let vocabulary = load_vocabulary(&args.locations)?;
    let records = read_records(&args.input).await?;

    tracing::info!("Verifying {} records from {:?}", records.len(), args.input);

    let mut failed = 0usize;
    for (index, record) in records.iter().enumerate() {
        let violations = verify_record(record, &vocabulary);
        if violations.is_empty() {
            continue;
        }

        failed += 1;
        for violation in &violations {
            println!("record {index}: {violation}");
        }
    }

    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} records in {:?} failed verification",
            records.len(),
            args.input
        );
    }

    println!("Verified {} records in {}", records.len(), args.input.display());
    Ok(())
}
