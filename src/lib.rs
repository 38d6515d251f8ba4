pub mod error;
pub mod logger;
pub mod params;
pub mod reads;
pub mod seq;

use log::info;
use rand::Rng;

use std::io::Write;

use crate::error::Result;
use crate::params::Params;
use crate::reads::{EmitSummary, ReadEmitter};

/// Validates `params`, generates a genome and writes every read to `out`.
///
/// Nothing is written when validation fails. The genome is returned so the
/// caller can keep it as ground truth.
pub fn simulate<R, W>(params: &Params, rng: &mut R, out: &mut W) -> Result<(Vec<u8>, EmitSummary)>
where
    R: Rng + ?Sized,
    W: Write + ?Sized,
{
    params.validate()?;

    let genome = seq::random_genome(params.genome_length, rng);
    let emitter = ReadEmitter::new(params, &genome);
    let summary = emitter.write_reads(rng, out)?;
    out.flush()?;

    info!("emitted {} reads, discarded {} short reads", summary.emitted, summary.discarded);
    Ok((genome, summary))
}
