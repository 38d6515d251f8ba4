use log::debug;
use rand::Rng;

use std::io::Write;

use crate::error::Result;
use crate::params::Params;
use crate::seq::{random_base, reverse_complement, write_fasta_record};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn for_pass(pass: usize) -> Self {
        if pass % 2 == 0 {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }
}

/// A simulated read, after errors were applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Read {
    pub strand: Strand,
    pub start: usize,
    pub bases: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub emitted: usize,
    pub discarded: usize,
}

/// Starting cursor of a pass. With a negative `min_overlap` the phase is
/// drawn from `[0, -min_overlap]`.
pub fn initial_cursor<R: Rng + ?Sized>(min_overlap: i64, rng: &mut R) -> usize {
    if min_overlap >= 0 {
        0
    } else {
        rng.gen_range(0..=min_overlap.unsigned_abs()) as usize
    }
}

/// Distance to the next read start: `read_length - U` with `U` uniform in
/// `[min_overlap, max_overlap]`, never less than one.
pub fn next_advance<R: Rng + ?Sized>(read_length: usize, min_overlap: i64, max_overlap: i64, rng: &mut R) -> usize {
    let overlap = rng.gen_range(min_overlap..=max_overlap);
    let advance = i64::try_from(read_length).unwrap_or(i64::MAX).saturating_sub(overlap);
    advance.max(1) as usize
}

/// Returns a copy of `read` where each position independently, with
/// probability `error`, is replaced by a uniformly random base.
pub fn mutate<R: Rng + ?Sized>(read: &[u8], error: f64, rng: &mut R) -> Vec<u8> {
    read.iter()
        .map(|&base| {
            if rng.gen::<f64>() < error {
                random_base(rng)
            } else {
                base
            }
        })
        .collect()
}

pub struct ReadEmitter<'a> {
    params: &'a Params,
    forward: &'a [u8],
    reverse: Vec<u8>,
}

impl<'a> ReadEmitter<'a> {
    pub fn new(params: &'a Params, genome: &'a [u8]) -> Self {
        ReadEmitter {
            params,
            forward: genome,
            reverse: reverse_complement(genome),
        }
    }

    pub fn strand(&self, strand: Strand) -> &[u8] {
        match strand {
            Strand::Forward => self.forward,
            Strand::Reverse => &self.reverse,
        }
    }

    /// Runs every pass and hands each surviving read to `sink`.
    pub fn for_each_read<R, F>(&self, rng: &mut R, mut sink: F) -> Result<EmitSummary>
    where
        R: Rng + ?Sized,
        F: FnMut(Read) -> Result<()>,
    {
        let params = self.params;
        let mut summary = EmitSummary::default();

        for pass in 0..params.multiplicity {
            let strand = Strand::for_pass(pass);
            let sequence = self.strand(strand);
            let mut spos = initial_cursor(params.min_overlap, rng);
            debug!("pass {}: {:?} strand, cursor starts at {}", pass, strand, spos);

            while spos < sequence.len() {
                let start = spos;
                let end = start.saturating_add(params.read_length).min(sequence.len());
                let read = &sequence[start..end];

                // advance before the length check so short reads do not shift later cut points
                spos = spos.saturating_add(next_advance(params.read_length, params.min_overlap, params.max_overlap, rng));

                if read.len() < params.min_rlength {
                    summary.discarded += 1;
                    continue;
                }

                let bases = mutate(read, params.error, rng);
                sink(Read { strand, start, bases })?;
                summary.emitted += 1;
            }
        }

        Ok(summary)
    }

    pub fn write_reads<R, W>(&self, rng: &mut R, out: &mut W) -> Result<EmitSummary>
    where
        R: Rng + ?Sized,
        W: Write + ?Sized,
    {
        let header = self.params.header.as_str();
        self.for_each_read(rng, |read| {
            write_fasta_record(out, header, &read.bases)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::{random_genome, BASES};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn collect(params: &Params, genome: &[u8], seed: u64) -> (Vec<Read>, EmitSummary) {
        let emitter = ReadEmitter::new(params, genome);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut reads = Vec::new();
        let summary = emitter
            .for_each_read(&mut rng, |read| {
                reads.push(read);
                Ok(())
            })
            .unwrap();
        (reads, summary)
    }

    #[test]
    fn test_strand_alternates() {
        assert_eq!(Strand::for_pass(0), Strand::Forward);
        assert_eq!(Strand::for_pass(1), Strand::Reverse);
        assert_eq!(Strand::for_pass(2), Strand::Forward);
    }

    #[test]
    fn test_initial_cursor_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(initial_cursor(0, &mut rng), 0);
        assert_eq!(initial_cursor(30, &mut rng), 0);
        let mut seen_zero = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let c = initial_cursor(-5, &mut rng);
            assert!(c <= 5);
            seen_zero |= c == 0;
            seen_max |= c == 5;
        }
        assert!(seen_zero && seen_max);
    }

    #[test]
    fn test_next_advance_range() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            let step = next_advance(125, -50, 50, &mut rng);
            assert!((75..=175).contains(&step));
        }
        assert_eq!(next_advance(10, 10, 10, &mut rng), 1);
        assert_eq!(next_advance(10, 0, 0, &mut rng), 10);
        assert_eq!(next_advance(usize::MAX, 0, 0, &mut rng) as u64, i64::MAX as u64);
    }

    #[test]
    fn test_mutate_zero_error_is_identity() {
        let mut rng = StdRng::seed_from_u64(4);
        let read = random_genome(200, &mut rng);
        assert_eq!(mutate(&read, 0.0, &mut rng), read);
    }

    #[test]
    fn test_mutate_full_error_rewrites_about_three_quarters() {
        let mut rng = StdRng::seed_from_u64(5);
        let read = vec![b'A'; 4000];
        let mutated = mutate(&read, 1.0, &mut rng);
        assert_eq!(mutated.len(), read.len());
        assert!(mutated.iter().all(|b| BASES.contains(b)));
        let changed = mutated.iter().filter(|&&b| b != b'A').count();
        // each replacement keeps the old base one time in four
        assert!(changed > 2800 && changed < 3200, "changed {}", changed);
    }

    #[test]
    fn test_mutate_leaves_source_untouched() {
        let mut rng = StdRng::seed_from_u64(6);
        let read = b"ACGTACGTACGT".to_vec();
        let copy = read.clone();
        let _ = mutate(&read, 1.0, &mut rng);
        assert_eq!(read, copy);
    }

    #[test]
    fn test_non_overlapping_tiling() {
        let params = Params {
            error: 0.0,
            genome_length: 100,
            read_length: 50,
            min_rlength: 50,
            multiplicity: 1,
            min_overlap: 0,
            max_overlap: 0,
            ..Params::default()
        };
        let genome = random_genome(100, &mut StdRng::seed_from_u64(9));
        let (reads, summary) = collect(&params, &genome, 10);
        assert_eq!(summary, EmitSummary { emitted: 2, discarded: 0 });
        assert_eq!(reads[0].start, 0);
        assert_eq!(reads[0].bases, &genome[0..50]);
        assert_eq!(reads[1].start, 50);
        assert_eq!(reads[1].bases, &genome[50..100]);
    }

    #[test]
    fn test_short_tail_is_discarded_after_advance() {
        let params = Params {
            error: 0.0,
            genome_length: 120,
            read_length: 50,
            min_rlength: 30,
            multiplicity: 1,
            min_overlap: 0,
            max_overlap: 0,
            ..Params::default()
        };
        let genome = random_genome(120, &mut StdRng::seed_from_u64(12));
        let (reads, summary) = collect(&params, &genome, 13);
        // cuts at 0, 50, 100; the last one is 20 bases long
        assert_eq!(summary, EmitSummary { emitted: 2, discarded: 1 });
        assert_eq!(reads.iter().map(|r| r.start).collect::<Vec<_>>(), vec![0, 50]);
    }

    #[test]
    fn test_reads_respect_length_bounds() {
        let params = Params { genome_length: 5000, multiplicity: 4, ..Params::default() };
        let genome = random_genome(params.genome_length, &mut StdRng::seed_from_u64(14));
        let (reads, summary) = collect(&params, &genome, 15);
        assert!(summary.emitted > 0);
        assert_eq!(reads.len(), summary.emitted);
        for read in &reads {
            assert!(read.bases.len() >= params.min_rlength && read.bases.len() <= params.read_length);
            assert!(read.bases.iter().all(|b| BASES.contains(b)));
        }
    }

    #[test]
    fn test_error_free_reads_are_substrings_at_their_offset() {
        let params = Params { error: 0.0, genome_length: 3000, multiplicity: 3, ..Params::default() };
        let genome = random_genome(params.genome_length, &mut StdRng::seed_from_u64(16));
        let reverse = reverse_complement(&genome);
        let (reads, _) = collect(&params, &genome, 17);
        assert!(reads.iter().any(|r| r.strand == Strand::Reverse));
        for read in &reads {
            let source = match read.strand {
                Strand::Forward => &genome,
                Strand::Reverse => &reverse,
            };
            assert_eq!(&source[read.start..read.start + read.bases.len()], read.bases.as_slice());
        }
    }

    #[test]
    fn test_passes_alternate_strands() {
        let params = Params { error: 0.0, genome_length: 600, multiplicity: 2, min_overlap: 0, max_overlap: 0, ..Params::default() };
        let genome = random_genome(600, &mut StdRng::seed_from_u64(18));
        let (reads, _) = collect(&params, &genome, 19);
        let first_reverse = reads.iter().position(|r| r.strand == Strand::Reverse).unwrap();
        assert!(reads[..first_reverse].iter().all(|r| r.strand == Strand::Forward));
        assert!(reads[first_reverse..].iter().all(|r| r.strand == Strand::Reverse));
    }

    #[test]
    fn test_empty_genome_emits_nothing() {
        let params = Params { genome_length: 0, ..Params::default() };
        let (reads, summary) = collect(&params, &[], 20);
        assert!(reads.is_empty());
        assert_eq!(summary, EmitSummary::default());
    }

    #[test]
    fn test_write_reads_uses_header() {
        let params = Params {
            error: 0.0,
            genome_length: 8,
            read_length: 4,
            min_rlength: 4,
            multiplicity: 1,
            min_overlap: 0,
            max_overlap: 0,
            header: ">sim".to_string(),
        };
        let genome = b"AACCGGTT".to_vec();
        let emitter = ReadEmitter::new(&params, &genome);
        let mut out = Vec::new();
        let summary = emitter.write_reads(&mut StdRng::seed_from_u64(21), &mut out).unwrap();
        assert_eq!(summary.emitted, 2);
        assert_eq!(String::from_utf8(out).unwrap(), ">sim\nAACC\n>sim\nGGTT\n");
    }
}
