use rand::Rng;

use std::io::{self, Write};

pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

struct Complementer;
trait Complement {
    fn complement(&self, value: u8) -> u8;
}

impl Complement for Complementer {
    fn complement(&self, value: u8) -> u8 {
        match value {
            b'A' => b'T',
            b'C' => b'G',
            b'G' => b'C',
            b'T' => b'A',
            b'a' => b't',
            b'c' => b'g',
            b'g' => b'c',
            b't' => b'a',
            other => other, // N and friends pass through
        }
    }
}

static COMPLEMENTER: Complementer = Complementer;

/// Complement of a single base (A<->T, C<->G).
pub fn complement(base: u8) -> u8 {
    COMPLEMENTER.complement(base)
}

/// One base drawn uniformly from `BASES`.
pub fn random_base<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    BASES[rng.gen_range(0..BASES.len())]
}

/// Builds a genome of `length` independently uniform bases.
///
/// A zero length yields an empty genome.
pub fn random_genome<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Vec<u8> {
    let mut genome = Vec::with_capacity(length);
    for _ in 0..length {
        genome.push(random_base(rng));
    }
    genome
}

pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().rev().map(|&base| complement(base)).collect()
}

/// Writes a two-line record: the header as given, then the bases.
pub fn write_fasta_record<W: Write + ?Sized>(writer: &mut W, header: &str, sequence: &[u8]) -> io::Result<()> {
    writer.write_all(header.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.write_all(sequence)?;
    writer.write_all(b"\n")
}
