use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use synreads::error::{Error, Result};
use synreads::logger;
use synreads::params::{Params, DEFAULT_HEADER};
use synreads::seq;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "synreads", about = "Generate a random genome and overlapping reads with substitution errors")]
struct Opt {
    /// Error rate (per each nucleotide)
    #[structopt(short, long, default_value = "0.02")]
    error: f64,

    /// Length of genome
    #[structopt(short, long, default_value = "1000")]
    length: usize,

    /// Length of each read
    #[structopt(short, long, default_value = "125")]
    rlength: usize,

    /// Minimum read length (reads on ends can be shorter); must not exceed the read length
    #[structopt(short = "c", long, alias = "min_rlength", default_value = "60")]
    min_rlength: usize,

    /// Number of rounds over the genome, alternating strands
    #[structopt(short, long, default_value = "2")]
    multiplicity: usize,

    /// Minimum overlap length (negative means a gap between reads)
    #[structopt(short = "a", long, alias = "min_overlap", default_value = "-50", allow_hyphen_values = true)]
    min_overlap: i64,

    /// Maximum overlap length
    #[structopt(short = "b", long, alias = "max_overlap", default_value = "50", allow_hyphen_values = true)]
    max_overlap: i64,

    /// Seed for the random generator
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Header line written before every read
    #[structopt(long, default_value = DEFAULT_HEADER)]
    header: String,

    /// Write reads here instead of stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Also write the generated genome as FASTA
    #[structopt(short, long, parse(from_os_str))]
    genome_out: Option<PathBuf>,

    /// Verbosity (-v info, -vv debug)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

impl Opt {
    fn params(&self) -> Params {
        Params {
            error: self.error,
            genome_length: self.length,
            read_length: self.rlength,
            min_rlength: self.min_rlength,
            multiplicity: self.multiplicity,
            min_overlap: self.min_overlap,
            max_overlap: self.max_overlap,
            header: self.header.clone(),
        }
    }
}

fn run(opt: &Opt) -> Result<()> {
    let params = opt.params();
    params.validate()?;
    if let (Some(reads), Some(genome)) = (&opt.output, &opt.genome_out) {
        if reads == genome {
            return Err(Error::InvalidParams(format!(
                "reads and genome would both be written to {}",
                reads.display()
            )));
        }
    }

    let seed = opt.seed.unwrap_or_else(rand::random);
    info!("{:?}", params);
    info!("seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut out: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let (genome, summary) = synreads::simulate(&params, &mut rng, &mut out)?;
    if summary.emitted == 0 {
        warn!("no reads were emitted");
    }

    drop(out);

    if let Some(path) = &opt.genome_out {
        let mut writer = BufWriter::new(File::create(path)?);
        seq::write_fasta_record(&mut writer, ">genome", &genome)?;
        writer.flush()?;
    }
    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    if let Err(e) = logger::init_logger(logger::level_from_verbosity(opt.verbose)) {
        eprintln!("could not set up logging: {}", e);
    }

    if let Err(e) = run(&opt) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
