use crate::error::{Error, Result};

/// Header written before every read unless overridden.
pub const DEFAULT_HEADER: &str = ">:114:A016U:1:1:17528:1320 1:N:0:1";

#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub error: f64,
    pub genome_length: usize,
    pub read_length: usize,
    pub min_rlength: usize,
    pub multiplicity: usize,
    /// Overlap bounds between consecutive reads. Negative means a gap.
    pub min_overlap: i64,
    pub max_overlap: i64,
    pub header: String,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            error: 0.02,
            genome_length: 1000,
            read_length: 125,
            min_rlength: 60,
            multiplicity: 2,
            min_overlap: -50,
            max_overlap: 50,
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

impl Params {
    /// Checks the parameters before anything is generated. The first
    /// violated rule is reported.
    pub fn validate(&self) -> Result<()> {
        if !self.error.is_finite() || !(0.0..=1.0).contains(&self.error) {
            return Err(Error::InvalidParams(format!(
                "error rate must be within [0, 1], got {}",
                self.error
            )));
        }
        if self.read_length == 0 {
            return Err(Error::InvalidParams("read length must be positive".to_string()));
        }
        if self.min_rlength > self.read_length {
            return Err(Error::InvalidParams(format!(
                "min read length ({}) exceeds read length ({})",
                self.min_rlength, self.read_length
            )));
        }
        if self.min_overlap > self.max_overlap {
            return Err(Error::InvalidParams(format!(
                "min overlap ({}) is greater than max overlap ({})",
                self.min_overlap, self.max_overlap
            )));
        }
        // the cursor must move forward by at least one base per read
        if i128::from(self.max_overlap) >= self.read_length as i128 {
            return Err(Error::InvalidParams(format!(
                "max overlap ({}) must be smaller than read length ({})",
                self.max_overlap, self.read_length
            )));
        }
        Ok(())
    }
}
