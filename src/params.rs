// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs::File;
use std::path::Path;

use anyhow::Result;
use derive_builder::Builder;
use getset::CopyGetters;

use crate::constants;
use crate::errors::Error;

/// Run-wide thresholds. One instance is handed to every stage, so all stages
/// agree on the minimum suffix length.
#[derive(Debug, Clone, Copy, PartialEq, Builder, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
#[serde(default)]
pub struct Params {
    /// Minimum number of shared bases for two suffixes to cover the same locus.
    #[builder(default = "constants::DEFAULT_MIN_SUFFIX_LEN")]
    min_suffix_len: usize,
    /// Maximum tolerated healthy-to-tumour ratio within a tumour-enriched locus.
    #[builder(default = "constants::DEFAULT_ECONT")]
    econt: f64,
    #[builder(default = "constants::DEFAULT_MIN_TUMOUR_COUNT")]
    min_tumour_count: usize,
    /// Minimum number of tags forming a breakpoint block (CTR).
    #[builder(default = "constants::DEFAULT_MIN_BLOCK_SIZE")]
    min_block_size: usize,
    #[builder(default = "constants::TRIM_VALUE")]
    trim_value: usize,
    #[builder(default = "constants::COVERAGE_UPPER_THRESHOLD")]
    coverage_upper_threshold: usize,
    #[builder(default = "constants::ALLELIC_FREQ_OF_ERROR")]
    allelic_error_freq: f64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            min_suffix_len: constants::DEFAULT_MIN_SUFFIX_LEN,
            econt: constants::DEFAULT_ECONT,
            min_tumour_count: constants::DEFAULT_MIN_TUMOUR_COUNT,
            min_block_size: constants::DEFAULT_MIN_BLOCK_SIZE,
            trim_value: constants::TRIM_VALUE,
            coverage_upper_threshold: constants::COVERAGE_UPPER_THRESHOLD,
            allelic_error_freq: constants::ALLELIC_FREQ_OF_ERROR,
        }
    }
}

impl Params {
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let params: Params = serde_json::from_reader(File::open(path)?)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.min_suffix_len == 0 {
            return Err(Error::InvalidMinSuffixLength);
        }
        if !(self.econt >= 0.0) {
            return Err(Error::InvalidContaminationRatio { econt: self.econt });
        }
        if self.min_tumour_count == 0 {
            return Err(Error::InvalidMinTumourCount);
        }
        if self.min_block_size == 0 {
            return Err(Error::InvalidMinBlockSize);
        }
        if self.trim_value == 0 {
            return Err(Error::InvalidTrimValue);
        }
        if !(0.0..1.0).contains(&self.allelic_error_freq) {
            return Err(Error::InvalidAllelicErrorFrequency {
                freq: self.allelic_error_freq,
            });
        }
        Ok(())
    }
}
