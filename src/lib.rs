// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Detection of tumour-specific SNVs from a tumour and a healthy read set, using
//! generalized suffix arrays instead of a reference alignment.
//!
//! The pipeline runs in stages: tumour-enriched loci are located in the global suffix
//! array ([`extraction`]), the implicated tumour reads are re-indexed in both
//! orientations and grouped into breakpoint blocks ([`blocks`]), the blocks are completed
//! with healthy evidence from the global index and finally reduced to consensus pairs
//! ([`consensus`]) that are compared for single base differences ([`calling`]).

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod blocks;
pub mod calling;
pub mod cli;
pub mod consensus;
pub mod constants;
pub mod errors;
pub mod extraction;
pub mod index;
pub mod output;
pub mod params;
pub mod reads;
pub(crate) mod scan;
