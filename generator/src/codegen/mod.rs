// Licensed under the Apache-2.0 license

//! Artifact generators.
//!
//! Five generators consume the same read-only [`TbConfig`] and each produce
//! one category of output plus one summary section:
//!
//! - [`top`]: top-level wiring (`TOP/top.sv`)
//! - [`test`]: base test (`TEST_LIB/<dut>_base_test.sv`)
//! - [`env`]: environment (`ENV/<dut>_env.sv`)
//! - [`agent`]: per-interface agents and sub-components (`ENV/AGENTS/<name>/`)
//! - [`seq`]: base sequence (`SEQ_LIB/<dut>_base_seq.sv`)
//!
//! No generator reads another generator's output; they only share the model
//! and the naming module, so the run order below fixes nothing except the
//! order of summary sections.

pub mod agent;
pub mod env;
pub mod seq;
pub mod top;

use anyhow::Result;

use crate::config::TbConfig;
use crate::context::GenContext;

/// Runs every generator in the fixed pipeline order.
pub fn generate_all(cfg: &TbConfig, ctx: &GenContext) -> Result<()> {
    top::generate(cfg, ctx)?;
    test::generate(cfg, ctx)?;
    env::generate(cfg, ctx)?;
    agent::generate(cfg, ctx)?;
    seq::generate(cfg, ctx)?;
    Ok(())
}
