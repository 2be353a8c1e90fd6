// Licensed under the Apache-2.0 license

//! Shared helpers for the end-to-end generation tests.

use std::path::Path;

use uvmtb_generator::{codegen, parse, GenContext, TbConfig};

/// A representative description: one Master and one Slave interface, one
/// reset given with explicit polarity and one omitted entirely.
pub const SAMPLE_DESCRIPTION: &str = "\
DUT_NAME , usb_ctrl
NUM_INTF , 2
INTF , i2c , M , 100 , i2c_clk , [i2c_rst , active_low]
INTF , uart, S , 200 , uart_clk
";

/// Parses `input` and runs the full pipeline into `root`. Returns the model
/// so tests can assert against it.
pub fn generate_into(input: &str, root: &Path) -> anyhow::Result<TbConfig> {
    let parsed = parse::parse_str(input)?;
    let ctx = GenContext::new(root);
    ctx.bootstrap()?;
    codegen::generate_all(&parsed.config, &ctx)?;
    Ok(parsed.config)
}
