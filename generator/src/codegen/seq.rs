// Licensed under the Apache-2.0 license

//! Base-sequence generator: `SEQ_LIB/<dut>_base_seq.sv`.

use std::fmt::Write;

use anyhow::Result;
use log::warn;

use crate::config::TbConfig;
use crate::context::GenContext;
use crate::naming::base_seq;
use crate::summary::SummarySection;

/// Renders the base-sequence class, or `None` without a DUT name.
pub fn render_seq(cfg: &TbConfig) -> Option<String> {
    let stem = cfg.dut_stem()?;
    let seq = base_seq(&stem);

    let mut out = String::new();
    writeln!(out, "// ----------------------------------------------------").unwrap();
    writeln!(out, "// UVM sequence: {seq}").unwrap();
    writeln!(out, "// ----------------------------------------------------").unwrap();
    writeln!(out, "class {seq} extends uvm_sequence;").unwrap();
    writeln!(out, "  `uvm_object_utils({seq})").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  function new(string name = \"{seq}\");").unwrap();
    writeln!(out, "    super.new(name);").unwrap();
    writeln!(out, "  endfunction").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual task body();").unwrap();
    writeln!(
        out,
        "    `uvm_info(get_type_name(), \"Starting {seq}\", UVM_NONE)"
    )
    .unwrap();
    writeln!(
        out,
        "    // TODO: Define the request item type; use `uvm_do_with for constrained fields"
    )
    .unwrap();
    writeln!(out, "    `uvm_do(req)").unwrap();
    writeln!(out, "  endtask").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "endclass : {seq}").unwrap();
    out.into()
}

fn summary(stem: &str) -> SummarySection {
    let seq = base_seq(stem);
    SummarySection::new(format!("{seq}.sv summary"))
        .bullet(format!("class {seq} extends uvm_sequence"))
        .bullet(format!("Factory registered with `uvm_object_utils({seq})"))
        .bullet("body() logs the start and issues one randomized `uvm_do(req)".to_string())
        .todo("Define the sequence item type; switch to `uvm_do_with if constraints are needed")
}

/// Writes the base-sequence artifact. Missing DUT name logs a skip and emits
/// nothing.
pub fn generate(cfg: &TbConfig, ctx: &GenContext) -> Result<()> {
    let (Some(stem), Some(content)) = (cfg.dut_stem(), render_seq(cfg)) else {
        warn!("No DUT name found in configuration; skipping sequence generation");
        return Ok(());
    };
    let path = ctx.seq_lib_dir().join(format!("{}.sv", base_seq(&stem)));
    ctx.write_artifact(&path, &content)?;
    ctx.append_summary(&summary(&stem))
}
