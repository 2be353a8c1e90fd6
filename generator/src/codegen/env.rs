// Licensed under the Apache-2.0 license

//! Environment generator: `ENV/<dut>_env.sv`.
//!
//! The environment holds one agent handle per named interface regardless of
//! mode; interfaces the agent generator skips still appear here so the user
//! sees every declared endpoint in one place. The scoreboard is never
//! generated, so its handle, creation, and connections are emitted as
//! commented-out TODO stubs.

use std::fmt::Write;

use anyhow::Result;
use log::warn;

use crate::config::TbConfig;
use crate::context::GenContext;
use crate::naming::{agent_class, analysis_port, env_class, inst_handle, monitor_class, scoreboard_class};
use crate::summary::SummarySection;

/// Renders the environment class, or `None` without a DUT name.
pub fn render_env(cfg: &TbConfig) -> Option<String> {
    let stem = cfg.dut_stem()?;
    let env = env_class(&stem);
    let sbd = scoreboard_class(&stem);
    let sbd_h = inst_handle(&sbd);
    let names: Vec<&str> = cfg.interfaces.iter().filter_map(|i| i.defined_name()).collect();

    let mut out = String::new();
    writeln!(out, "// ----------------------------------------------------").unwrap();
    writeln!(out, "// UVM environment: {env}").unwrap();
    writeln!(out, "// ----------------------------------------------------").unwrap();
    writeln!(out, "class {env} extends uvm_env;").unwrap();
    writeln!(out, "  `uvm_component_utils({env})").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  // Agent handles").unwrap();
    for name in &names {
        let agent = agent_class(name);
        writeln!(out, "  {agent} {};", inst_handle(&agent)).unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "  // Scoreboard handle").unwrap();
    writeln!(out, "  // {sbd} {sbd_h};").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "  function new(string name = \"{env}\", uvm_component parent = null);"
    )
    .unwrap();
    writeln!(out, "    super.new(name, parent);").unwrap();
    writeln!(out, "  endfunction").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual function void build_phase(uvm_phase phase);").unwrap();
    writeln!(out, "    super.build_phase(phase);").unwrap();
    for name in &names {
        let agent = agent_class(name);
        let agent_h = inst_handle(&agent);
        writeln!(out, "    {agent_h} = {agent}::type_id::create(\"{agent_h}\", this);").unwrap();
    }
    writeln!(out, "    // {sbd_h} = {sbd}::type_id::create(\"{sbd_h}\", this);").unwrap();
    writeln!(out, "  endfunction").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual function void connect_phase(uvm_phase phase);").unwrap();
    writeln!(out, "    super.connect_phase(phase);").unwrap();
    writeln!(out, "    // TODO: Connect the agent analysis ports once the scoreboard exists").unwrap();
    for name in &names {
        let agent_h = inst_handle(&agent_class(name));
        let mon_h = inst_handle(&monitor_class(name));
        writeln!(
            out,
            "    // {agent_h}.{mon_h}.{}.connect({sbd_h}.analysis_export);",
            analysis_port(name)
        )
        .unwrap();
    }
    writeln!(out, "  endfunction").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "endclass : {env}").unwrap();
    out.into()
}

fn summary(cfg: &TbConfig, stem: &str) -> SummarySection {
    let env = env_class(stem);
    let mut section = SummarySection::new(format!("{env}.sv summary"))
        .bullet(format!("class {env} extends uvm_env"))
        .bullet(format!("Factory registered with `uvm_component_utils({env})"));
    for name in cfg.interfaces.iter().filter_map(|i| i.defined_name()) {
        section = section.bullet(format!("Agent handle {}", inst_handle(&agent_class(name))));
    }
    section
        .bullet(format!(
            "Scoreboard {} left commented out (not generated)",
            scoreboard_class(stem)
        ))
        .todo("Implement the scoreboard and uncomment its creation and connections")
}

/// Writes the environment artifact. Missing DUT name logs a skip and emits
/// nothing.
pub fn generate(cfg: &TbConfig, ctx: &GenContext) -> Result<()> {
    let (Some(stem), Some(content)) = (cfg.dut_stem(), render_env(cfg)) else {
        warn!("No DUT name found in configuration; skipping environment generation");
        return Ok(());
    };
    let path = ctx.env_dir().join(format!("{}.sv", env_class(&stem)));
    ctx.write_artifact(&path, &content)?;
    ctx.append_summary(&summary(cfg, &stem))
}
