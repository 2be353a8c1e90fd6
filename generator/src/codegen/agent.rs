// Licensed under the Apache-2.0 license

//! Agent and sub-component generator: `ENV/AGENTS/<name>/`.
//!
//! For every interface in Master or Slave mode this emits an agent class
//! plus one file per sub-component. Monitor and coverage subscriber exist for
//! both modes; driver and sequencer only for Master (a Slave agent observes,
//! it never drives). The sequencer is a parameterized typedef over the
//! interface's transaction type rather than a full class. Interfaces whose
//! mode is anything else are skipped here entirely; they still get an agent
//! handle in the environment.
//!
//! Driver and monitor both retrieve their virtual interface from the config
//! db under the derived handle name registered by `top.sv`; the emitted check
//! reports a `uvm_error` at elaboration when the binding is absent.

use std::fmt::Write;

use anyhow::Result;

use crate::config::{Interface, Mode, TbConfig};
use crate::context::GenContext;
use crate::naming::{
    agent_class, analysis_port, coverage_class, driver_class, if_type, inst_handle,
    interface_stem, monitor_class, sequencer_class, tx_type, vif_handle,
};
use crate::summary::SummarySection;

fn class_banner(kind: &str, class: &str) -> String {
    format!(
        "// ----------------------------------------------------\n\
         // UVM {kind}: {class}\n\
         // ----------------------------------------------------\n"
    )
}

/// Config-db retrieval guard shared by the driver and monitor stubs.
fn vif_fetch(name: &str) -> String {
    let vif = vif_handle(name);
    format!(
        "    if (!uvm_config_db#(virtual {})::get(this, \"\", \"{vif}\", {vif}))\n      \
         `uvm_error(get_full_name(), \"Failed to retrieve {vif} handle from config_db\")\n",
        if_type(name)
    )
}

/// Renders the agent class for one interface.
pub fn render_agent_class(name: &str, mode: &Mode) -> String {
    let agent = agent_class(name);
    let is_master = *mode == Mode::Master;
    let drv = driver_class(name);
    let drv_h = inst_handle(&drv);
    let sqr = sequencer_class(name);
    let sqr_h = inst_handle(&sqr);
    let mon = monitor_class(name);
    let mon_h = inst_handle(&mon);
    let cov = coverage_class(name);
    let cov_h = inst_handle(&cov);

    let mut out = class_banner("agent", &agent);
    writeln!(out, "class {agent} extends uvm_agent;").unwrap();
    writeln!(out, "  `uvm_component_utils({agent})").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  // Sub-component handles").unwrap();
    if is_master {
        writeln!(out, "  {drv} {drv_h};").unwrap();
        writeln!(out, "  {sqr} {sqr_h};").unwrap();
    }
    writeln!(out, "  {mon} {mon_h};").unwrap();
    writeln!(out, "  {cov} {cov_h};").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "  function new(string name = \"{agent}\", uvm_component parent = null);"
    )
    .unwrap();
    writeln!(out, "    super.new(name, parent);").unwrap();
    writeln!(out, "  endfunction").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual function void build_phase(uvm_phase phase);").unwrap();
    writeln!(out, "    super.build_phase(phase);").unwrap();
    writeln!(out, "    {mon_h} = {mon}::type_id::create(\"{mon_h}\", this);").unwrap();
    writeln!(out, "    {cov_h} = {cov}::type_id::create(\"{cov_h}\", this);").unwrap();
    if is_master {
        writeln!(out, "    {drv_h} = {drv}::type_id::create(\"{drv_h}\", this);").unwrap();
        writeln!(out, "    {sqr_h} = {sqr}::type_id::create(\"{sqr_h}\", this);").unwrap();
    }
    writeln!(out, "  endfunction").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual function void connect_phase(uvm_phase phase);").unwrap();
    writeln!(out, "    super.connect_phase(phase);").unwrap();
    if is_master {
        writeln!(out, "    {drv_h}.seq_item_port.connect({sqr_h}.seq_item_export);").unwrap();
    }
    writeln!(
        out,
        "    {mon_h}.{}.connect({cov_h}.analysis_export);",
        analysis_port(name)
    )
    .unwrap();
    writeln!(out, "  endfunction").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "endclass : {agent}").unwrap();
    out
}

/// Renders the driver stub (Master interfaces only).
pub fn render_driver(name: &str) -> String {
    let drv = driver_class(name);
    let tx = tx_type(name);
    let vif = vif_handle(name);

    let mut out = class_banner("driver", &drv);
    writeln!(out, "class {drv} extends uvm_driver#({tx});").unwrap();
    writeln!(out, "  `uvm_component_utils({drv})").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual {} {vif};", if_type(name)).unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "  function new(string name = \"{drv}\", uvm_component parent = null);"
    )
    .unwrap();
    writeln!(out, "    super.new(name, parent);").unwrap();
    writeln!(out, "  endfunction : new").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual function void build_phase(uvm_phase phase);").unwrap();
    writeln!(out, "    super.build_phase(phase);").unwrap();
    out.push_str(&vif_fetch(name));
    writeln!(out, "  endfunction : build_phase").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual task run_phase(uvm_phase phase);").unwrap();
    writeln!(
        out,
        "    `uvm_info(get_full_name(), \"run_phase started\", UVM_NONE)"
    )
    .unwrap();
    writeln!(out, "    forever begin").unwrap();
    writeln!(out, "      seq_item_port.get_next_item(req);").unwrap();
    writeln!(out, "      drive_tx(req);").unwrap();
    writeln!(out, "      seq_item_port.item_done();").unwrap();
    writeln!(out, "    end").unwrap();
    writeln!(out, "  endtask : run_phase").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  task drive_tx({tx} tx);").unwrap();
    writeln!(
        out,
        "    // TODO: Implement the {} protocol drive logic",
        interface_stem(name)
    )
    .unwrap();
    writeln!(out, "  endtask : drive_tx").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "endclass : {drv}").unwrap();
    out
}

/// Renders the sequencer typedef (Master interfaces only).
pub fn render_sequencer(name: &str) -> String {
    let sqr = sequencer_class(name);
    let mut out = class_banner("sequencer", &sqr);
    writeln!(out, "typedef uvm_sequencer#({}) {sqr};", tx_type(name)).unwrap();
    out
}

/// Renders the monitor stub.
pub fn render_monitor(name: &str) -> String {
    let mon = monitor_class(name);
    let tx = tx_type(name);
    let vif = vif_handle(name);
    let ap = analysis_port(name);

    let mut out = class_banner("monitor", &mon);
    writeln!(out, "class {mon} extends uvm_monitor;").unwrap();
    writeln!(out, "  `uvm_component_utils({mon})").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual {} {vif};", if_type(name)).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  uvm_analysis_port#({tx}) {ap};").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  {tx} tx;").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "  function new(string name = \"{mon}\", uvm_component parent = null);"
    )
    .unwrap();
    writeln!(out, "    super.new(name, parent);").unwrap();
    writeln!(out, "  endfunction : new").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual function void build_phase(uvm_phase phase);").unwrap();
    writeln!(out, "    super.build_phase(phase);").unwrap();
    writeln!(out, "    tx = {tx}::type_id::create(\"tx\");").unwrap();
    writeln!(out, "    {ap} = new(\"{ap}\", this);").unwrap();
    out.push_str(&vif_fetch(name));
    writeln!(out, "  endfunction : build_phase").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual task run_phase(uvm_phase phase);").unwrap();
    writeln!(
        out,
        "    `uvm_info(get_full_name(), \"run_phase started\", UVM_NONE)"
    )
    .unwrap();
    writeln!(out, "    forever begin").unwrap();
    writeln!(
        out,
        "      // TODO: Implement the {} protocol sampling",
        interface_stem(name)
    )
    .unwrap();
    writeln!(out, "      {ap}.write(tx);").unwrap();
    writeln!(out, "    end").unwrap();
    writeln!(out, "  endtask : run_phase").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "endclass : {mon}").unwrap();
    out
}

/// Renders the coverage-subscriber stub.
pub fn render_coverage(name: &str) -> String {
    let cov = coverage_class(name);
    let tx = tx_type(name);

    let mut out = class_banner("coverage subscriber", &cov);
    writeln!(out, "class {cov} extends uvm_subscriber#({tx});").unwrap();
    writeln!(out, "  `uvm_component_utils({cov})").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  {tx} tx;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  covergroup cg;").unwrap();
    writeln!(
        out,
        "    // TODO: Implement the {} functional coverage",
        interface_stem(name)
    )
    .unwrap();
    writeln!(out, "  endgroup").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "  function new(string name = \"{cov}\", uvm_component parent = null);"
    )
    .unwrap();
    writeln!(out, "    super.new(name, parent);").unwrap();
    writeln!(out, "    cg = new();").unwrap();
    writeln!(out, "  endfunction : new").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  virtual function void write(T t);").unwrap();
    writeln!(out, "    $cast(tx, t);").unwrap();
    writeln!(out, "    cg.sample();").unwrap();
    writeln!(out, "  endfunction : write").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "endclass : {cov}").unwrap();
    out
}

/// All files for one interface as `(file name, contents)` pairs, or `None`
/// when the interface has no usable name or a mode outside Master/Slave.
pub fn render_interface_files(intf: &Interface) -> Option<Vec<(String, String)>> {
    let name = intf.defined_name()?;
    if !intf.mode.generates_agent() {
        return None;
    }

    let mut files = vec![
        (
            format!("{}.sv", agent_class(name)),
            render_agent_class(name, &intf.mode),
        ),
        (format!("{}.sv", monitor_class(name)), render_monitor(name)),
        (format!("{}.sv", coverage_class(name)), render_coverage(name)),
    ];
    if intf.mode == Mode::Master {
        files.push((format!("{}.sv", driver_class(name)), render_driver(name)));
        files.push((format!("{}.sv", sequencer_class(name)), render_sequencer(name)));
    }
    Some(files)
}

/// Writes every agent directory and appends one combined summary section.
pub fn generate(cfg: &TbConfig, ctx: &GenContext) -> Result<()> {
    let mut section = SummarySection::new("Agent and component summary");
    let mut emitted = false;

    for intf in &cfg.interfaces {
        let (Some(name), Some(files)) = (intf.defined_name(), render_interface_files(intf)) else {
            continue;
        };
        let dir = ctx.agents_dir().join(interface_stem(name));
        for (file_name, contents) in &files {
            ctx.write_artifact(&dir.join(file_name), contents)?;
            section = section.bullet(format!("{}/{file_name}", interface_stem(name)));
        }
        emitted = true;
    }

    if !emitted {
        section = section.bullet("No Master/Slave interfaces; nothing generated");
    }
    section = section
        .todo("Implement the protocol drive logic in each driver's drive_tx task")
        .todo("Implement the protocol sampling in each monitor's run_phase loop")
        .todo("Fill in each coverage subscriber's covergroup");
    ctx.append_summary(&section)
}
