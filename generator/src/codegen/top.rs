// Licensed under the Apache-2.0 license

//! Top-level wiring generator: `TOP/top.sv`.
//!
//! Declares the clock and reset nets, generates free-running clocks from the
//! configured frequencies, pulses the resets off the first active clock edge,
//! instantiates one interface handle per named interface, stubs the DUT, and
//! registers every virtual-interface handle in the config db under its
//! derived name. This is the one generator that runs without a DUT name; it
//! falls back to the `dut` stem instead of skipping.

use std::fmt::Write;

use anyhow::Result;

use crate::config::TbConfig;
use crate::context::GenContext;
use crate::naming::{
    base_test, dut_instance, format_mhz, format_ns, if_type, vif_handle, FALLBACK_STEM,
};
use crate::summary::SummarySection;

/// Renders the complete `top.sv` artifact.
pub fn render_top(cfg: &TbConfig) -> String {
    let stem = cfg.dut_stem().unwrap_or_else(|| FALLBACK_STEM.to_string());
    let mut out = String::new();

    writeln!(out, "module top;").unwrap();
    writeln!(out).unwrap();

    // Net declarations, one pair per interface that wires them.
    for intf in &cfg.interfaces {
        if let Some(clk) = intf.clock_signal.as_deref() {
            writeln!(out, "  logic {clk};").unwrap();
        }
        if let Some(rst) = intf.reset_signal.as_deref() {
            writeln!(out, "  logic {rst};").unwrap();
        }
    }
    writeln!(out).unwrap();

    // Free-running clocks. A missing or non-positive frequency suppresses
    // the generation block but not the declaration above.
    for intf in &cfg.interfaces {
        let (Some(clk), Some(freq)) =
            (intf.clock_signal.as_deref(), intf.clock_generation_frequency())
        else {
            continue;
        };
        let period = 1000.0 / freq;
        let half = period / 2.0;
        writeln!(
            out,
            "  // {clk} clock generation at {} MHz (~{}ns)",
            format_mhz(freq),
            format_ns(period)
        )
        .unwrap();
        writeln!(out, "  initial {clk} = 0;").unwrap();
        writeln!(out, "  always #{} {clk} = ~{clk};", format_ns(half)).unwrap();
        writeln!(out).unwrap();
    }

    // Reset pulses, gated on the first active edge of the paired clock.
    for intf in &cfg.interfaces {
        let (Some(clk), Some(rst), Some(polarity)) = (
            intf.clock_signal.as_deref(),
            intf.reset_signal.as_deref(),
            intf.reset_polarity,
        ) else {
            continue;
        };
        writeln!(out, "  // {rst} reset pulse using @{clk}, {polarity}").unwrap();
        writeln!(out, "  initial begin").unwrap();
        writeln!(out, "    {rst} = {};", polarity.assert_value()).unwrap();
        writeln!(out, "    @(posedge {clk});").unwrap();
        writeln!(out, "    {rst} = {};", polarity.deassert_value()).unwrap();
        writeln!(out, "  end").unwrap();
        writeln!(out).unwrap();
    }

    writeln!(out, "  // Interface instantiations").unwrap();
    for name in cfg.interfaces.iter().filter_map(|i| i.defined_name()) {
        writeln!(
            out,
            "  {} {}();  // TODO: Create the {name} interface definition",
            if_type(name),
            vif_handle(name)
        )
        .unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "  // DUT instantiation").unwrap();
    writeln!(out, "  {} {} (", stem, dut_instance(&stem)).unwrap();
    writeln!(out, "    // TODO: Connect ports using the interface handles").unwrap();
    writeln!(out, "  );").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "  // UVM run_test() call").unwrap();
    writeln!(out, "  initial begin").unwrap();
    writeln!(out, "    run_test(\"{}\");", base_test(&stem)).unwrap();
    writeln!(out, "  end").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "  // Passing interfaces to UVM via uvm_config_db").unwrap();
    writeln!(out, "  initial begin").unwrap();
    for name in cfg.interfaces.iter().filter_map(|i| i.defined_name()) {
        let vif = vif_handle(name);
        writeln!(
            out,
            "    uvm_config_db#(virtual {})::set(null, \"*\", \"{vif}\", {vif});",
            if_type(name)
        )
        .unwrap();
    }
    writeln!(out, "  end").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "endmodule").unwrap();
    out
}

/// Builds the summary section enumerating everything `top.sv` wires up.
pub fn summary(cfg: &TbConfig) -> SummarySection {
    let stem = cfg.dut_stem().unwrap_or_else(|| FALLBACK_STEM.to_string());
    let mut section = SummarySection::new("top.sv generation summary")
        .bullet(format!(
            "DUT name: {}",
            cfg.dut_name.as_deref().unwrap_or("(missing, using fallback)")
        ))
        .bullet(format!(
            "Declared interface count: {}",
            cfg.declared_interface_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "(not declared)".to_string())
        ))
        .bullet(format!("module top; with DUT {} instantiated", stem));

    for intf in &cfg.interfaces {
        if let Some(clk) = intf.clock_signal.as_deref() {
            let speed = intf
                .clock_frequency_mhz
                .map(|f| format!("{} MHz", format_mhz(f)))
                .unwrap_or_else(|| "no frequency".to_string());
            section = section.bullet(format!("Clock {clk} ({speed})"));
        }
        if let (Some(rst), Some(polarity)) = (intf.reset_signal.as_deref(), intf.reset_polarity) {
            let driver = intf
                .clock_signal
                .as_deref()
                .map(|clk| format!("driven by {clk}"))
                .unwrap_or_else(|| "no clock, pulse omitted".to_string());
            section = section.bullet(format!("Reset {rst} ({polarity}) {driver}"));
        }
    }
    for name in cfg.interfaces.iter().filter_map(|i| i.defined_name()) {
        section = section.bullet(format!("Interface handle {} {}()", if_type(name), vif_handle(name)));
    }
    section = section
        .bullet("uvm_config_db set() calls for every virtual interface handle".to_string())
        .bullet(format!("run_test(\"{}\") to launch the simulation", base_test(&stem)));

    for name in cfg.interfaces.iter().filter_map(|i| i.defined_name()) {
        section = section.todo(format!("Connect {} to the DUT ports", vif_handle(name)));
    }
    section.todo("Define the SystemVerilog interface files (*_if.sv)")
}

/// Writes `top.sv` and appends its summary section.
pub fn generate(cfg: &TbConfig, ctx: &GenContext) -> Result<()> {
    let path = ctx.top_dir().join("top.sv");
    ctx.write_artifact(&path, &render_top(cfg))?;
    ctx.append_summary(&summary(cfg))
}
