// Licensed under the Apache-2.0 license

//! Derived-identifier functions shared by every generator.
//!
//! All cross-file names (class names, handle names, config-db keys) are
//! derived here and nowhere else. The generators reference the same interface
//! from several files, so two call sites deriving the same identifier must
//! produce byte-identical strings; funneling every derivation through this
//! module makes that hold by construction.

/// Identifier stem used by the top-level generator when no DUT name was parsed.
pub const FALLBACK_STEM: &str = "dut";

/// Canonical identifier stem for a DUT name.
///
/// # Examples
/// ```
/// use uvmtb_generator::naming::dut_stem;
/// assert_eq!(dut_stem("USB_Ctrl"), "usb_ctrl");
/// ```
pub fn dut_stem(dut_name: &str) -> String {
    dut_name.trim().to_lowercase()
}

/// Base-test class name for a DUT stem.
pub fn base_test(stem: &str) -> String {
    format!("{stem}_base_test")
}

/// Environment class name for a DUT stem.
pub fn env_class(stem: &str) -> String {
    format!("{stem}_env")
}

/// Base-sequence class name for a DUT stem.
pub fn base_seq(stem: &str) -> String {
    format!("{stem}_base_seq")
}

/// Scoreboard class name for a DUT stem. The scoreboard itself is never
/// generated; this name only appears in commented-out stubs.
pub fn scoreboard_class(stem: &str) -> String {
    format!("{stem}_sbd")
}

/// Instance name of the DUT inside the top module.
pub fn dut_instance(stem: &str) -> String {
    format!("u_{stem}")
}

/// Canonical lower-cased stem for an interface name.
pub fn interface_stem(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Agent class name for an interface.
///
/// # Examples
/// ```
/// use uvmtb_generator::naming::agent_class;
/// assert_eq!(agent_class("I2C"), "i2c_agent");
/// ```
pub fn agent_class(name: &str) -> String {
    format!("{}_agent", interface_stem(name))
}

/// Driver class name for an interface.
pub fn driver_class(name: &str) -> String {
    format!("{}_drv", interface_stem(name))
}

/// Sequencer type name for an interface.
pub fn sequencer_class(name: &str) -> String {
    format!("{}_sqr", interface_stem(name))
}

/// Monitor class name for an interface.
pub fn monitor_class(name: &str) -> String {
    format!("{}_mon", interface_stem(name))
}

/// Coverage-subscriber class name for an interface.
pub fn coverage_class(name: &str) -> String {
    format!("{}_cov", interface_stem(name))
}

/// SystemVerilog interface type name for an interface.
pub fn if_type(name: &str) -> String {
    format!("{}_if", interface_stem(name))
}

/// Transaction (sequence item) type name for an interface.
pub fn tx_type(name: &str) -> String {
    format!("{}_tx", interface_stem(name))
}

/// Analysis-port handle name for an interface.
pub fn analysis_port(name: &str) -> String {
    format!("{}_ap_h", interface_stem(name))
}

/// Virtual-interface handle name for an interface. Doubles as the config-db
/// lookup key: the top module registers under this string and the driver and
/// monitor stubs retrieve with it.
pub fn vif_handle(name: &str) -> String {
    format!("{}_vif", interface_stem(name))
}

/// Instance-handle name for a class (the `_h` convention used everywhere a
/// component is instantiated).
pub fn inst_handle(class: &str) -> String {
    format!("{class}_h")
}

/// Formats a nanosecond value for emission into generated code.
///
/// Values are rounded to three decimal places, trailing zeros are trimmed,
/// and at least one decimal place is kept so periods read as delays.
///
/// # Examples
/// ```
/// use uvmtb_generator::naming::format_ns;
/// assert_eq!(format_ns(10.0), "10.0");
/// assert_eq!(format_ns(1000.0 / 240.0), "4.167");
/// ```
pub fn format_ns(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let mut out = format!("{rounded:.3}");
    while out.ends_with('0') && !out.ends_with(".0") {
        out.pop();
    }
    out
}

/// Formats a frequency in MHz for emission into comments and summaries.
/// Whole numbers drop the fractional part entirely.
pub fn format_mhz(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format_ns(value)
    }
}
