// Licensed under the Apache-2.0 license

//! In-memory configuration model for one generation run.
//!
//! The model is produced once by the [`crate::parse`] module and read
//! immutably by every generator afterwards. Field values keep the raw input
//! casing; accessors apply the `nil` absent-sentinel rule so generators never
//! re-implement it.

use crate::naming;

/// Direction of a bus interface, as parsed from the `INTF` mode column.
///
/// Anything other than `M`/`S` (case-insensitive) is carried through as
/// [`Mode::Unknown`] so diagnostics can show the original token. Unknown modes
/// are skipped by the agent generator but still receive an agent handle in the
/// environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Master,
    Slave,
    Unknown(String),
}

impl Mode {
    /// Parses the mode column token.
    pub fn parse(token: &str) -> Mode {
        match token.trim().to_uppercase().as_str() {
            "M" => Mode::Master,
            "S" => Mode::Slave,
            _ => Mode::Unknown(token.trim().to_string()),
        }
    }

    /// True for the modes that produce agent components (Master and Slave).
    pub fn generates_agent(&self) -> bool {
        matches!(self, Mode::Master | Mode::Slave)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Master => write!(f, "M"),
            Mode::Slave => write!(f, "S"),
            Mode::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// Polarity of a reset signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetPolarity {
    ActiveHigh,
    ActiveLow,
}

impl ResetPolarity {
    /// Maps a polarity token to a polarity.
    ///
    /// Only the recognized low markers (`active_low`, `0`) select
    /// [`ResetPolarity::ActiveLow`]; every other token, including an
    /// unrecognized one, codes active-high.
    pub fn parse(token: &str) -> ResetPolarity {
        let token = token.trim();
        if token.eq_ignore_ascii_case("active_low") || token == "0" {
            ResetPolarity::ActiveLow
        } else {
            ResetPolarity::ActiveHigh
        }
    }

    /// Signal value driven while the reset is asserted.
    pub fn assert_value(self) -> char {
        match self {
            ResetPolarity::ActiveHigh => '1',
            ResetPolarity::ActiveLow => '0',
        }
    }

    /// Signal value driven once the reset deasserts.
    pub fn deassert_value(self) -> char {
        match self {
            ResetPolarity::ActiveHigh => '0',
            ResetPolarity::ActiveLow => '1',
        }
    }
}

impl std::fmt::Display for ResetPolarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetPolarity::ActiveHigh => write!(f, "active high"),
            ResetPolarity::ActiveLow => write!(f, "active low"),
        }
    }
}

/// One parsed bus-interface description.
#[derive(Clone, Debug, PartialEq)]
pub struct Interface {
    /// Raw interface name, case-preserved. Use [`Interface::defined_name`]
    /// to apply the `nil` sentinel.
    pub name: String,
    /// Direction of the interface.
    pub mode: Mode,
    /// Clock frequency in MHz. `None` when the column was absent, `nil`, or
    /// not numeric. Non-positive values are kept but suppress clock
    /// generation.
    pub clock_frequency_mhz: Option<f64>,
    /// Clock signal name; `nil` and absent normalize to `None`.
    pub clock_signal: Option<String>,
    /// Reset signal name; `nil` and absent normalize to `None`.
    pub reset_signal: Option<String>,
    /// Reset polarity. `Some` exactly when `reset_signal` is `Some`;
    /// defaults to active-high when the reset was named without a polarity.
    pub reset_polarity: Option<ResetPolarity>,
}

impl Interface {
    /// The interface name, or `None` when it is empty or the `nil` sentinel
    /// (compared case-insensitively).
    pub fn defined_name(&self) -> Option<&str> {
        defined(&self.name)
    }

    /// True when the interface has a usable clock frequency for clock
    /// generation (present and strictly positive).
    pub fn clock_generation_frequency(&self) -> Option<f64> {
        self.clock_frequency_mhz.filter(|f| *f > 0.0)
    }
}

/// Applies the absent-sentinel rule to a raw token: empty and `nil`
/// (case-insensitive) mean "not provided".
pub fn defined(token: &str) -> Option<&str> {
    let token = token.trim();
    if token.is_empty() || token.eq_ignore_ascii_case("nil") {
        None
    } else {
        Some(token)
    }
}

/// The complete configuration model: the DUT plus its ordered interfaces.
///
/// Interface order is insertion order from the input and is the only
/// iteration order used anywhere; it becomes both the file emission order and
/// the summary order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TbConfig {
    /// DUT name as given in the input.
    pub dut_name: Option<String>,
    /// Advisory interface count from the `NUM_INTF` row. Never enforced
    /// against the parsed list; a mismatch only produces a warning.
    pub declared_interface_count: Option<i64>,
    /// Parsed interfaces in input order.
    pub interfaces: Vec<Interface>,
}

impl TbConfig {
    /// Canonical lower-cased DUT identifier stem, when a DUT name was parsed.
    pub fn dut_stem(&self) -> Option<String> {
        self.dut_name
            .as_deref()
            .and_then(defined)
            .map(naming::dut_stem)
    }
}
