// Licensed under the Apache-2.0 license

//! Parser for the tabular testbench description.
//!
//! The input is a CSV-like mini-format with one logical record per row:
//!
//! ```text
//! DUT_NAME , usb_ctrl
//! NUM_INTF , 2
//! INTF     , i2c , M , 100 , i2c_clk , [i2c_rst , active_low]
//! INTF     , uart, S , 200 , uart_clk
//! ```
//!
//! The grammar is forward-tolerant: unknown keys, ragged rows, and malformed
//! optional fields never abort the parse. Every tolerated irregularity is
//! surfaced as a structured [`ParseWarning`] so callers can report (or assert
//! on) exactly what was dropped. The single hard error is a non-numeric
//! `NUM_INTF` value.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use thiserror::Error;

use crate::config::{defined, Interface, Mode, ResetPolarity, TbConfig};
use crate::naming;

/// The one fatal condition the parser recognizes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("row {row}: NUM_INTF value {value:?} is not an integer")]
    InvalidInterfaceCount { row: usize, value: String },
}

/// A tolerated input irregularity. None of these stop the parse; the
/// affected cell or row is dropped and the remainder of the input is used.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseWarning {
    #[error("row {row}: unrecognized key {key:?} ignored")]
    UnknownKey { row: usize, key: String },
    #[error("row {row}: {key} row is missing its value; row ignored")]
    MissingValue { row: usize, key: String },
    #[error("row {row}: INTF row has {fields} fields, expected at least 5; row ignored")]
    ShortInterfaceRow { row: usize, fields: usize },
    #[error(
        "row {row}: interface {name:?}: frequency {value:?} is not numeric; \
         clock generation disabled"
    )]
    NonNumericFrequency {
        row: usize,
        name: String,
        value: String,
    },
    #[error("NUM_INTF declares {declared} interfaces but {parsed} INTF rows were parsed")]
    InterfaceCountMismatch { declared: i64, parsed: usize },
    #[error("row {row}: duplicate interface name {name:?}; its files overwrite the earlier ones")]
    DuplicateInterface { row: usize, name: String },
}

/// Result of a parse: the model plus everything the grammar tolerated.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    pub config: TbConfig,
    pub warnings: Vec<ParseWarning>,
}

/// Parses a description file from disk.
pub fn parse_file(path: &Path) -> anyhow::Result<ParseOutput> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_str(&input).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parses an in-memory description. Rows are lines; cells are comma-separated.
pub fn parse_str(input: &str) -> Result<ParseOutput, ParseError> {
    let rows: Vec<Vec<String>> = input
        .lines()
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect();
    parse_rows(&rows)
}

/// Parses a sequence of raw rows into a [`TbConfig`].
///
/// Cells are trimmed and blank cells dropped before dispatch; a row that
/// becomes empty is skipped. Dispatch is keyed on the first cell, upper-cased
/// with spaces replaced by underscores. `INTF` row order becomes the
/// interface order of the model; duplicates are kept.
pub fn parse_rows(rows: &[Vec<String>]) -> Result<ParseOutput, ParseError> {
    let mut config = TbConfig::default();
    let mut warnings = Vec::new();
    let mut seen_names = HashSet::new();

    for (idx, raw) in rows.iter().enumerate() {
        let row_no = idx + 1;
        let row: Vec<&str> = raw
            .iter()
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .collect();
        if row.is_empty() {
            continue;
        }

        let key = row[0].to_uppercase().replace(' ', "_");
        match key.as_str() {
            "DUT_NAME" => {
                if row.len() >= 2 {
                    config.dut_name = Some(row[1].to_string());
                } else {
                    warnings.push(ParseWarning::MissingValue { row: row_no, key });
                }
            }
            "NUM_INTF" => {
                if row.len() >= 2 {
                    let count = row[1].parse::<i64>().map_err(|_| {
                        ParseError::InvalidInterfaceCount {
                            row: row_no,
                            value: row[1].to_string(),
                        }
                    })?;
                    config.declared_interface_count = Some(count);
                } else {
                    warnings.push(ParseWarning::MissingValue { row: row_no, key });
                }
            }
            "INTF" => {
                if row.len() < 5 {
                    warnings.push(ParseWarning::ShortInterfaceRow {
                        row: row_no,
                        fields: row.len(),
                    });
                    continue;
                }
                let intf = parse_interface(row_no, &row, &mut warnings);
                if let Some(name) = intf.defined_name() {
                    if !seen_names.insert(naming::interface_stem(name)) {
                        warnings.push(ParseWarning::DuplicateInterface {
                            row: row_no,
                            name: name.to_string(),
                        });
                    }
                }
                config.interfaces.push(intf);
            }
            _ => warnings.push(ParseWarning::UnknownKey { row: row_no, key }),
        }
    }

    if let Some(declared) = config.declared_interface_count {
        if declared != config.interfaces.len() as i64 {
            warnings.push(ParseWarning::InterfaceCountMismatch {
                declared,
                parsed: config.interfaces.len(),
            });
        }
    }

    Ok(ParseOutput { config, warnings })
}

/// Builds one [`Interface`] from a dispatched `INTF` row of at least 5 cells.
fn parse_interface(row_no: usize, row: &[&str], warnings: &mut Vec<ParseWarning>) -> Interface {
    let name = row[1].to_string();
    let mode = Mode::parse(row[2]);

    let clock_frequency_mhz = match defined(row[3]) {
        None => None,
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) => Some(value),
            Err(_) => {
                warnings.push(ParseWarning::NonNumericFrequency {
                    row: row_no,
                    name: name.clone(),
                    value: raw.to_string(),
                });
                None
            }
        },
    };

    let clock_signal = defined(row[4]).map(str::to_string);
    let (reset_signal, reset_polarity) = parse_reset_field(&row[5..]);

    Interface {
        name,
        mode,
        clock_frequency_mhz,
        clock_signal,
        reset_signal,
        reset_polarity,
    }
}

/// Parses the optional reset field from the cells past the clock column.
///
/// Tolerated shapes: a single token (`rst`), a token with an embedded comma
/// (`rst,active_low`), and the bracket-split CSV form where `[rst` and
/// `active_low]` arrive as two cells. Brackets are cosmetic and stripped.
/// A named reset without a polarity token defaults to active-high.
fn parse_reset_field(cells: &[&str]) -> (Option<String>, Option<ResetPolarity>) {
    let Some(first) = cells.first() else {
        return (None, None);
    };
    let first = strip_brackets(first);

    let (name_token, polarity_token) = if let Some((name, polarity)) = first.split_once(',') {
        (strip_brackets(name), Some(strip_brackets(polarity)))
    } else if let Some(second) = cells.get(1) {
        (first, Some(strip_brackets(second)))
    } else {
        (first, None)
    };

    let Some(name) = defined(name_token) else {
        return (None, None);
    };
    let polarity = polarity_token
        .map(ResetPolarity::parse)
        .unwrap_or(ResetPolarity::ActiveHigh);
    (Some(name.to_string()), Some(polarity))
}

fn strip_brackets(token: &str) -> &str {
    token
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(input: &str) -> ParseOutput {
        parse_str(input).expect("parse should succeed")
    }

    #[test]
    fn test_full_description() {
        let out = parse_ok(
            "DUT_NAME , usb_ctrl\n\
             NUM_INTF , 2\n\
             INTF , i2c , M , 100 , i2c_clk , [i2c_rst , active_low]\n\
             INTF , uart, S , 200 , uart_clk, [uart_rst, active_high]\n",
        );
        assert!(out.warnings.is_empty(), "unexpected: {:?}", out.warnings);

        let cfg = &out.config;
        assert_eq!(cfg.dut_name.as_deref(), Some("usb_ctrl"));
        assert_eq!(cfg.declared_interface_count, Some(2));
        assert_eq!(cfg.interfaces.len(), 2);

        let i2c = &cfg.interfaces[0];
        assert_eq!(i2c.name, "i2c");
        assert_eq!(i2c.mode, Mode::Master);
        assert_eq!(i2c.clock_frequency_mhz, Some(100.0));
        assert_eq!(i2c.clock_signal.as_deref(), Some("i2c_clk"));
        assert_eq!(i2c.reset_signal.as_deref(), Some("i2c_rst"));
        assert_eq!(i2c.reset_polarity, Some(ResetPolarity::ActiveLow));

        let uart = &cfg.interfaces[1];
        assert_eq!(uart.mode, Mode::Slave);
        assert_eq!(uart.reset_signal.as_deref(), Some("uart_rst"));
        assert_eq!(uart.reset_polarity, Some(ResetPolarity::ActiveHigh));
    }

    #[test]
    fn test_interface_order_is_input_order() {
        let out = parse_ok(
            "INTF , zeta , M , 10 , zclk\n\
             INTF , alpha , S , 20 , aclk\n",
        );
        let names: Vec<_> = out.config.interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn test_reset_field_single_token_defaults_active_high() {
        let out = parse_ok("INTF , spi , M , 50 , spi_clk , spi_rst\n");
        let intf = &out.config.interfaces[0];
        assert_eq!(intf.reset_signal.as_deref(), Some("spi_rst"));
        assert_eq!(intf.reset_polarity, Some(ResetPolarity::ActiveHigh));
    }

    #[test]
    fn test_reset_field_absent_leaves_polarity_unset() {
        let out = parse_ok("INTF , spi , M , 50 , spi_clk\n");
        let intf = &out.config.interfaces[0];
        assert_eq!(intf.reset_signal, None);
        assert_eq!(intf.reset_polarity, None);
    }

    #[test]
    fn test_reset_field_embedded_comma() {
        // A quoted-style cell that kept its comma intact.
        let rows = vec![vec![
            "INTF".to_string(),
            "spi".to_string(),
            "M".to_string(),
            "50".to_string(),
            "spi_clk".to_string(),
            "spi_rst,0".to_string(),
        ]];
        let out = parse_rows(&rows).unwrap();
        let intf = &out.config.interfaces[0];
        assert_eq!(intf.reset_signal.as_deref(), Some("spi_rst"));
        assert_eq!(intf.reset_polarity, Some(ResetPolarity::ActiveLow));
    }

    #[test]
    fn test_nil_reset_is_absent() {
        let out = parse_ok("INTF , spi , M , 50 , spi_clk , nil\n");
        let intf = &out.config.interfaces[0];
        assert_eq!(intf.reset_signal, None);
        assert_eq!(intf.reset_polarity, None);
    }

    #[test]
    fn test_nil_clock_and_frequency() {
        let out = parse_ok("INTF , spi , M , nil , nil\n");
        let intf = &out.config.interfaces[0];
        assert_eq!(intf.clock_frequency_mhz, None);
        assert_eq!(intf.clock_signal, None);
        assert!(out.warnings.is_empty(), "nil is not a warning");
    }

    #[test]
    fn test_non_numeric_frequency_warns_and_clears() {
        let out = parse_ok("INTF , spi , M , fast , spi_clk\n");
        assert_eq!(out.config.interfaces[0].clock_frequency_mhz, None);
        assert_eq!(
            out.warnings,
            vec![ParseWarning::NonNumericFrequency {
                row: 1,
                name: "spi".to_string(),
                value: "fast".to_string(),
            }]
        );
    }

    #[test]
    fn test_num_intf_non_numeric_is_fatal() {
        let err = parse_str("NUM_INTF , two\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidInterfaceCount {
                row: 1,
                value: "two".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_key_warns() {
        let out = parse_ok("dut name , usb\nFOO , bar\n");
        assert_eq!(out.config.dut_name.as_deref(), Some("usb"));
        assert_eq!(
            out.warnings,
            vec![ParseWarning::UnknownKey {
                row: 2,
                key: "FOO".to_string(),
            }]
        );
    }

    #[test]
    fn test_key_normalization_handles_spaces_and_case() {
        let out = parse_ok("Dut Name , usb\nnum intf , 0\n");
        assert_eq!(out.config.dut_name.as_deref(), Some("usb"));
        assert_eq!(out.config.declared_interface_count, Some(0));
    }

    #[test]
    fn test_short_intf_row_is_dropped_with_warning() {
        let out = parse_ok("INTF , i2c , M\n");
        assert!(out.config.interfaces.is_empty());
        assert_eq!(
            out.warnings,
            vec![ParseWarning::ShortInterfaceRow { row: 1, fields: 3 }]
        );
    }

    #[test]
    fn test_blank_cells_and_rows_are_skipped() {
        let out = parse_ok("\n ,  , \nDUT_NAME ,  , usb\n");
        // The blank second cell is dropped, so "usb" becomes the value.
        assert_eq!(out.config.dut_name.as_deref(), Some("usb"));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_count_mismatch_warns() {
        let out = parse_ok(
            "NUM_INTF , 3\n\
             INTF , i2c , M , 100 , i2c_clk\n",
        );
        assert_eq!(
            out.warnings,
            vec![ParseWarning::InterfaceCountMismatch {
                declared: 3,
                parsed: 1,
            }]
        );
    }

    #[test]
    fn test_duplicate_interfaces_kept_with_warning() {
        let out = parse_ok(
            "INTF , i2c , M , 100 , i2c_clk\n\
             INTF , I2C , S , 200 , i2c_clk2\n",
        );
        assert_eq!(out.config.interfaces.len(), 2, "duplicates pass through");
        assert_eq!(
            out.warnings,
            vec![ParseWarning::DuplicateInterface {
                row: 2,
                name: "I2C".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_value_rows_warn() {
        let out = parse_ok("DUT_NAME\nNUM_INTF\n");
        assert_eq!(out.config.dut_name, None);
        assert_eq!(out.config.declared_interface_count, None);
        assert_eq!(out.warnings.len(), 2);
        assert!(matches!(
            out.warnings[0],
            ParseWarning::MissingValue { row: 1, .. }
        ));
    }
}
