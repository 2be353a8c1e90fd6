// Licensed under the Apache-2.0 license

//! UVM testbench scaffolding generator.
//!
//! This crate turns a tabular hardware-interface description (a DUT name plus
//! an ordered list of bus interfaces with their clock/reset wiring) into a
//! tree of skeletal SystemVerilog verification components and a cumulative
//! build summary. It is a scaffolder, not a compiler: the emitted files are
//! stubs for the user to fill in, and nothing validates them against a
//! simulator.
//!
//! ## Generation Flow
//!
//! ```text
//! description file → parse → TbConfig → top/test/env/agent/seq generators
//!                      │                        │
//!                      └── ParseWarning[]       └── artifacts + summary sections
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use uvmtb_generator::{codegen, parse, GenContext};
//!
//! # fn main() -> anyhow::Result<()> {
//! let parsed = parse::parse_file(Path::new("UVM_TB_PARAMS.csv"))?;
//! let ctx = GenContext::new("verif");
//! ctx.bootstrap()?;
//! codegen::generate_all(&parsed.config, &ctx)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: the in-memory model ([`TbConfig`], [`Interface`])
//! - [`parse`]: the tolerant tabular parser and its structured warnings
//! - [`naming`]: pure derivation functions for every cross-file identifier
//! - [`context`]: output tree layout and the append-only summary sink
//! - [`summary`]: the summary section value type
//! - [`codegen`]: the five artifact generators

pub mod codegen;
pub mod config;
pub mod context;
pub mod naming;
pub mod parse;
pub mod summary;

pub use codegen::generate_all;
pub use config::{Interface, Mode, ResetPolarity, TbConfig};
pub use context::GenContext;
pub use parse::{parse_file, parse_rows, parse_str, ParseError, ParseOutput, ParseWarning};
pub use summary::SummarySection;
