// Licensed under the Apache-2.0 license

//! End-to-end pipeline tests: parse a description, generate the full tree,
//! and check the cross-run behaviors (artifact overwrite-idempotence,
//! summary append-on-rerun).

use std::collections::BTreeMap;
use std::path::Path;

use tests_integration::{generate_into, SAMPLE_DESCRIPTION};
use walkdir::WalkDir;

/// Every generated SystemVerilog file, relative path → contents.
fn collect_sv_files(root: &Path) -> BTreeMap<String, String> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "sv"))
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned();
            let contents = std::fs::read_to_string(e.path()).unwrap();
            (rel, contents)
        })
        .collect()
}

#[test]
fn smoke_test() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("verif");
    generate_into(SAMPLE_DESCRIPTION, &root).unwrap();

    let files = collect_sv_files(&root);
    let expected = [
        "ENV/AGENTS/i2c/i2c_agent.sv",
        "ENV/AGENTS/i2c/i2c_cov.sv",
        "ENV/AGENTS/i2c/i2c_drv.sv",
        "ENV/AGENTS/i2c/i2c_mon.sv",
        "ENV/AGENTS/i2c/i2c_sqr.sv",
        "ENV/AGENTS/uart/uart_agent.sv",
        "ENV/AGENTS/uart/uart_cov.sv",
        "ENV/AGENTS/uart/uart_mon.sv",
        "ENV/usb_ctrl_env.sv",
        "SEQ_LIB/usb_ctrl_base_seq.sv",
        "TEST_LIB/usb_ctrl_base_test.sv",
        "TOP/top.sv",
    ];
    let names: Vec<&str> = files.keys().map(String::as_str).collect();
    assert_eq!(names, expected, "generated tree");

    // The empty scaffolding directories exist even though nothing fills them.
    assert!(root.join("RAL").is_dir());
    assert!(root.join("ENV/SBD").is_dir());

    // Spot-check the wiring: active-low reset pulse gated on the i2c clock.
    let top = &files["TOP/top.sv"];
    assert!(top.contains("always #5.0 i2c_clk = ~i2c_clk;"));
    assert!(top.contains("// i2c_rst reset pulse using @i2c_clk, active low"));
    assert!(top.contains("run_test(\"usb_ctrl_base_test\");"));

    // The slave agent has no driver or sequencer.
    assert!(!files.contains_key("ENV/AGENTS/uart/uart_drv.sv"));
    assert!(!files.contains_key("ENV/AGENTS/uart/uart_sqr.sv"));
}

#[test]
fn summary_sections_follow_generator_order() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("verif");
    generate_into(SAMPLE_DESCRIPTION, &root).unwrap();

    let summary = std::fs::read_to_string(root.join("SIM/README.txt")).unwrap();
    let order = [
        "top.sv generation summary",
        "usb_ctrl_base_test.sv summary",
        "usb_ctrl_env.sv summary",
        "Agent and component summary",
        "usb_ctrl_base_seq.sv summary",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|title| summary.find(title).unwrap_or_else(|| panic!("missing {title}")))
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "sections out of order: {positions:?}"
    );
}

#[test]
fn rerun_overwrites_artifacts_but_doubles_summary() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("verif");

    generate_into(SAMPLE_DESCRIPTION, &root).unwrap();
    let first_files = collect_sv_files(&root);
    let first_summary = std::fs::read_to_string(root.join("SIM/README.txt")).unwrap();

    generate_into(SAMPLE_DESCRIPTION, &root).unwrap();
    let second_files = collect_sv_files(&root);
    let second_summary = std::fs::read_to_string(root.join("SIM/README.txt")).unwrap();

    assert_eq!(first_files, second_files, "artifacts are overwrite-idempotent");
    assert_eq!(
        second_summary.len(),
        first_summary.len() * 2,
        "summary is append-only and doubles on rerun"
    );
    assert!(second_summary.starts_with(&first_summary));
}

#[test]
fn missing_dut_name_generates_top_only() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("verif");
    generate_into("INTF , i2c , M , 100 , i2c_clk\n", &root).unwrap();

    // Top falls back to the `dut` stem...
    let top = std::fs::read_to_string(root.join("TOP/top.sv")).unwrap();
    assert!(top.contains("dut u_dut ("));
    assert!(top.contains("run_test(\"dut_base_test\");"));

    // ...while the DUT-dependent generators emit nothing.
    let files = collect_sv_files(&root);
    assert!(!files.keys().any(|f| f.starts_with("TEST_LIB/")));
    assert!(!files.keys().any(|f| f.starts_with("SEQ_LIB/")));
    assert!(!files.keys().any(|f| f.ends_with("_env.sv")));

    // Agent generation does not need the DUT name.
    assert!(files.contains_key("ENV/AGENTS/i2c/i2c_agent.sv"));
}
