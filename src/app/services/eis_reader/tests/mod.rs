//! Tests for the EIS export reader

pub mod loader_tests;
pub mod parser_tests;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Render an export in the cycler layout with `(frequency, z_real, z_imag)` rows
pub fn build_export(comment: &str, rows: &[(f64, f64, f64)]) -> String {
    let mut content = String::new();
    content.push_str("Cycler Export,v2\n");
    content.push_str("Channel,7\n");

    // 23 metadata lines
    let _ = writeln!(content, "Comment,{}", comment);
    content.push_str("Start Time,2023-05-04 13:45:10\n");
    content.push_str("End Time,2023-05-04 13:52:40\n");
    for i in 0..20 {
        let _ = writeln!(content, "Field{},value{}", i, i);
    }

    // Lines 25-28 between metadata and header
    for i in 0..4 {
        let _ = writeln!(content, "Note{},", i);
    }

    content.push_str("Time,Voltage,ActFreq,Zreal1,Zimg1,Temperature,\n");
    content.push_str("s,V,Hz,mOhm,mOhm,degC,\n");
    content.push_str("-,-,-,-,-,-,\n");
    content.push_str("-,-,-,-,-,-,\n");
    content.push_str("-,-,-,-,-,-,\n");

    for (i, (frequency, z_real, z_imag)) in rows.iter().enumerate() {
        let _ = writeln!(
            content,
            "{},3.71,{},{},{},21.5,",
            i, frequency, z_real, z_imag
        );
    }
    content
}

/// Write an export to `dir/name`, creating the directory
pub fn write_export(dir: &Path, name: &str, comment: &str, rows: &[(f64, f64, f64)]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, build_export(comment, rows)).unwrap();
    path
}

/// A short realistic sweep from 1 kHz down
pub fn sample_rows() -> Vec<(f64, f64, f64)> {
    vec![
        (1000.0, -0.5, 2.0),
        (500.0, 0.2, 1.0),
        (100.0, 0.8, -0.4),
        (10.0, 1.1, -0.9),
        (1.0, 1.6, -1.2),
    ]
}
