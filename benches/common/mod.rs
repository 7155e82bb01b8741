//! Shared frame generators for benchmarks.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builds a JSON frame document with a string, an array, and a scalar column.
pub fn frame_document(num_rows: usize, array_len: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(num_rows);
    for i in 0..num_rows {
        let wifi: Vec<String> = (0..array_len)
            .map(|_| format!("{:.3}", rng.gen_range(-90.0..-30.0)))
            .collect();
        rows.push(format!(
            "[\"ROOM{}\",[{}],{:.3}]",
            i % 7,
            wifi.join(","),
            rng.gen_range(0.5..2.0)
        ));
    }
    format!(
        "{{\"description\":\"bench\",\"batchid\":\"b{seed}\",\
         \"var_names\":[\"room\",\"wifi\",\"acceleration\"],\
         \"var_types\":[\"string\",\"[]float64\",\"float64\"],\
         \"data\":[{}]}}",
        rows.join(",")
    )
}

/// Writes `num_files` frame files plus a manifest into `dir`.
pub fn write_dataset(dir: &Path, num_files: usize, rows_per_file: usize) -> PathBuf {
    let mut files = Vec::with_capacity(num_files);
    for i in 0..num_files {
        let name = format!("frame{i}.json");
        std::fs::write(
            dir.join(&name),
            frame_document(rows_per_file, 8, i as u64),
        )
        .expect("write frame");
        files.push(name);
    }

    let manifest = dir.join("dataset.yaml");
    let mut file = std::fs::File::create(&manifest).expect("create manifest");
    writeln!(file, "path: {}", dir.display()).expect("write path");
    writeln!(file, "files:").expect("write files");
    for name in &files {
        writeln!(file, "  - {name}").expect("write file name");
    }
    manifest
}
