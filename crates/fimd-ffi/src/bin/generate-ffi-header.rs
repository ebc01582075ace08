//! Generates the `fimd_ffi.h` C header from this crate's `extern "C"` API.
//! Run with `cargo run -p fimd-ffi --features generate-header --bin generate-ffi-header -- <out-dir>`.

use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&crate_dir));
    let out_path = out_dir.join("fimd_ffi.h");

    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        ..Default::default()
    };

    cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_config(config)
        .generate()
        .expect("generating the fimd-ffi C header should not fail")
        .write_to_file(&out_path);

    println!("wrote {}", out_path.display());
}
