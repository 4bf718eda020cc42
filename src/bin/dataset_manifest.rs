use pbi_dashboard::manifest::{analyze_records, default_manifest_path};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "data.json".to_string());
    let path = PathBuf::from(&path);

    let manifest = match analyze_records(&path) {
        Ok(m) => m,
        Err(err) => {
            eprintln!("analysis failed: {}", err);
            std::process::exit(1);
        }
    };

    let out_path = default_manifest_path(&path);
    let body = match serde_json::to_string_pretty(&manifest) {
        Ok(b) => b,
        Err(err) => {
            eprintln!("failed to encode manifest: {}", err);
            std::process::exit(2);
        }
    };
    if let Err(err) = fs::write(&out_path, body) {
        eprintln!("failed to write {}: {}", out_path.display(), err);
        std::process::exit(3);
    }
    println!(
        "wrote manifest {} ({} records, years {:?}, {} warnings)",
        out_path.display(),
        manifest.record_count,
        manifest.years,
        manifest.warnings.len()
    );
}
