//! Places the workspace `config.toml` next to the built binary, where
//! `shared::config::load_config` looks for it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// `target/<profile>` from `target/<profile>/build/backend-xxx/out`
fn profile_dir(out_dir: &Path, profile: &str) -> Option<PathBuf> {
    out_dir
        .ancestors()
        .find(|p| p.ends_with(profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let (Ok(out_dir), Ok(profile)) = (env::var("OUT_DIR"), env::var("PROFILE")) else {
        return;
    };
    let Some(target_dir) = profile_dir(Path::new(&out_dir), &profile) else {
        println!("cargo:warning=profile directory not found, config.toml not copied");
        return;
    };

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !source.exists() {
        println!("cargo:warning=no workspace config.toml, the embedded defaults apply");
        return;
    }
    if let Err(e) = fs::copy(&source, target_dir.join("config.toml")) {
        println!("cargo:warning=copying config.toml failed: {}", e);
    }
}
