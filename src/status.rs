// Save-directory status: shows the manifest and artifact sizes.

use anyhow::Result;
use std::path::Path;

use crate::bow::store::{self, MANIFEST_FILE, VOCAB_FILE};
use crate::output::terminal;
use crate::partition::Split;

/// Display the state of a prepared save directory.
pub fn show(save_dir: &Path) -> Result<()> {
    if !save_dir.join(MANIFEST_FILE).exists() {
        println!("Save directory: {} (not prepared)", save_dir.display());
        println!("\nRun `topicprep prepare <CORPUS>` to build it.");
        return Ok(());
    }

    println!("Save directory: {}", save_dir.display());

    let manifest = store::load_manifest(save_dir)?;
    println!("Prepared at: {}", manifest.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    terminal::display_manifest(&manifest);

    println!("\nArtifacts:");
    print_file(&save_dir.join(VOCAB_FILE));
    for split in Split::ALL {
        print_file(&store::tokens_path(save_dir, split));
        print_file(&store::counts_path(save_dir, split));
    }

    Ok(())
}

fn print_file(path: &Path) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size = std::fs::metadata(path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "missing".to_string());
    println!("  {:<28} {}", name, size);
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
