pub mod dermatology;
pub mod discover;
pub mod fuel;
pub mod peptides;
pub mod plasma;
pub mod resonance;
pub mod screen;
pub mod sequence;
pub mod soliton;
pub mod targets;
pub mod theory;
pub mod virus;

use crate::utils::progress::CliProgressHandler;
use codex_resonance::engine::progress::ProgressReporter;
use std::path::PathBuf;

fn progress_reporter() -> ProgressReporter<'static> {
    ProgressReporter::with_callback(CliProgressHandler::new().get_callback())
}

fn print_written(written: &[PathBuf]) {
    if written.is_empty() {
        return;
    }
    println!("\n📁 Wrote {} file(s):", written.len());
    for path in written {
        println!("   {}", path.display());
    }
}
