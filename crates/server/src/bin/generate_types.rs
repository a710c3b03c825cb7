//! Run with: cargo run --package server --bin generate-types --features typescript

use std::fs;
use std::path::Path;

fn main() {
    println!("Generating TypeScript types...");

    let out_dir = Path::new("frontend/src/types/generated");

    if let Err(e) = fs::create_dir_all(out_dir) {
        eprintln!("Failed to create output directory: {}", e);
        std::process::exit(1);
    }

    #[cfg(feature = "typescript")]
    {
        use ts_rs::TS;

        insight_core::AnalysisMode::export_all_to(out_dir)
            .expect("Failed to export AnalysisMode");
        insight_core::AnalyzeRequest::export_all_to(out_dir)
            .expect("Failed to export AnalyzeRequest");
        insight_core::AnalysisResult::export_all_to(out_dir)
            .expect("Failed to export AnalysisResult");
    }

    println!("TypeScript types generated in {}", out_dir.display());
}
