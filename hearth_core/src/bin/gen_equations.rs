//! Generate EQUATIONS.md from the equation registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-equations
//! ```
//!
//! The file is written to `hearth_core/src/equations/EQUATIONS.md`, relative
//! to the workspace root.

use std::fs;
use std::path::Path;

use hearth_core::equations::{generate_equations_markdown, ALL_EQUATIONS};

fn main() {
    let markdown = generate_equations_markdown();
    let output_path = Path::new("hearth_core/src/equations/EQUATIONS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!(
                "Wrote {} equations ({} bytes) to {}",
                ALL_EQUATIONS.len(),
                markdown.len(),
                output_path.display()
            );
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            std::process::exit(1);
        }
    }
}
