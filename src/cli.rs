// ============================================================================
// PixelMaker CLI — headless batch PNG export via command-line arguments
// ============================================================================
//
// Usage examples:
//   pixelmaker --input sprite.json --output sprite.png
//   pixelmaker -i sprite.json -o big.png --scale 16
//   pixelmaker -i "sprites/*.json" --output-dir exported/
//
// No GUI is opened in CLI mode. All processing runs synchronously on the
// current thread.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;

use crate::canvas::CanvasState;
use crate::components::colors::Palette;
use crate::io;

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// PixelMaker headless sprite exporter.
///
/// Render project files to upscaled PNGs without opening the GUI.
#[derive(Parser, Debug)]
#[command(
    name = "pixelmaker",
    about = "PixelMaker headless sprite exporter",
    long_about = "Render PixelMaker .json project files to PNG sprites without\n\
                  opening the GUI.\n\n\
                  Example:\n  \
                  pixelmaker --input sprite.json --output sprite.png\n  \
                  pixelmaker -i \"sprites/*.json\" --output-dir exported/ --scale 16"
)]
pub struct CliArgs {
    /// Input project file(s). Glob patterns accepted (e.g. "sprites/*.json").
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Output PNG path. Only valid for single-file input.
    /// For batch input use --output-dir instead.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing.
    /// Files are written here with the original stem and a .png extension.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Upscale factor: each grid cell becomes an NxN pixel block.
    #[arg(short, long, default_value_t = io::EXPORT_SCALE, value_name = "N")]
    pub scale: u32,

    /// Print per-file timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Returns `true` when any CLI-mode flag is present in the real process
    /// arguments.  Used by `main()` to route before creating an eframe window.
    pub fn is_cli_mode() -> bool {
        std::env::args().any(|a| a == "--input" || a == "-i")
    }
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code.
/// `0` = all files succeeded, `1` = one or more files failed.
pub fn run(args: CliArgs) -> i32 {
    let inputs = resolve_inputs(&args.input);
    if inputs.is_empty() {
        eprintln!("error: no input files matched the given pattern(s).");
        return 1;
    }

    if inputs.len() > 1 && args.output.is_some() && args.output_dir.is_none() {
        eprintln!(
            "error: {} input files given but --output only accepts a single file path.\n\
             Use --output-dir to specify a destination directory for batch export.",
            inputs.len()
        );
        return 1;
    }

    if args.scale == 0 || args.scale > 64 {
        eprintln!("error: --scale must be between 1 and 64.");
        return 1;
    }

    if let Some(dir) = &args.output_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "error: could not create output directory '{}': {}",
                dir.display(),
                e
            );
            return 1;
        }
    }

    let palette = Palette::generate();
    let total = inputs.len();
    let multi = total > 1;
    let mut any_failure = false;

    for (idx, input_path) in inputs.iter().enumerate() {
        if multi || args.verbose {
            println!("[{}/{}] {}", idx + 1, total, input_path.display());
        }

        let file_start = Instant::now();

        let output_path = match build_output_path(
            input_path,
            args.output.as_deref(),
            args.output_dir.as_deref(),
        ) {
            Some(p) => p,
            None => {
                eprintln!(
                    "  error: cannot determine output path for '{}'.",
                    input_path.display()
                );
                any_failure = true;
                continue;
            }
        };

        match run_one(input_path, &output_path, &palette, args.scale) {
            Ok(()) => {
                if args.verbose || multi {
                    println!(
                        "  → {} ({:.0}ms)",
                        output_path.display(),
                        file_start.elapsed().as_secs_f64() * 1000.0
                    );
                }
            }
            Err(e) => {
                eprintln!("  error: {}", e);
                any_failure = true;
            }
        }
    }

    if any_failure {
        1
    } else {
        0
    }
}

// ============================================================================
// Per-file processing pipeline
// ============================================================================

fn run_one(input: &Path, output: &Path, palette: &Palette, scale: u32) -> Result<(), String> {
    let loaded = io::load_project(input).map_err(|e| format!("load failed: {}", e))?;

    let mut state = CanvasState::new(loaded.grid_size);
    state.replace(loaded.grid_size, loaded.pixels, loaded.shape);

    io::export_png(&state, palette, output, scale).map_err(|e| format!("export failed: {}", e))
}

// ============================================================================
// Helpers
// ============================================================================

/// Expand glob patterns and literal paths into a deduplicated, ordered list.
fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let as_path = Path::new(pattern);

        if as_path.exists() {
            // Literal path — use directly
            if !result.iter().any(|p| p.as_path() == as_path) {
                result.push(as_path.to_path_buf());
            }
            continue;
        }

        match glob::glob(pattern) {
            Ok(entries) => {
                let mut matched = false;
                for entry in entries.flatten() {
                    if !result.contains(&entry) {
                        result.push(entry);
                    }
                    matched = true;
                }
                if !matched {
                    eprintln!("warning: pattern '{}' matched no files.", pattern);
                }
            }
            Err(e) => {
                eprintln!("warning: invalid glob '{}': {}", pattern, e);
            }
        }
    }

    result
}

/// Compute the output path for a single input file.
///
/// Priority:
/// 1. `--output` (explicit path, used for single-file input)
/// 2. `--output-dir` (batch directory, derives filename from input stem)
/// 3. Fallback: same directory as input, same stem, .png extension
fn build_output_path(
    input: &Path,
    output: Option<&Path>,
    output_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(out) = output {
        return Some(out.to_path_buf());
    }

    let stem = input.file_stem()?.to_string_lossy().into_owned();

    if let Some(dir) = output_dir {
        return Some(dir.join(format!("{}.png", stem)));
    }

    let parent = input.parent().unwrap_or(Path::new("."));
    Some(parent.join(format!("{}.png", stem)))
}
