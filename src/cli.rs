//! Command-line interface implementation
//!
//! One subcommand-free invocation: load the composite, the asset sheet,
//! and the attribute table, run the single edit pass, save the result, and
//! report the tallies.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use crate::compositor::{index_records, run_pass, Counters, Variant};
use crate::output::{save_png, scale_image};
use crate::parser::parse_attributes;
use crate::samples::Samples;
use crate::sheet::{SheetLayout, SpriteSheet};

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Optipunks - derive the optimistic punks composite from sprite assets
#[derive(Parser)]
#[command(name = "optipunks")]
#[command(about = "Optipunks - edit punk mouths per trait record into a new composite")]
#[command(version)]
pub struct Cli {
    /// Source punks composite image (PNG)
    composite: PathBuf,

    /// Sprite asset sheet (PNG, row-major grid of fixed-size sprites)
    sheet: PathBuf,

    /// Punk attribute table (CSV)
    attributes: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "optimistic-punks.png")]
    output: PathBuf,

    /// Edit policy to apply
    #[arg(long, value_enum, default_value = "refined")]
    variant: Variant,

    /// Sprite edge length in pixels
    #[arg(long, default_value = "24")]
    sprite_size: u32,

    /// Composite grid column count
    #[arg(long, default_value = "100")]
    grid_cols: u32,

    /// Asset sheet column count
    #[arg(long, default_value = "25")]
    sheet_cols: u32,

    /// Number of punk cells to process
    #[arg(long, default_value = "10000")]
    total: u32,

    /// Scale output by integer factor (1-16, default: 1)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
    scale: u8,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    strict: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,
}

/// Machine-readable run report for `--json`.
#[derive(Debug, Serialize)]
struct Report {
    variant: Variant,
    counters: Counters,
    missing_records: usize,
    output: String,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    run_generate(&cli)
}

fn run_generate(cli: &Cli) -> ExitCode {
    eprintln!("Loading images...");

    let mut composite = match image::open(&cli.composite) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            eprintln!("Error: cannot load composite '{}': {}", cli.composite.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let sheet_image = match image::open(&cli.sheet) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            eprintln!("Error: cannot load asset sheet '{}': {}", cli.sheet.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let sheet = SpriteSheet::new(sheet_image, cli.sprite_size, cli.sheet_cols);

    let attributes = match File::open(&cli.attributes) {
        Ok(f) => f,
        Err(e) => {
            eprintln!(
                "Error: cannot open attribute table '{}': {}",
                cli.attributes.display(),
                e
            );
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let parsed = parse_attributes(attributes);
    if cli.strict && !parsed.warnings.is_empty() {
        for warning in &parsed.warnings {
            eprintln!("Error: line {}: {}", warning.line, warning.message);
        }
        return ExitCode::from(EXIT_ERROR);
    }
    for warning in &parsed.warnings {
        eprintln!("Warning: line {}: {}", warning.line, warning.message);
    }

    let (index, index_warnings) = index_records(&parsed.records, cli.total);
    if cli.strict && !index_warnings.is_empty() {
        for warning in &index_warnings {
            eprintln!("Error: {}", warning);
        }
        return ExitCode::from(EXIT_ERROR);
    }
    for warning in &index_warnings {
        eprintln!("Warning: {}", warning);
    }

    if cli.strict {
        let missing = index.iter().filter(|slot| slot.is_none()).count();
        if missing > 0 {
            eprintln!("Error: {} punk ids have no record in the attribute table", missing);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    // The declared grid must fit inside the composite before any cell is
    // touched; a short image would otherwise fail mid-pass
    let layout = SheetLayout::new(cli.sprite_size, cli.grid_cols);
    let (need_w, need_h) = layout.extent(cli.total);
    if composite.width() < need_w || composite.height() < need_h {
        eprintln!(
            "Error: composite is {}x{}, but {} cells of {}px need {}x{}",
            composite.width(),
            composite.height(),
            cli.total,
            cli.sprite_size,
            need_w,
            need_h
        );
        return ExitCode::from(EXIT_ERROR);
    }

    eprintln!("Sampling reference colors...");
    let samples = match Samples::build(&sheet) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("Error: asset sheet doesn't match the expected layout: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (counters, missing) =
        run_pass(&mut composite, &index, &samples, layout, cli.variant, |id| {
            if id % 1000 == 0 {
                eprintln!("Processing punk {}...", id);
            }
        });

    for id in &missing {
        eprintln!("Warning: no record for punk {}", id);
    }

    let output = scale_image(composite, cli.scale);
    if let Err(e) = save_png(&output, &cli.output) {
        eprintln!("Error: cannot save '{}': {}", cli.output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    if cli.json {
        let report = Report {
            variant: cli.variant,
            counters,
            missing_records: missing.len(),
            output: cli.output.display().to_string(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: cannot serialize report: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        println!("{}", format_stats(&counters));
        println!();
        println!("Saved: {}", cli.output.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Human-readable tally block, one line per edit path.
fn format_stats(counters: &Counters) -> String {
    format!(
        "Stats:\n  \
         Males without smile (added smile sprite): {}\n  \
         Males with smile (added black pixel): {}\n  \
         Males with frown (removed frown pixels): {}\n  \
         Females (added mouth pixel): {}",
        counters.males_without_smile,
        counters.males_with_smile,
        counters.males_with_frown,
        counters.females
    )
}
