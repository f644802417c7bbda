//! Export recolored standalone icons from a composite SVG sheet.
//!
//! Usage:
//!   export-icons [FG_COLOR] [BG_COLOR] [OPTIONS]
//!
//! Omitted colors take the palette defaults; colors failing validation fall
//! back to fixed substitutes rather than aborting. Every other failure stops
//! the run with a non-zero status.

use std::process::ExitCode;

use icon_sheet::{run_export, validate_colors, ExportConfig, OutputFormat};

const USAGE: &str = "\
Usage: export-icons [FG_COLOR] [BG_COLOR] [OPTIONS]

Options:
  --input PATH      Composite sheet to read (default: graphics/icons-opt.svg)
  --out DIR         Output directory, reset per run (default: out)
  --formats LIST    Comma-separated output formats: svg,png,jpg (default: svg)
  --scale FACTOR    Hit-region enlargement factor (default: 1.2)
  --no-preview      Skip the index.html preview gallery
  --help            Show this help";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run_export(&config) {
        Ok(icon_ids) => {
            println!(
                "Done! Exported {} icons to {}",
                icon_ids.len(),
                config.out_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Option<ExportConfig>, String> {
    let mut config = ExportConfig::default();
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--input" => config.input = required(&mut iter, "--input")?.into(),
            "--out" => config.out_dir = required(&mut iter, "--out")?.into(),
            "--formats" => {
                let list = required(&mut iter, "--formats")?;
                config.formats = parse_formats(list)?;
            }
            "--scale" => {
                let value = required(&mut iter, "--scale")?;
                config.style.hit_region_scale = value
                    .parse()
                    .map_err(|_| format!("--scale needs a number, got {value:?}"))?;
            }
            "--no-preview" => config.preview = false,
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            value => positional.push(value),
        }
    }

    if positional.len() > 2 {
        return Err(format!(
            "expected at most two colors, got {} positional arguments",
            positional.len()
        ));
    }
    config.palette = validate_colors(positional.first().copied(), positional.get(1).copied());
    Ok(Some(config))
}

fn required<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> Result<&'a String, String> {
    iter.next().ok_or_else(|| format!("{flag} needs a value"))
}

fn parse_formats(list: &str) -> Result<Vec<OutputFormat>, String> {
    let mut formats = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let format =
            OutputFormat::from_name(name).ok_or_else(|| format!("unsupported format {name:?}"))?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    if formats.is_empty() {
        return Err("--formats needs at least one of svg,png,jpg".to_owned());
    }
    Ok(formats)
}
