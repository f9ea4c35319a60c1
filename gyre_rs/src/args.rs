use std::path::PathBuf;

use crate::types::{ColorMode, OutputMode};

#[derive(Debug)]
pub struct ParsedArgs {
    pub root_list: Vec<PathBuf>,
    /// `None` means "use config or built-in defaults". Order is kept:
    /// the resolver tries extensions in the order given.
    pub extensions: Option<Vec<String>>,
    pub ignore_patterns: Vec<String>,
    pub use_gitignore: bool,
    pub max_depth: Option<usize>,
    pub report_all_cycles: bool,
    pub fail_on_cycles: bool,
    pub color: ColorMode,
    pub output: OutputMode,
    pub verbose: bool,
    pub show_help: bool,
    pub show_version: bool,
}

impl Default for ParsedArgs {
    fn default() -> Self {
        Self {
            root_list: Vec::new(),
            extensions: None,
            ignore_patterns: Vec::new(),
            use_gitignore: false,
            max_depth: None,
            report_all_cycles: false,
            fail_on_cycles: false,
            color: ColorMode::Auto,
            output: OutputMode::Human,
            verbose: false,
            show_help: false,
            show_version: false,
        }
    }
}

fn parse_color_mode(raw: &str) -> Result<ColorMode, String> {
    match raw {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err("--color expects auto|always|never".to_string()),
    }
}

/// Comma-separated extension list. Dots and case are stripped, order is
/// preserved, duplicates collapse to the first occurrence.
pub fn parse_extensions(raw: &str) -> Option<Vec<String>> {
    let mut list: Vec<String> = Vec::new();
    for segment in raw.split(',') {
        let trimmed = segment.trim().trim_start_matches('.').to_lowercase();
        if !trimmed.is_empty() && !list.contains(&trimmed) {
            list.push(trimmed);
        }
    }
    if list.is_empty() { None } else { Some(list) }
}

fn parse_max_depth(raw: &str) -> Result<usize, String> {
    let value = raw
        .parse::<usize>()
        .map_err(|_| "--max-depth requires a positive integer".to_string())?;
    if value == 0 {
        Err("--max-depth requires a positive integer".to_string())
    } else {
        Ok(value)
    }
}

pub fn parse_args() -> Result<ParsedArgs, String> {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|s| s.to_string_lossy().into_owned())
        .collect();
    parse_arg_list(&args)
}

pub fn parse_arg_list(args: &[String]) -> Result<ParsedArgs, String> {
    let mut parsed = ParsedArgs::default();
    let mut roots: Vec<PathBuf> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--ext" => {
                let next = args
                    .get(i + 1)
                    .ok_or_else(|| "--ext requires a comma-separated value".to_string())?;
                parsed.extensions = parse_extensions(next);
                i += 2;
            }
            _ if arg.starts_with("--ext=") => {
                let value = arg.trim_start_matches("--ext=");
                parsed.extensions = parse_extensions(value);
                i += 1;
            }
            "-I" | "--ignore" => {
                let next = args
                    .get(i + 1)
                    .ok_or_else(|| "--ignore requires a glob pattern".to_string())?;
                parsed.ignore_patterns.push(next.clone());
                i += 2;
            }
            _ if arg.starts_with("--ignore=") => {
                let value = arg.trim_start_matches("--ignore=");
                parsed.ignore_patterns.push(value.to_string());
                i += 1;
            }
            "-g" | "--gitignore" => {
                parsed.use_gitignore = true;
                i += 1;
            }
            "--max-depth" => {
                let next = args
                    .get(i + 1)
                    .ok_or_else(|| "--max-depth requires a value".to_string())?;
                parsed.max_depth = Some(parse_max_depth(next)?);
                i += 2;
            }
            _ if arg.starts_with("--max-depth=") => {
                let value = arg.trim_start_matches("--max-depth=");
                parsed.max_depth = Some(parse_max_depth(value)?);
                i += 1;
            }
            "--all-cycles" => {
                parsed.report_all_cycles = true;
                i += 1;
            }
            "--fail-on-cycles" => {
                parsed.fail_on_cycles = true;
                i += 1;
            }
            "--json" => {
                parsed.output = OutputMode::Json;
                i += 1;
            }
            "--color" => {
                let next = args
                    .get(i + 1)
                    .ok_or_else(|| "--color requires a value".to_string())?;
                parsed.color = parse_color_mode(next)?;
                i += 2;
            }
            _ if arg.starts_with("--color=") => {
                let value = arg.trim_start_matches("--color=");
                parsed.color = parse_color_mode(value)?;
                i += 1;
            }
            "--verbose" => {
                parsed.verbose = true;
                i += 1;
            }
            "-h" | "--help" => {
                parsed.show_help = true;
                i += 1;
            }
            "--version" => {
                parsed.show_version = true;
                i += 1;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option: {arg}"));
            }
            _ => {
                roots.push(PathBuf::from(arg));
                i += 1;
            }
        }
    }

    if roots.is_empty() {
        roots.push(PathBuf::from("."));
    }
    parsed.root_list = roots;

    Ok(parsed)
}
