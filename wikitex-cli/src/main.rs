// Command-line interface for wikitex
//
// This binary converts wikitex documents into MediaWiki markup, and can trace how the converter
// walks a document for debugging odd output.
//
// Converting:
//
// The classic invocation takes a source and a destination path and nothing else. The `convert`
// subcommand is injected when the first argument is not a known subcommand, so both forms work.
// Usage:
//  towiki <source> <destination>                 - Convert a file (default)
//  towiki convert <source> [<destination>]       - Same as above, stdout when no destination
//  towiki inspect <source> [<transform>]         - Trace the conversion (defaults to "trace-simple")
//  towiki --list-transforms                      - List available transforms
//
// Extra Parameters:
//
// Converter knobs can be passed using --extra-<parameter-name> <value>, overriding the config file.
// Example:
//  towiki notes.wikitex notes.wiki --extra-box-color NavyBlue

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wikitex_babel::{convert_stream, ConvertOptions, ConvertSummary};
use wikitex_cli::transforms;
use wikitex_config::{Loader, WikitexConfig};

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("towiki")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert wikitex documents into MediaWiki markup")
        .long_about(
            "towiki converts wikitex (outline text with $inline$, [$$boxed$$] and\n\
            $$aligned$$ math) into markup for a MediaWiki renderer.\n\n\
            Commands:\n  \
            - convert: Convert a document (default)\n  \
            - inspect: Trace the conversion line by line\n\n\
            Examples:\n  \
            towiki notes.wikitex notes.wiki          # Convert to a file\n  \
            towiki convert notes.wikitex             # Convert to stdout\n  \
            towiki inspect notes.wikitex trace-json  # Trace as JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a towiki.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every converted line to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a wikitex document (default command)")
                .arg(
                    Arg::new("input")
                        .help("Source wikitex file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .help("Destination file (defaults to stdout)")
                        .required(false)
                        .index(2)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Trace how a wikitex document is converted")
                .arg(
                    Arg::new("path")
                        .help("Path to the wikitex file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'trace-simple'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                // Inject "convert" as the subcommand
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_logging(&config.log.level, matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, output, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { level })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Handle the convert command
fn handle_convert_command(input: &str, output: Option<&str>, config: &WikitexConfig) {
    let options = ConvertOptions::from(&config.convert);

    let source = File::open(input).unwrap_or_else(|e| {
        eprintln!("Error opening source file '{input}': {e}");
        std::process::exit(1);
    });
    let reader = BufReader::new(source);

    let result = match output {
        Some(path) => {
            let destination = File::create(path).unwrap_or_else(|e| {
                eprintln!("Error creating destination file '{path}': {e}");
                std::process::exit(1);
            });
            info!(input, output = path, "converting");
            convert_stream(reader, BufWriter::new(destination), &options)
        }
        None => {
            let stdout = io::stdout();
            convert_stream(reader, stdout.lock(), &options)
        }
    };

    match result {
        Ok(ConvertSummary { lines, .. }) => info!(lines, "conversion finished"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &WikitexConfig,
) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let params = build_inspect_params(config, extra_params);
    let options = ConvertOptions::from(&config.convert);

    let output = transforms::execute_transform(&source, transform, &options, &params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(output.as_bytes()) {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("  trace-simple  - One row per source line: modes, nesting stack, emitted text");
    println!("  trace-json    - The same rows as JSON\n");

    println!("Transform names:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> WikitexConfig {
    let loader = Loader::new().with_optional_file("towiki.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut WikitexConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("show-linum") {
        config.inspect.show_line_numbers = parse_bool_arg("show-linum", &raw);
    }

    if let Some(raw) = take_override(extra_params, &["box-color", "color"]) {
        config.convert.box_color = raw;
    }

    if let Some(raw) = take_override(extra_params, &["indent-width", "spaces-per-indent"]) {
        config.convert.spaces_per_indent = match raw.parse::<usize>() {
            Ok(width) if width > 0 => width,
            _ => {
                eprintln!("Invalid indent width '{raw}' for --extra-indent-width");
                std::process::exit(1);
            }
        };
    }
}

fn build_inspect_params(
    config: &WikitexConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    params.insert(
        "show-linum".to_string(),
        config.inspect.show_line_numbers.to_string(),
    );

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
