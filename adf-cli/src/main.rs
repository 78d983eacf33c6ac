// Command-line interface for adf
//
// This binary converts issue descriptions between the Atlassian Document Format (ADF) tree,
// Markdown, display HTML and plain text. It is a thin shell over the adf-babel library: every
// conversion lives there, this crate only reads files, layers configuration and prints.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  adf <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  adf convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  adf seed [--adf <file>] [--html <file>] [--text <file>] [--display]  - Pick the best stored form
//  adf --list-formats                    - List available formats
//
// Seeding:
//
// An issue stores its description as an ADF tree, as legacy server-rendered HTML, or as plain
// text. The seed command picks the most structured one available and prints the Markdown an
// editor would start from. The chosen source is reported on stderr so scripts can tell.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  adf issue.json --to html --extra-base-url https://tracker.example.com

use adf_babel::{AttachmentMap, FormatRegistry, HtmlOptions, IssueDescription, MarkdownOptions};
use adf_config::{AdfConfig, Loader};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "seed", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extra-<key> -` (a lone dash is a value, not a flag)
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| next == "-" || !next.starts_with('-'));

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
    Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert issue descriptions between ADF, Markdown and HTML")
        .long_about(
            "adf is a command-line tool for working with Atlassian Document Format descriptions.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (adf, markdown, html, text)\n  \
            - seed:    Choose the best stored form of a description and print its Markdown\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            adf issue.json --to markdown                 # ADF to Markdown (stdout)\n  \
            adf notes.md --to adf -o issue.json          # Markdown to an ADF file\n  \
            adf issue.json --to html --attachments a.json\n  \
            adf seed --adf issue.json --html legacy.html # Edit buffer for an issue"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("attachments")
                .long("attachments")
                .value_name("PATH")
                .help("JSON object mapping attachment filenames to ids")
                .long_help(
                    "JSON file with an object mapping attachment filenames to attachment ids.\n\n\
                    Media nodes in the tree carry a filename or an opaque id. The map lets\n\
                    rendered images point at the right attachment; unknown names fall back\n\
                    to the raw id."
                )
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log degraded conversions to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - adf:      ADF JSON (.json, .adf)\n  \
                    - markdown: Markdown (.md, .markdown)\n  \
                    - html:     Display HTML (.html, .htm); parsing goes through the legacy converter\n  \
                    - text:     Plain text (.txt)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    adf convert issue.json --to markdown        # ADF to Markdown (stdout)\n  \
                    adf convert notes.md --to adf -o issue.json # Markdown to ADF file\n  \
                    adf convert old.html --to markdown          # Legacy HTML to Markdown\n  \
                    adf issue.json --to html                    # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .long_help(
                            "Source format to convert from.\n\n\
                            If not specified, the format is auto-detected from the file extension.\n\
                            Use this option to override auto-detection."
                        )
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: adf, markdown, html, text\n\
                            Use the format name, not the file extension."
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("seed")
                .about("Print the Markdown an editor would start from")
                .long_about(
                    "Pick the most structured stored form of a description and convert it.\n\n\
                    The ADF tree wins when present and valid, then the legacy HTML, then the\n\
                    plain text. The chosen source is reported on stderr.\n\n\
                    Examples:\n  \
                    adf seed --adf issue.json --text issue.txt\n  \
                    adf seed --html legacy.html\n  \
                    adf seed --adf issue.json --display         # Display HTML instead"
                )
                .arg(
                    Arg::new("adf")
                        .long("adf")
                        .value_name("PATH")
                        .help("Stored ADF JSON")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .value_name("PATH")
                        .help("Stored server-rendered HTML")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .value_name("PATH")
                        .help("Stored plain text")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("display")
                        .long("display")
                        .help("Print display HTML instead of Markdown")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
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

    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    let attachments = matches
        .get_one::<String>("attachments")
        .map(|path| read_attachments(path));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => {
                    let registry = FormatRegistry::default();
                    match registry.detect_format_from_filename(input) {
                        Some(detected) => detected,
                        None => {
                            eprintln!("Error: Could not detect format from filename '{input}'");
                            eprintln!("Please specify --from explicitly");
                            std::process::exit(1);
                        }
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let mut format_options = format_options_from_config(&config, to);
            if let Some(map) = &attachments {
                if to == "html" {
                    format_options.insert("attachments".to_string(), attachments_json(map));
                }
            }
            for (key, value) in extra_params {
                format_options.insert(key, value);
            }
            handle_convert_command(input, &from, to, output, &format_options);
        }
        Some(("seed", sub_matches)) => {
            reject_leftover_extras(&extra_params);
            let description = read_description(sub_matches);
            if sub_matches.get_flag("display") {
                let mut options = HtmlOptions::from(&config.render);
                if let Some(map) = attachments {
                    options = options.with_attachments(map);
                }
                handle_display_command(&description, &options);
            } else {
                handle_seed_command(&description, &MarkdownOptions::from(&config.markdown));
            }
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    format_options: &HashMap<String, String>,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error: reading file '{input}': {e}");
        std::process::exit(1);
    });

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    tracing::debug!(from, to, blocks = doc.content.len(), "parsed input");

    let result = registry
        .serialize_with_options(&doc, to, format_options)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    write_output(output, &result);
}

/// Handle the seed command
fn handle_seed_command(description: &IssueDescription, options: &MarkdownOptions) {
    let seed = description.edit_seed(options);
    eprintln!("Seeded from: {}", seed.source.as_str());
    write_output(None, &seed.markdown);
}

/// Handle the seed command with --display
fn handle_display_command(description: &IssueDescription, options: &HtmlOptions) {
    write_output(None, &description.display_html(options));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for format_name in registry.list_formats() {
        let Ok(format) = registry.get(&format_name) else {
            continue;
        };
        let mut modes = Vec::new();
        if format.supports_parsing() {
            modes.push("read");
        }
        if format.supports_serialization() {
            modes.push("write");
        }
        println!(
            "  {:<10} {:<28} [{}] .{}",
            format_name,
            format.description(),
            modes.join("/"),
            format.file_extensions().join(" .")
        );
    }
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error: writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            if text.ends_with('\n') || text.is_empty() {
                print!("{text}");
            } else {
                println!("{text}");
            }
        }
    }
}

fn read_description(matches: &ArgMatches) -> IssueDescription {
    let read = |key: &str| {
        matches.get_one::<String>(key).map(|path| {
            fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error: reading file '{path}': {e}");
                std::process::exit(1);
            })
        })
    };

    let adf = read("adf").and_then(|raw| match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("ignoring stored adf: {err}");
            None
        }
    });

    IssueDescription {
        adf,
        html: read("html"),
        text: read("text"),
    }
}

fn read_attachments(path: &str) -> AttachmentMap {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error: reading file '{path}': {e}");
        std::process::exit(1);
    });
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        eprintln!("Error: attachments file '{path}' is not a JSON object of strings: {e}");
        std::process::exit(1);
    })
}

fn attachments_json(map: &AttachmentMap) -> String {
    serde_json::to_string(map).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn load_cli_config(explicit_path: Option<&str>) -> AdfConfig {
    let loader = Loader::new().with_optional_file("adf.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Error: failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Fold extras that name configuration keys into the config, leaving the rest
/// for the target format.
fn apply_config_overrides(config: &mut AdfConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["base-url", "base_url"]) {
        config.render.base_url = raw;
    }
    if let Some(raw) = take_override(extra_params, &["attachment-scheme", "attachment_scheme"]) {
        config.render.attachment_scheme = raw;
    }
    if let Some(raw) = take_override(extra_params, &["default-image-width"]) {
        config.render.default_image_width = parse_width_arg("default-image-width", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["max-image-width"]) {
        config.render.max_image_width = parse_width_arg("max-image-width", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["bullet-marker", "bullet"]) {
        config.markdown.bullet_marker = parse_marker_arg(&raw);
    }
}

/// Options a target format receives from the layered configuration.
fn format_options_from_config(config: &AdfConfig, to: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    match to {
        "html" => {
            let render = &config.render;
            params.insert("base-url".to_string(), render.base_url.clone());
            params.insert(
                "attachment-scheme".to_string(),
                render.attachment_scheme.clone(),
            );
            params.insert(
                "default-image-width".to_string(),
                render.default_image_width.to_string(),
            );
            params.insert(
                "max-image-width".to_string(),
                render.max_image_width.to_string(),
            );
        }
        "markdown" => {
            params.insert(
                "bullet-marker".to_string(),
                config.markdown.bullet_marker.to_string(),
            );
        }
        _ => {}
    }
    params
}

fn reject_leftover_extras(extra_params: &HashMap<String, String>) {
    let mut keys: Vec<_> = extra_params.keys().collect();
    keys.sort();
    if let Some(key) = keys.first() {
        eprintln!("Error: unknown parameter --extra-{key}");
        std::process::exit(1);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_width_arg(flag: &str, raw: &str) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(width) if width > 0 => width,
        _ => {
            eprintln!("Error: invalid width '{raw}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn parse_marker_arg(raw: &str) -> char {
    match raw {
        "-" => '-',
        "*" => '*',
        "+" => '+',
        other => {
            eprintln!("Error: invalid bullet marker '{other}', expected one of - * +");
            std::process::exit(1);
        }
    }
}
