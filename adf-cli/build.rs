use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the registered format names in adf-babel's FormatRegistry::with_defaults
// We need to duplicate this here since build scripts can't depend on the library
const AVAILABLE_FORMATS: &[&str] = &["adf", "html", "markdown", "text"];

fn format_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS))
        .value_hint(ValueHint::Other)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert issue descriptions between ADF, Markdown and HTML")
        .arg_required_else_help(true)
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
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("attachments")
                .long("attachments")
                .help("JSON object mapping attachment filenames to ids")
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
                .about("Convert between document formats")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(format_arg("from", "Source format"))
                .arg(format_arg("to", "Target format").required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("seed")
                .about("Print the Markdown an editor would start from")
                .arg(
                    Arg::new("adf")
                        .long("adf")
                        .help("Stored ADF JSON")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help("Stored server-rendered HTML")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .help("Stored plain text")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("display")
                        .long("display")
                        .help("Print display HTML instead of Markdown")
                        .action(ArgAction::SetTrue),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "adf", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "adf", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "adf", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
