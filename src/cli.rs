// File: ./src/cli.rs
//! Command-line parsing and `--help` output shared by the binary.
use crate::help;
use anyhow::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// No subcommand: start the interactive reader.
    Tui,
    Help,
    /// Print the completed-id JSON array to stdout.
    ProgressExport,
    /// Merge ids from a file, or stdin when the path is `-`.
    ProgressImport(String),
    /// Print one day's parsed plan; `None` means today.
    Plan(Option<String>),
    /// Fetch and print a passage, e.g. `"詩 23"`.
    Read(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub command: Command,
}

/// Parses everything after the binary name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut root = None;
    let mut rest: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--root" | "-r" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--root requires a path");
                };
                root = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" | "help" => {
                return Ok(CliArgs {
                    root,
                    command: Command::Help,
                });
            }
            other => rest.push(other),
        }
        i += 1;
    }

    let command = match rest.as_slice() {
        [] => Command::Tui,
        ["progress", "export"] => Command::ProgressExport,
        ["progress", "import", source] => Command::ProgressImport(source.to_string()),
        ["progress", "import"] => Command::ProgressImport("-".to_string()),
        ["plan"] => Command::Plan(None),
        ["plan", key] => Command::Plan(Some(normalize_key(key)?)),
        ["read", reference @ ..] if !reference.is_empty() => Command::Read(reference.join(" ")),
        other => bail!("Unknown command: {}", other.join(" ")),
    };
    Ok(CliArgs { root, command })
}

/// Accepts `MM-DD` or `M-D` and returns the zero-padded key.
fn normalize_key(key: &str) -> Result<String> {
    let parsed = key
        .split_once('-')
        .and_then(|(m, d)| Some((m.parse::<u32>().ok()?, d.parse::<u32>().ok()?)));
    match parsed {
        Some((m, d)) if (1..=12).contains(&m) && (1..=31).contains(&d) => {
            Ok(format!("{:02}-{:02}", m, d))
        }
        _ => bail!("Expected a date key like 01-31, got '{}'", key),
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Lectio v{} - {}",
        env!("CARGO_PKG_VERSION"),
        rust_i18n::t!("cli_tagline")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} progress export", binary_name);
    println!("    {} progress import <file|->", binary_name);
    println!("    {} plan [MM-DD]", binary_name);
    println!("    {} read <reference>", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     {}", rust_i18n::t!("cli_root"));
    println!("    -h, --help            {}", rust_i18n::t!("cli_help"));
    println!();
    println!("EXAMPLES:");
    println!("    {} progress export > progress.json", binary_name);
    println!("    {} progress import progress.json", binary_name);
    println!("    {} read \"詩 23:1-6\"", binary_name);
    println!();

    for section in help::get_keyboard_help()
        .into_iter()
        .chain(help::get_syntax_help())
    {
        println!("{}:", section.title.to_uppercase());
        for item in section.items {
            if item.example.is_empty() {
                println!("    {:<22} {}", item.keys, item.desc);
            } else {
                println!("    {:<22} {}  ({})", item.keys, item.desc, item.example);
            }
        }
        println!();
    }
}
