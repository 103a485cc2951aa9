//! subweave CLI
//!
//! Usage:
//!   subweave [OPTIONS] [FILE]
//!
//! Options:
//!   -r, --replacements <FILE>  Replacement values (TOML [replacements] table)
//!   -s, --set <NAME=VALUE>     Inline replacement, repeatable
//!   -t, --tokens               List distinct tokens instead of resolving
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use subweave::{Replacements, Template, TemplateCollection};

#[derive(Parser)]
#[command(name = "subweave")]
#[command(about = "Recursive {{placeholder}} substitution for string templates")]
struct Cli {
    /// Input template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Replacement values as a TOML file with a [replacements] table
    #[arg(short, long)]
    replacements: Option<PathBuf>,

    /// Inline replacement, NAME=VALUE (repeatable, overrides the file)
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// List the distinct tokens of the input instead of resolving
    #[arg(short, long)]
    tokens: bool,
}

fn main() {
    let cli = Cli::parse();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };
    let source = trim_trailing_newline(&source).to_string();

    let template = Template::new(source.as_str());

    if cli.tokens {
        let mut collection = TemplateCollection::new();
        collection.insert("input", template);
        match collection.extract_unique_tokens() {
            Ok(tokens) => {
                for token in tokens {
                    println!("{}", token);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Load replacements: file first, inline --set entries on top
    let mut replacements = match &cli.replacements {
        Some(path) => match Replacements::from_file(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error loading replacements '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Replacements::new(),
    };
    for entry in &cli.set {
        match entry.split_once('=') {
            Some((name, value)) => replacements.insert(name, value),
            None => {
                eprintln!("Error: --set expects NAME=VALUE, got '{}'", entry);
                std::process::exit(1);
            }
        }
    }

    match template.resolve(&replacements) {
        Ok(text) => {
            println!("{}", text);
        }
        Err(e) => {
            let name = cli
                .input
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<stdin>".to_string());
            eprintln!("{}", e.format(&source, &name));
            std::process::exit(1);
        }
    }
}

/// Strip one trailing newline so file templates don't pick up an extra
/// blank line from the editor.
fn trim_trailing_newline(input: &str) -> &str {
    let trimmed = input.strip_suffix('\n').unwrap_or(input);
    trimmed.strip_suffix('\r').unwrap_or(trimmed)
}

fn print_intro() {
    println!(
        r#"subweave - recursive {{{{placeholder}}}} substitution for string templates

USAGE:
    subweave [OPTIONS] [FILE]
    echo '<template>' | subweave [OPTIONS]

OPTIONS:
    -r, --replacements <FILE>   Replacement values (TOML [replacements] table)
    -s, --set <NAME=VALUE>      Inline replacement, repeatable
    -t, --tokens                List distinct tokens instead of resolving
    -h, --help                  Print help

QUICK START:
    echo 'Hello {{{{name}}}}!' | subweave --set name=world

Replacement values may themselves contain tokens; everything resolves in
one batch. Tokens with no replacement are kept literally in the output."#
    );
}
