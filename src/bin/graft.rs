//! Command-line interface for graft
//! Composes a dialect grammar from a fragment directory tree and prints the
//! accumulated declarations.
//!
//! Usage:
//!   graft `<root>` `<dialect>` [--ext `<ext>`] [--format `<format>`]

use clap::{Arg, Command};
use graft::composing::DialectComposer;
use std::path::Path;

fn main() {
    let matches = Command::new("graft")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Composes dialect-specific grammars from layered fragment files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("root")
                .help("Root directory of the fragment tree")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("dialect")
                .help("Target dialect directory (under the root)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .short('e')
                .help("Fragment filename extension")
                .default_value("jj"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: json, text, names")
                .default_value("json"),
        )
        .get_matches();

    let root = matches.get_one::<String>("root").expect("root is required");
    let dialect = matches
        .get_one::<String>("dialect")
        .expect("dialect is required");
    let ext = matches.get_one::<String>("ext").expect("ext has a default");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default");

    let composer = DialectComposer::with_extension(ext.clone());
    let composition = composer
        .compose(Path::new(root), Path::new(dialect))
        .unwrap_or_else(|e| {
            eprintln!("Compose error: {}", e);
            std::process::exit(1);
        });

    for failure in &composition.failures {
        eprintln!("warning: {}", failure);
    }

    let declarations = &composition.declarations;
    match format.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(declarations).unwrap_or_else(|e| {
                eprintln!("Error formatting declarations: {}", e);
                std::process::exit(1);
            });
            println!("{}", rendered);
        }
        "text" => {
            for text in declarations.functions.values() {
                println!("{}", text);
            }
            for text in &declarations.token_assignments {
                println!("{}", text);
            }
        }
        "names" => {
            for name in declarations.functions.keys() {
                println!("{}", name);
            }
        }
        other => {
            eprintln!("Format '{}' not supported", other);
            eprintln!("Available formats: json, text, names");
            std::process::exit(1);
        }
    }
}
