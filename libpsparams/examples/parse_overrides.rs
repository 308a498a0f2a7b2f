//! Parse template override parameters the way a deployment task does:
//! quotes stripped, backslash as the escape character, each value cast to
//! the type the template declares for it.
//!
//! Usage: cargo run --example parse_overrides -- '-count 3 -name "web app"' count=int name=string

use libpsparams::{parse_with_options, ParameterType, ParseOptions};
use std::collections::HashMap;
use std::process;

fn main() {
    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("Usage: parse_overrides <PARAMETERS> [NAME=TYPE...]");
        process::exit(1);
    };

    let types: HashMap<String, ParameterType> = args
        .filter_map(|arg| {
            let (name, ty) = arg.split_once('=')?;
            Some((name.to_string(), ty.parse().ok()?))
        })
        .collect();

    let options = ParseOptions::default().remove_quotes(true).escape('\\');
    let mut failed = 0;

    for pair in parse_with_options(&input, &options) {
        let Some(ty) = types.get(&pair.name) else {
            println!("{} = {:?} (no declared type)", pair.name, pair.value);
            continue;
        };
        match pair.cast(ty) {
            Ok(value) => println!("{}: {} = {}", pair.name, ty, value),
            Err(e) => {
                eprintln!("{}: {}", pair.name, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}
