//! psparams command-line tool for tokenizing parameter strings and
//! transcoding the result.
//!
//! Usage: psparams [OPTIONS] [FILE|DIR]
//!
//! Options:
//!   -a, --args <STRING>    Parse STRING instead of reading a file or stdin
//!   -t, --to <FORMAT>      Output format (text, cmd, json, yaml, toml, cbor) [default: text]
//!   -q, --remove-quotes    Strip one outer pair of double quotes from each value
//!   -e, --escape <CHAR>    Escape character [default: `]
//!   -m, --map              Output parameters keyed by name
//!   -w, --write            Write output to file with inferred name
//!   -o, --output <FILE>    Write output to specified file
//!   --check                Report unterminated quotes, groups and escapes (exit 1 if any)
//!   -h, --help             Print help
//!   -V, --version          Print version

use libpsparams::{
    encode, encode_map, parse_map, parse_strict_with_source, parse_with_options, Format,
    ParameterMap, ParseOptions,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod transcode;

use transcode::Document;

/// Settings shared by every input processed in one invocation.
struct Settings<'a> {
    options: ParseOptions,
    format_str: &'a str,
    format: Format,
    map_mode: bool,
    check_only: bool,
    write_back: bool,
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    let mut to_format: Option<&str> = None;
    let mut inline_args: Option<&str> = None;
    let mut remove_quotes = false;
    let mut escape: Option<char> = None;
    let mut map_mode = false;
    let mut write_back = false;
    let mut output_file: Option<&str> = None;
    let mut check_only = false;
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("psparams {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-a" | "--args" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --args requires a parameter string");
                    process::exit(1);
                }
                inline_args = Some(&args[i]);
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                if parse_format(&args[i]).is_none() {
                    eprintln!("Error: Unknown format: {}", args[i]);
                    process::exit(1);
                }
                to_format = Some(&args[i]);
            }
            "-q" | "--remove-quotes" => {
                remove_quotes = true;
            }
            "-e" | "--escape" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --escape requires a character");
                    process::exit(1);
                }
                let mut chars = args[i].chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => escape = Some(c),
                    _ => {
                        eprintln!(
                            "Error: --escape takes exactly one character: {:?}",
                            args[i]
                        );
                        process::exit(1);
                    }
                }
            }
            "-m" | "--map" => {
                map_mode = true;
            }
            "-w" | "--write" => {
                write_back = true;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "-" => {
                // Explicit stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    if inline_args.is_some() && input_path.is_some() {
        eprintln!("Error: Cannot combine --args with an input file");
        process::exit(1);
    }
    if write_back && output_file.is_some() {
        eprintln!("Error: --write and --output are mutually exclusive");
        process::exit(1);
    }
    if map_mode && (remove_quotes || escape.is_some()) {
        eprintln!("Error: --map always strips quotes and uses the default escape");
        process::exit(1);
    }
    if check_only {
        if let Some(flag) = check_conflict(to_format, output_file, write_back, map_mode) {
            eprintln!("Error: --check produces no output and cannot be combined with {}", flag);
            process::exit(1);
        }
    }

    let mut options = ParseOptions::default().remove_quotes(remove_quotes);
    if let Some(c) = escape {
        options = options.escape(c);
    }

    let format_str = to_format.unwrap_or("text");
    let settings = Settings {
        options,
        format_str,
        format: parse_format(format_str).unwrap_or(Format::Text),
        map_mode,
        check_only,
        write_back,
    };

    if let Some(text) = inline_args {
        if write_back {
            eprintln!("Error: --write requires an input file");
            process::exit(1);
        }
        process::exit(process_input(text, None, output_file, &settings));
    }

    if let Some(path) = input_path {
        if Path::new(path).is_dir() {
            if output_file.is_some() {
                eprintln!("Error: --output cannot be used with directory input");
                process::exit(1);
            }
            process_directory(path, &settings);
            return;
        }
    }

    let input = match input_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    process::exit(process_input(&input, input_path, output_file, &settings));
}

/// Log to stderr so stdout carries only the transcoded output.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// The first output-shaping flag given alongside `--check`, if any.
fn check_conflict(
    to_format: Option<&str>,
    output_file: Option<&str>,
    write_back: bool,
    map_mode: bool,
) -> Option<&'static str> {
    if to_format.is_some() {
        Some("--to")
    } else if output_file.is_some() {
        Some("--output")
    } else if write_back {
        Some("--write")
    } else if map_mode {
        Some("--map")
    } else {
        None
    }
}

fn parse_format(s: &str) -> Option<Format> {
    match s {
        "text" | "txt" => Some(Format::Text),
        "cmd" | "commandline" => Some(Format::CommandLine),
        "json" => Some(Format::Json),
        "yaml" | "yml" => Some(Format::Yaml),
        "toml" => Some(Format::Toml),
        "cbor" => Some(Format::Cbor),
        _ => None,
    }
}

fn format_extension(format: Format) -> &'static str {
    match format {
        Format::Text => "txt",
        Format::CommandLine => "cmd",
        Format::Json => "json",
        Format::Yaml => "yaml",
        Format::Toml => "toml",
        Format::Cbor => "cbor",
    }
}

fn process_directory(dir_path: &str, settings: &Settings) {
    let entries = match fs::read_dir(dir_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error reading directory {}: {}", dir_path, e);
            process::exit(1);
        }
    };

    let mut had_errors = false;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map(|e| e == "psp").unwrap_or(false) {
            let path_str = path.to_string_lossy();
            let input = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading {}: {}", path_str, e);
                    had_errors = true;
                    continue;
                }
            };

            if process_input(&input, Some(&path_str), None, settings) != 0 {
                had_errors = true;
            }
        }
    }

    process::exit(if had_errors { 1 } else { 0 });
}

fn process_input(
    input: &str,
    input_file: Option<&str>,
    output_file: Option<&str>,
    settings: &Settings,
) -> i32 {
    let filename = input_file.map(|p| {
        Path::new(p)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.to_string())
    });
    debug!(source = ?filename, len = input.len(), "processing parameters");

    if settings.check_only {
        return match parse_strict_with_source(input, &settings.options, filename.as_deref()) {
            Ok(_) => {
                match input_file {
                    Some(path) => println!("{}: ok", path),
                    None => println!("ok"),
                }
                0
            }
            Err(e) => {
                eprintln!("{}", e);
                1
            }
        };
    }

    let pairs;
    let map: ParameterMap;
    let doc = if settings.map_mode {
        map = parse_map(input);
        Document::Map(&map)
    } else {
        pairs = parse_with_options(input, &settings.options);
        Document::Pairs(&pairs)
    };

    let target = match output_target(output_file, settings.write_back, input_file, settings.format)
    {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let encoded = match settings.format {
        Format::Yaml => transcode::yaml::encode(&doc).map(String::into_bytes),
        Format::Toml => transcode::toml::encode(&doc).map(String::into_bytes),
        Format::Cbor => transcode::cbor::encode(&doc),
        format => Ok(match doc {
            Document::Pairs(pairs) => encode(pairs, format),
            Document::Map(map) => encode_map(map, format),
        }
        .into_bytes()),
    };
    let mut bytes = match encoded {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    // Text on a terminal ends with a newline unless it is empty
    if target.is_none()
        && settings.format != Format::Cbor
        && !bytes.is_empty()
        && !bytes.ends_with(b"\n")
    {
        bytes.push(b'\n');
    }

    debug!(format = settings.format_str, len = bytes.len(), "writing output");
    write_output(&bytes, target.as_deref())
}

/// Resolve where output goes. `None` means stdout.
fn output_target(
    output_file: Option<&str>,
    write_back: bool,
    input_file: Option<&str>,
    format: Format,
) -> Result<Option<PathBuf>, &'static str> {
    match (output_file, write_back, input_file) {
        (Some(path), _, _) => Ok(Some(PathBuf::from(path))),
        (None, true, Some(input)) => Ok(Some(
            Path::new(input).with_extension(format_extension(format)),
        )),
        (None, true, None) => Err("--write requires an input file"),
        (None, false, _) => Ok(None),
    }
}

fn write_output(bytes: &[u8], target: Option<&Path>) -> i32 {
    let written = match target {
        Some(path) => fs::write(path, bytes),
        None => io::stdout().lock().write_all(bytes),
    };
    match written {
        Ok(()) => 0,
        Err(e) => {
            match target {
                Some(path) => eprintln!("Error writing {}: {}", path.display(), e),
                None => eprintln!("Error writing to stdout: {}", e),
            }
            1
        }
    }
}

fn print_help() {
    println!(
        "psparams - PowerShell-style parameter tokenizer

USAGE:
    psparams [OPTIONS] [FILE|DIR]

ARGS:
    [FILE|DIR]    File holding the parameter string (reads from stdin if not provided)
                  When a directory is given, processes all .psp files in it

OPTIONS:
    -a, --args <STRING>    Parse STRING instead of reading a file or stdin

    -t, --to <FORMAT>      Output format [default: text]
                           Supported: text, cmd, json, yaml, toml, cbor

    -q, --remove-quotes    Strip one outer pair of double quotes from each value

    -e, --escape <CHAR>    Escape character for this run [default: `]

    -m, --map              Output parameters keyed by name (last one wins).
                           Always strips quotes and uses the default escape.

    -w, --write            Write output next to the input with inferred extension

    -o, --output <FILE>    Write output to specified file (not valid with directory input)

    --check                Fail on unterminated quotes, brackets, or a trailing
                           escape (exit 0 if clean, 1 otherwise).
                           Not valid with --to, --output, --write or --map.

    -h, --help             Print help

    -V, --version          Print version

ENVIRONMENT:
    RUST_LOG               Log filter for diagnostics on stderr [default: warn]

EXAMPLES:
    # List the pairs in an argument string
    psparams -a '-Name \"my app\" -Args (a b c) -Force'

    # Override parameters as a deployment task reads them
    psparams -q -e '\\' -t json -a '-location \"West US\" -count 3'

    # Keyed view of an XML transformation rule
    psparams -m -t json -a '-transform Web.Release.config -xml Web.config'

    # Validate every .psp file in a directory
    psparams --check ./overrides/

    # Convert to TOML next to the input file
    psparams -t toml -w overrides.psp

    # Render back into a normalized command line
    psparams -t cmd overrides.psp
"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rejects_output_flags() {
        assert_eq!(check_conflict(None, None, false, false), None);
        assert_eq!(check_conflict(Some("json"), None, false, false), Some("--to"));
        assert_eq!(check_conflict(None, Some("out.txt"), false, false), Some("--output"));
        assert_eq!(check_conflict(None, None, true, false), Some("--write"));
        assert_eq!(check_conflict(None, None, false, true), Some("--map"));
    }

    #[test]
    fn test_output_target() {
        assert_eq!(output_target(None, false, Some("a.psp"), Format::Json), Ok(None));
        assert_eq!(
            output_target(Some("out.yaml"), false, None, Format::Json),
            Ok(Some(PathBuf::from("out.yaml")))
        );
        assert_eq!(
            output_target(None, true, Some("dir/a.psp"), Format::Toml),
            Ok(Some(PathBuf::from("dir/a.toml")))
        );
        assert!(output_target(None, true, None, Format::Cbor).is_err());
    }
}
