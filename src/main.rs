// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ffi::OsString;
use std::io::Write;
use std::path;

use svgclip::svgtree::{Document, NodeId};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process() -> Result<(), String> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", HELP);
            return Err(e);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            if args.verbose {
                log::set_max_level(log::LevelFilter::Info);
            } else {
                log::set_max_level(log::LevelFilter::Warn);
            }
        }
    }

    let svg_data = if args.in_svg == "-" {
        use std::io::Read;
        let mut buf = Vec::new();
        let stdin = std::io::stdin();
        let mut handle = stdin.lock();
        handle.read_to_end(&mut buf).map_err(|_| "failed to read stdin")?;
        buf
    } else {
        std::fs::read(&args.in_svg).map_err(|_| "failed to open the provided file")?
    };

    let mut doc = Document::parse_data(&svg_data).map_err(|e| e.to_string())?;

    match args.command {
        Command::Crop => {
            svgclip::crop_to_page(&mut doc, &args.opt).map_err(|e| e.to_string())?;
        }
        Command::Flatten => {
            let selection = select(&doc, &args.ids)?;
            svgclip::flatten(&mut doc, &selection);
        }
        Command::DemoteLayers => {
            for id in select(&doc, &args.ids)? {
                svgclip::demote_child_layers(&mut doc, id).map_err(|e| e.to_string())?;
            }
        }
    }

    let output = doc.to_string(xmlwriter::Options::default());
    match args.out_svg {
        Some(ref path) => {
            std::fs::write(path, output.as_bytes()).map_err(|_| "failed to write the output file")?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output.as_bytes()).map_err(|_| "failed to write to stdout")?;
        }
    }

    Ok(())
}

fn select(doc: &Document, ids: &[String]) -> Result<Vec<NodeId>, String> {
    if ids.is_empty() {
        return Err("at least one --id must be set".to_string());
    }

    let mut selection = Vec::with_capacity(ids.len());
    for id in ids {
        match doc.element_by_id(id) {
            Some(node) => selection.push(node.id()),
            None => return Err(svgclip::Error::ElementNotFound(id.clone()).to_string()),
        }
    }

    Ok(selection)
}

const HELP: &str = "\
svgclip restructures SVG documents without changing how they render.

USAGE:
  svgclip [OPTIONS] <COMMAND> <in-svg> [<out-svg>]  # from file to file
  svgclip [OPTIONS] <COMMAND> - [<out-svg>]         # from stdin to file

  svgclip crop in.svg out.svg
  svgclip --id layer1 --id layer2 flatten in.svg out.svg
  svgclip --id layer1 demote-layers in.svg > out.svg

COMMANDS:
  crop                          Clips all paths to the page
  flatten                       Moves nested groups and layers of the selected
                                groups one level up
  demote-layers                 Converts direct child layers of the selected
                                layers into groups

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

      --id ID                   Selects an element by ID.
                                This option can be set multiple times
      --clip-mode MODE          Selects the clip region computation method
                                [default: inverse] [possible values: inverse, translate]
      --keep-contained          Clips paths that are already inside the page too
      --id-prefix PREFIX        Sets a prefix for generated clip path IDs
                                [default: clip_]
      --dpi DPI                 Sets the resolution used for the page size
                                [default: 96] [possible values: 10..4000]

      --quiet                   Disables warnings
      --verbose                 Prints a summary of each command

ARGS:
  <COMMAND>                     A command to run
  <in-svg>                      Input file
  <out-svg>                     Output file. Writes to stdout when not set
";

#[derive(Clone, Copy, Debug)]
enum Command {
    Crop,
    Flatten,
    DemoteLayers,
}

impl std::str::FromStr for Command {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crop" => Ok(Command::Crop),
            "flatten" => Ok(Command::Flatten),
            "demote-layers" => Ok(Command::DemoteLayers),
            _ => Err("invalid command"),
        }
    }
}

#[derive(Debug)]
struct CliArgs {
    ids: Vec<String>,
    clip_mode: svgclip::ClipMode,
    keep_contained: bool,
    id_prefix: Option<String>,
    dpi: u32,

    quiet: bool,
    verbose: bool,

    command: Command,
    input: String,
    output: Option<path::PathBuf>,

    unused: Vec<OsString>,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    collect_args_from(input)
}

fn collect_args_from(mut input: pico_args::Arguments) -> Result<CliArgs, pico_args::Error> {
    let ids: Vec<String> = input.values_from_str("--id")?;
    let clip_mode: svgclip::ClipMode = input.opt_value_from_str("--clip-mode")?.unwrap_or_default();
    let keep_contained = input.contains("--keep-contained");
    let id_prefix: Option<String> = input.opt_value_from_str("--id-prefix")?;
    let dpi = input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(96);
    let quiet = input.contains("--quiet");
    let verbose = input.contains("--verbose");

    // Unknown flags would be taken as free-standing arguments otherwise.
    let (mut unused, free): (Vec<_>, Vec<_>) = input.finish().into_iter().partition(|arg| is_flag(arg));
    let mut free = pico_args::Arguments::from_vec(free);

    let command: Command = free.free_from_str()?;
    let input: String = free.free_from_str()?;
    let output: Option<path::PathBuf> = free.opt_free_from_str()?;
    unused.extend(free.finish());

    Ok(CliArgs {
        ids,
        clip_mode,
        keep_contained,
        id_prefix,
        dpi,
        quiet,
        verbose,
        command,
        input,
        output,
        unused,
    })
}

fn is_flag(arg: &OsString) -> bool {
    arg.to_str().map_or(false, |s| s.starts_with('-') && s != "-")
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

fn parse_id_prefix(s: String) -> Result<String, String> {
    let is_valid = s.chars().next().map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');

    if is_valid {
        Ok(s)
    } else {
        Err(format!("'{}' is not a valid ID prefix", s))
    }
}

struct Args {
    command: Command,
    in_svg: String,
    out_svg: Option<path::PathBuf>,
    ids: Vec<String>,
    quiet: bool,
    verbose: bool,
    opt: svgclip::Options,
}

fn parse_args() -> Result<Args, String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    if args.quiet && args.verbose {
        return Err("--quiet and --verbose cannot be set together".to_string());
    }

    if !args.unused.is_empty() {
        eprintln!("Warning: unused arguments left: {:?}.", args.unused);
    }

    if !args.ids.is_empty() {
        if let Command::Crop = args.command {
            eprintln!("Warning: --id has no effect on crop.");
        }
    }

    let mut opt = svgclip::Options {
        clip_mode: args.clip_mode,
        skip_contained: !args.keep_contained,
        dpi: args.dpi as f64,
        ..svgclip::Options::default()
    };

    if let Some(prefix) = args.id_prefix {
        opt.id_prefix = parse_id_prefix(prefix)?;
    }

    Ok(Args {
        command: args.command,
        in_svg: args.input,
        out_svg: args.output,
        ids: args.ids,
        quiet: args.quiet,
        verbose: args.verbose,
        opt,
    })
}

static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, record.args()),
                log::Level::Warn  => eprintln!("Warning (in {}:{}): {}", target, line, record.args()),
                log::Level::Info  => eprintln!("Info (in {}:{}): {}", target, line, record.args()),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, record.args()),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, record.args()),
            }
        }
    }

    fn flush(&self) {}
}
