
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;

pub mod converter;

use clap::{Arg, ArgMatches, App, AppSettings};

use std::ffi::OsString;
use std::path::Path;

use converter::Converter;

const USAGE: &str = "hexle <INPUT> <OUTPUT>";

fn main() {
    initialize_logging(log::LevelFilter::Warn);
    std::process::exit(run(std::env::args_os()));
}

/// Converts the listing named on the command line and returns the
/// process exit status.
fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match process_arguments(args) {
        Some(args) => args,
        None => {
            println!("Usage: {}", USAGE);
            return 2;
        },
    };

    let ipath = Path::new(args.value_of_os("INPUT").unwrap_or_default());
    let opath = Path::new(args.value_of_os("OUTPUT").unwrap_or_default());
    debug!("Arguments:\n\tInfile: {}\n\tOutfile: {}", ipath.display(), opath.display());

    match Converter::new().convert_file(ipath, opath) {
        Err(err) => {
            error!("fatal: {}", err);
            1
        },
        Ok(summary) => {
            println!("{}", summary.report(opath));
            0
        },
    }
}

fn build_app() -> App<'static, 'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .usage(USAGE)
        .setting(AppSettings::AllowInvalidUtf8)
        .arg(Arg::with_name("INPUT")
            .help("Instruction listing to read")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("OUTPUT")
            .help("Byte file to write, one little-endian byte per line")
            .required(true)
            .multiple(false)
            .index(2))
}

/// Accepts exactly two arguments after the program name. Both are taken
/// as paths as written, so `-d` or `--help` name files rather than flags.
fn process_arguments<I, T>(args: I) -> Option<ArgMatches<'static>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() != 3 {
        return None;
    }

    // Everything after `--` is positional.
    args.insert(1, OsString::from("--"));
    build_app().get_matches_from_safe(args).ok()
}

fn initialize_logging(level: log::LevelFilter) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply().ok();
}
