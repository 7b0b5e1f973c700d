use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use png2jpg::{convert, Destination, Error, InputFormat, Request, Source};

/// Convert a PNG image into a baseline JPEG, optionally shrinking it by an
/// integer factor first.
#[derive(Parser, Debug)]
#[command(name = "png2jpg", version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    png2jpg input shot.png shot.jpg               Convert with quality 85
    cat shot.png | png2jpg i - shot.jpg 60 2      Read stdin, halve the size
    png2jpg pipe shot.jpg 90 < shot.png           Pipe mode
    screencap | png2jpg raw 1080 2376 60 > f.jpg  Raw RGBA frame to stdout

Exit status: 0 ok, 1 usage, 2 empty stdin, 3 input not found,
4 input unreadable, 5 decode failed, 6 encode/write failed,
7 invalid parameter")]
struct Args {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Read a PNG file, or stdin when INPUT is `-`, and write a JPEG file
    #[command(visible_alias = "i")]
    Input {
        /// PNG file, or `-` for standard input
        input: PathBuf,
        /// JPEG file to write
        output: PathBuf,
        #[command(flatten)]
        settings: Settings,
    },
    /// Read a PNG from stdin and write a JPEG file
    #[command(visible_alias = "p")]
    Pipe {
        /// JPEG file to write
        output: PathBuf,
        #[command(flatten)]
        settings: Settings,
    },
    /// Read a raw RGBA8888 frame (e.g. from `screencap`) from stdin and
    /// write the JPEG to stdout
    #[command(visible_alias = "r")]
    Raw {
        /// Frame width in pixels
        width: u32,
        /// Frame height in pixels
        height: u32,
        #[command(flatten)]
        settings: Settings,
    },
}

#[derive(clap::Args, Debug)]
struct Settings {
    /// JPEG quality, clamped to 1-100
    #[arg(default_value_t = 85, allow_negative_numbers = true)]
    quality: i64,
    /// Downsample factor: 1, 2 or 4
    #[arg(default_value_t = 1, allow_negative_numbers = true)]
    downsample: i64,
}

impl From<Mode> for Request {
    fn from(mode: Mode) -> Self {
        let (source, format, destination, settings) = match mode {
            Mode::Input {
                input,
                output,
                settings,
            } => (
                Source::from_arg(input),
                InputFormat::Png,
                Destination::File(output),
                settings,
            ),
            Mode::Pipe { output, settings } => (
                Source::Stdin,
                InputFormat::Png,
                Destination::File(output),
                settings,
            ),
            Mode::Raw {
                width,
                height,
                settings,
            } => (
                Source::Stdin,
                InputFormat::RawRgba { width, height },
                Destination::Stdout,
                settings,
            ),
        };
        Request {
            source,
            format,
            destination,
            quality: settings.quality,
            downsample: settings.downsample,
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_module("png2jpg", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

pub fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version are not failures
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let err = Error::usage(e.render().to_string());
            eprint!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };
    init_logging(args.verbose);

    let request = Request::from(args.mode);
    match convert(&request, io::stdin().lock(), io::stdout().lock()) {
        Ok(report) => {
            if request.destination == Destination::Stdout {
                eprintln!("{report}");
            } else {
                println!("{report}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            log::debug!("{}", err.backtrace);
            ExitCode::from(err.exit_code())
        }
    }
}
