mod balance;
mod config;
mod error;
mod escape;
mod paths;
mod scaffold;
mod translator;
mod version;

use clap::{ArgGroup, Parser};
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use config::{CellWidth, Config, DefaultParam, EofPolicy, DEFAULT_ARRAY_SIZE};
use error::{Bf2cError, Result};
use translator::FeatureFlags;

#[derive(Parser, Debug)]
#[command(name = "bf2c")]
#[command(version, disable_version_flag = true)]
#[command(about = "Translate a Brainfuck program into a standalone C program")]
#[command(group(ArgGroup::new("default_param").args(["output_default", "input_default", "message_default"])))]
#[command(group(ArgGroup::new("cell").args(["cell_char", "cell_short", "cell_int"])))]
#[command(group(ArgGroup::new("eof").args(["eof_zero", "eof_minus", "eof_no_effect"])))]
struct Args {
    /// The Brainfuck source file to translate
    #[arg(required_unless_present = "version")]
    source: Option<PathBuf>,

    /// Output file for the C source ("-" for stdout, default: source with .c)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Flush stdout after every `.`
    #[arg(short = 'F', long)]
    force_flush: bool,

    /// Bare argument of the generated program is the output file
    #[arg(short = 'O', long)]
    output_default: bool,

    /// Bare argument of the generated program is the input file
    #[arg(short = 'I', long)]
    input_default: bool,

    /// Bare argument of the generated program is the input message
    #[arg(short = 'M', long)]
    message_default: bool,

    /// Number of cells
    #[arg(short, long, value_name = "NUMBER", default_value_t = DEFAULT_ARRAY_SIZE)]
    size: usize,

    /// 8 bit cells (default)
    #[arg(short = '1', long)]
    cell_char: bool,

    /// 16 bit cells
    #[arg(short = '2', long)]
    cell_short: bool,

    /// 32 bit cells
    #[arg(short = '4', long)]
    cell_int: bool,

    /// `,` stores 0 at end of input
    #[arg(short = 'z', long)]
    eof_zero: bool,

    /// `,` stores -1 at end of input (default)
    #[arg(short = 'm', long)]
    eof_minus: bool,

    /// `,` leaves the cell unchanged at end of input
    #[arg(short = 'n', long)]
    eof_no_effect: bool,

    /// Copyright / license message of the generated program
    #[arg(short = 'C', long, value_name = "STR")]
    copyright: Option<OsString>,

    /// Version message of the generated program
    #[arg(short = 'V', long, value_name = "STR")]
    version_string: Option<OsString>,

    /// Reject unbalanced brackets before translating
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Display version information
    #[arg(short = 'v', long)]
    version: bool,
}

impl Args {
    fn config(&self, source: &Path) -> Result<Config> {
        let cell_width = if self.cell_int {
            CellWidth::Bits32
        } else if self.cell_short {
            CellWidth::Bits16
        } else {
            CellWidth::Bits8
        };
        let eof_policy = if self.eof_zero {
            EofPolicy::ZeroOnEof
        } else if self.eof_no_effect {
            EofPolicy::NoEffectOnEof
        } else {
            EofPolicy::MinusOneOnEof
        };
        let default_param = if self.output_default {
            DefaultParam::Output
        } else if self.input_default {
            DefaultParam::Input
        } else if self.message_default {
            DefaultParam::Message
        } else {
            DefaultParam::None
        };
        let version_text = match &self.version_string {
            Some(text) => text.clone().into_encoded_bytes(),
            None => version::version_info(source).into_bytes(),
        };

        Ok(Config::new(self.size)?
            .with_cell_width(cell_width)
            .with_eof_policy(eof_policy)
            .with_default_param(default_param)
            .with_force_flush(self.force_flush)
            .with_version_text(Some(version_text))
            .with_copyright_text(self.copyright.clone().map(OsString::into_encoded_bytes)))
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdout().lock()));
    }
    let file = File::create(path).map_err(|source| Bf2cError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Creates `path`, translates into it and removes it again if translation
/// fails part way.
fn write_translation<R: Read>(input: R, config: &Config, path: &Path) -> Result<FeatureFlags> {
    let mut out = open_output(path)?;
    let result = translator::translate(input, config, &mut out).and_then(|flags| {
        out.flush()?;
        Ok(flags)
    });
    drop(out);
    if result.is_err() && path != Path::new("-") {
        if let Err(e) = fs::remove_file(path) {
            warn!("could not remove {:?}: {}", path, e);
        }
    }
    result
}

fn run(args: &Args, source: &Path) -> Result<()> {
    let config = args.config(source)?;
    debug!(
        "config: {} cells of {} bit, eof {:?}, default {:?}, flush {}",
        config.array_size(),
        config.cell_width().bits(),
        config.eof_policy(),
        config.default_param(),
        config.force_flush()
    );

    let open_err = |source_err: io::Error| Bf2cError::Open {
        path: source.to_path_buf(),
        source: source_err,
    };
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| paths::default_output_path(source));
    debug!("{:?} -> {:?}", source, output_path);

    if !fs::metadata(source).map_err(open_err)?.is_file() {
        return Err(open_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let flags = if args.strict {
        let program = fs::read(source).map_err(open_err)?;
        balance::check(&program)?;
        write_translation(program.as_slice(), &config, &output_path)?
    } else {
        let input = File::open(source).map_err(open_err)?;
        write_translation(input, &config, &output_path)?
    };

    info!(
        "wrote {:?} (input: {}, output: {}, default parameter: {:?})",
        output_path,
        flags.saw_input,
        flags.saw_output,
        config.default_param().resolve(flags)
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    // clap only lets `source` be absent together with --version
    let source = match args.source.as_deref() {
        Some(source) if !args.version => source,
        _ => {
            println!("bf2c {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    if let Err(e) = run(&args, source) {
        eprintln!("bf2c: {}", e);
        std::process::exit(1);
    }
}
