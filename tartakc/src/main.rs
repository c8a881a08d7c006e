mod driver;
mod target;

use std::{fs, path::PathBuf, time::Duration};

use clap::Parser;
use clap_derive::{Parser, ValueEnum};
use eyre::{bail, WrapErr};
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::{
    driver::{Summary, Watcher},
    target::Target,
};

#[derive(Parser, Debug)]
#[clap(version, about = "Compiles Tartak sources into TypeScript types")]
pub struct Args {
    #[clap(
        default_value = ".",
        help = "A .tartak file, or a directory to search recursively for .tartak files"
    )]
    path: PathBuf,

    #[clap(
        long,
        value_enum,
        env = "TARTAK_TARGET",
        default_value_t = target::DEFAULT_TARGET,
        help = "Where the generated code imports its libraries from"
    )]
    target: Target,

    #[clap(
        long,
        value_enum,
        default_value_t = Emit::Code,
        help = "What to produce; `ast` and `tokens` print to stdout and need a single file"
    )]
    emit: Emit,

    #[clap(long, help = "Keep running, recompiling sources as they change")]
    watch: bool,

    #[clap(
        long,
        default_value_t = 500,
        help = "How often to look for changes in watch mode, in milliseconds"
    )]
    poll_interval_ms: u64,

    #[clap(long, help = "Enable debug logging")]
    debug: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "snake_case")]
enum Emit {
    Code,
    Ast,
    Tokens,
}

impl std::fmt::Display for Emit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Emit::Code => "code",
            Emit::Ast => "ast",
            Emit::Tokens => "tokens",
        })
    }
}

fn main() -> Result<(), eyre::Report> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    let main_subscriber = tracing_subscriber::fmt()
        .compact()
        .with_ansi(true)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NONE)
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(main_subscriber).unwrap_or_else(|e| {
        eprintln!("Unable to configure logging: {e}");
        std::process::exit(1);
    });

    let target: tartak::Target = args.target.into();
    let is_file = fs::metadata(&args.path)
        .wrap_err_with(|| format!("can't read {}", args.path.display()))?
        .is_file();

    if is_file && !driver::is_source(&args.path) {
        bail!(
            "invalid file extension, only .{} files can be compiled",
            driver::SOURCE_EXTENSION
        );
    }

    if args.emit != Emit::Code {
        if !is_file {
            bail!("--emit {} needs a single source file", args.emit);
        }
        let src = fs::read_to_string(&args.path)?;
        let out = match args.emit {
            Emit::Ast => driver::emit_ast(&src)?,
            _ => driver::emit_tokens(&src),
        };
        print!("{out}");
        return Ok(());
    }

    let sources = driver::collect_sources(&args.path)?;
    info!("compiling {} source(s) for {}", sources.len(), args.target);
    let Summary { compiled, failed } = driver::compile_all(&sources, target);
    info!("{compiled} compiled, {failed} failed");

    if args.watch {
        let interval = Duration::from_millis(args.poll_interval_ms);
        return Watcher::new(&args.path, interval)?.run(target);
    }
    if failed > 0 {
        bail!("{failed} source(s) failed to compile");
    }
    Ok(())
}
