use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sphereview::{demo, init_logging, Config, Environment, BUILD_DATE, VERSION};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (.toml or .json); defaults to the platform location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the reference manipulation sequence to PNG frames
    Demo(DemoArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Directory the frames are written into
    #[arg(short, long, default_value = "frames")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Print the configuration file location instead
    #[arg(long)]
    path: bool,
}

fn run_demo(config: &Config, args: DemoArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Can not create dir {:?}", &args.out_dir))?;

    let mut environment = Environment::with_config(config)?;
    let frames = demo::render_frames(&mut environment, &args.out_dir)?;
    environment.destroy();

    info!(frames = frames.len(), out_dir = %args.out_dir.display(), "demo finished");
    Ok(())
}

fn print_config(config: &Config, args: ConfigArgs) -> anyhow::Result<()> {
    if args.path {
        println!("{}", Config::default_path()?.display());
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    info!(version = VERSION, build_date = BUILD_DATE, "sphereview starting");

    let config = Config::load_or_default(cli.config.as_deref())
        .context("Can not load configuration")?;

    match cli.command {
        Command::Demo(args) => run_demo(&config, args),
        Command::Config(args) => print_config(&config, args),
    }
}
