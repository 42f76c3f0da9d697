use crate::config::load_config;
use crate::placement_dump::write_placement_dump;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::scenario::{load_scenario, parse_scenario, run_scenario};
use crate::uacss::{BoxModel, UaFlags};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "placer", version, about = "Popup placement engine")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a placement scenario
    Place(PlaceArgs),
    /// Print the browser flag classes for a user-agent string
    UaClasses(UaArgs),
}

#[derive(clap::Args, Debug)]
pub struct PlaceArgs {
    /// Scenario file (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for JSON and SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file (placement options, themeVariables, render size)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct UaArgs {
    #[arg(long = "user-agent")]
    pub user_agent: String,

    /// Add `d-rtl`
    #[arg(long)]
    pub rtl: bool,

    /// Report `d-borderbox` instead of `d-contentbox`
    #[arg(long = "border-box")]
    pub border_box: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();
    match args.command {
        Command::Place(args) => place(args),
        Command::UaClasses(args) => {
            println!("{}", ua_classes(&args));
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // a second install (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn place(args: PlaceArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut scenario = match args.input.as_deref() {
        Some(path) if path != Path::new("-") => load_scenario(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            parse_scenario(&buf)?
        }
    };

    let dump = run_scenario(&mut scenario, &config.place)?;
    match args.output_format {
        OutputFormat::Json => write_placement_dump(&dump, args.output.as_deref())?,
        OutputFormat::Svg => {
            let svg = render_svg(&dump, &config.theme);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&dump, &config.theme);
            write_output_png(&svg, &output, &config.render)?;
        }
    }
    Ok(())
}

fn ua_classes(args: &UaArgs) -> String {
    let box_model = if args.border_box {
        BoxModel::BorderBox
    } else {
        BoxModel::ContentBox
    };
    UaFlags::sniff(&args.user_agent)
        .with_box_model(box_model)
        .with_rtl(args.rtl)
        .class_names()
        .join(" ")
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_place_arguments() {
        let args = Args::try_parse_from([
            "placer", "place", "-i", "menu.json", "-e", "svg", "-c", "config.json",
        ])
        .unwrap();
        let Command::Place(place) = args.command else {
            panic!("expected place subcommand");
        };
        assert_eq!(place.input, Some(PathBuf::from("menu.json")));
        assert!(matches!(place.output_format, OutputFormat::Svg));
        assert_eq!(place.config, Some(PathBuf::from("config.json")));
    }

    #[test]
    fn ua_classes_honours_flags() {
        let args = Args::try_parse_from([
            "placer",
            "ua-classes",
            "--user-agent",
            "Mozilla/5.0 (Windows NT 6.1; Trident/7.0; rv:11.0) like Gecko",
            "--rtl",
            "--border-box",
        ])
        .unwrap();
        let Command::UaClasses(ua) = args.command else {
            panic!("expected ua-classes subcommand");
        };
        assert_eq!(ua_classes(&ua), "d-ie d-ie-11 d-borderbox d-rtl");
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        assert_eq!(
            ensure_output(&Some(PathBuf::from("out.png")), "png").unwrap(),
            PathBuf::from("out.png")
        );
    }
}
