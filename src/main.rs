use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use flow_icon::{icon_gen, IconConfig};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "flow-icon",
    about = "Render the FinanceFlow app icon and place it in the Xcode asset catalog"
)]
struct Args {
    /// Icon edge length in pixels. Overrides the value from --config.
    #[clap(short, long, value_name = "PIXELS")]
    size: Option<u32>,

    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./icon_output")]
    output: PathBuf,

    /// AppIcon.appiconset directory to copy the icon into, if it exists.
    #[clap(
        long,
        value_name = "DIR",
        default_value = "../FinanceFlow/Assets.xcassets/AppIcon.appiconset"
    )]
    asset_dir: PathBuf,

    /// Skip copying the icon into the asset directory
    #[clap(long)]
    no_copy: bool,

    /// JSON file overriding render settings (colors, curve, layers, ...)
    #[clap(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write a Contents.json describing the icon next to it
    #[clap(long)]
    contents_json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading render settings from {}", path.display());
            IconConfig::from_file(path)?
        }
        None => IconConfig::default(),
    };
    if let Some(size) = args.size {
        config = config.with_size(size);
    }

    icon_gen::generate_icon(icon_gen::Args {
        config,
        output: args.output,
        asset_dir: (!args.no_copy).then_some(args.asset_dir),
        contents_json: args.contents_json,
    })?;

    Ok(())
}
