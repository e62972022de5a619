use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mockup", version)]
struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a design onto a template and write a PNG.
    Generate(GenerateArgs),
    /// Validate one or more template JSON files.
    Validate(ValidateArgs),
    /// Print validation, metrics and recommendations for one template.
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Template metadata JSON.
    #[arg(long)]
    template: PathBuf,

    /// Template photo (any format the `image` crate decodes).
    #[arg(long)]
    template_image: PathBuf,

    /// Design image.
    #[arg(long)]
    design: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Minimum output width in pixels.
    #[arg(long, default_value_t = mockup::DEFAULT_MIN_WIDTH)]
    min_width: u32,

    /// Horizontal offset from the design-area center, template pixels.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f64,

    /// Vertical offset from the design-area center, template pixels.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f64,

    /// Design scale.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Design rotation in degrees.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotation: f64,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Template JSON files; each holds one template object or an array of them.
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Template JSON file.
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Report(args) => cmd_report(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse JSON '{}'", path.display()))
}

fn read_image(path: &Path) -> anyhow::Result<mockup::RasterImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    mockup::decode_image(&bytes).with_context(|| format!("decode image '{}'", path.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let template = mockup::MockupTemplate::from_path(&args.template)?;
    let request = mockup::MockupRequest::new(
        read_image(&args.template_image)?,
        read_image(&args.design)?,
        template,
    )
    .with_min_width(args.min_width)
    .with_transform(mockup::UserTransform {
        x: args.x,
        y: args.y,
        scale: args.scale,
        rotation: args.rotation,
    });

    let generator = mockup::MockupGenerator::new(mockup::CpuSurfaceFactory);
    let encoded = generator.generate(&request)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &encoded.bytes)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    tracing::info!(
        width = encoded.width,
        height = encoded.height,
        "wrote mockup"
    );
    println!("{}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let mut templates = Vec::new();
    for path in &args.paths {
        match read_json(path)? {
            serde_json::Value::Array(items) => templates.extend(items),
            other => templates.push(other),
        }
    }

    let batch = mockup::batch_validate(&templates);
    println!("{}", serde_json::to_string_pretty(&batch)?);
    if batch.summary.invalid > 0 {
        anyhow::bail!(
            "{} of {} template(s) are invalid",
            batch.summary.invalid,
            batch.summary.total
        );
    }
    Ok(())
}

fn cmd_report(args: ReportArgs) -> anyhow::Result<()> {
    let template = read_json(&args.path)?;
    let report = mockup::report(&template);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
