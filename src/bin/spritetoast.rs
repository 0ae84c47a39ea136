use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use spritetoast::{
    DemoConfig, DemoController, Fps, Node, Point, RectRegion, SimulationPlan, Size, Toast,
    ToastConfig, ToastSample,
};

#[derive(Parser, Debug)]
#[command(name = "spritetoast", version)]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the demo scene headless and print the toast state over time.
    Demo(DemoArgs),
    /// Print the toast frame for a parent of the given bounds.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// View width in points.
    #[arg(long, default_value_t = 1024.0)]
    width: f64,

    /// View height in points.
    #[arg(long, default_value_t = 768.0)]
    height: f64,

    /// Simulation frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Simulated duration in seconds.
    #[arg(long, default_value_t = 6.0)]
    seconds: f64,

    /// Time at which the view is resized.
    #[arg(long, requires = "resize_to")]
    resize_at: Option<f64>,

    /// New view size, as `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_size, requires = "resize_at")]
    resize_to: Option<Size>,

    /// Time at which the toast is shown again.
    #[arg(long)]
    reshow_at: Option<f64>,

    /// Toast config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Toast message shown on presentation (and on re-show).
    #[arg(long)]
    message: Option<String>,

    /// Seconds between periodic samples.
    #[arg(long, default_value_t = 0.5)]
    sample_every: f64,

    /// Emit samples as a JSON array.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Parent width in points.
    #[arg(long)]
    width: f64,

    /// Parent height in points.
    #[arg(long)]
    height: f64,

    /// Parent anchor x.
    #[arg(long, default_value_t = 0.0)]
    anchor_x: f64,

    /// Parent anchor y.
    #[arg(long, default_value_t = 0.0)]
    anchor_y: f64,

    /// Toast config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Ok(Size::new(w, h))
}

fn load_toast_config(path: Option<&Path>) -> anyhow::Result<ToastConfig> {
    let Some(path) = path else {
        return Ok(ToastConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let config = ToastConfig::from_json_str(&s)
        .with_context(|| format!("parse config '{}'", path.display()))?;
    config
        .validate()
        .with_context(|| format!("validate config '{}'", path.display()))?;
    Ok(config)
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let mut config = DemoConfig::default();
    if let Some(path) = args.config.as_deref() {
        config.toast = load_toast_config(Some(path))?;
    }
    if let Some(message) = args.message.clone() {
        config.toast_message = message;
    }
    let reshow_message = config.toast_message.clone();

    let mut controller = DemoController::load(Size::new(args.width, args.height), config)?;
    let plan = SimulationPlan {
        fps: Fps::new(args.fps, 1)?,
        seconds: args.seconds,
        resize: args.resize_at.zip(args.resize_to),
        reshow: args.reshow_at.map(|at| (at, reshow_message)),
        sample_every_secs: args.sample_every,
    };
    let samples = spritetoast::simulate(&mut controller, &plan)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
    } else {
        for sample in &samples {
            println!("{}", format_sample(sample));
        }
    }
    Ok(())
}

fn format_sample(sample: &ToastSample) -> String {
    let state = match (sample.attached, sample.animating) {
        (true, true) => "showing",
        (true, false) => "idle",
        (false, _) => "detached",
    };
    format!(
        "t={:>6.3}s {:<8} alpha={:.3} origin=({:.1}, {:.1}) size={:.1}x{:.1} text={:?}",
        sample.time_secs,
        state,
        sample.alpha,
        sample.region.origin.x,
        sample.region.origin.y,
        sample.region.size.width,
        sample.region.size.height,
        sample.text.as_deref().unwrap_or(""),
    )
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let config = load_toast_config(args.config.as_deref())?;

    let parent = Node::scene(Size::new(args.width, args.height));
    parent.set_anchor_point(Point::new(args.anchor_x, args.anchor_y))?;
    let toast = Toast::make_with_config(&parent, &config)?;
    let region: RectRegion = toast.region();

    println!("{}", serde_json::to_string_pretty(&region)?);
    Ok(())
}
