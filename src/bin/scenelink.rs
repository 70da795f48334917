use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scenelink::Host as _;
use serde::{Serialize, de::DeserializeOwned};

#[derive(Parser, Debug)]
#[command(name = "scenelink", version)]
struct Cli {
    /// Log decisions at debug level (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the camera each frame resolves to.
    Resolve(ResolveArgs),
    /// Toggle into the selected scene strip, or back out.
    Toggle(ToggleArgs),
    /// Jump to the frame matching the selected strip in another timeline.
    Match(MatchArgs),
    /// Feed a JSON list of events through a session and print what happened.
    Replay(ReplayArgs),
    /// Check a project strictly and report the first problem.
    Validate(ProjectArgs),
    /// Convert camera markers into camera strips.
    Markers(MarkersArgs),
}

#[derive(Parser, Debug)]
struct ProjectArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Link configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Timeline to evaluate (defaults to the displayed one).
    #[arg(long)]
    timeline: Option<String>,

    /// Frames to evaluate, in order.
    #[arg(required = true, allow_negative_numbers = true)]
    frames: Vec<i64>,
}

#[derive(Parser, Debug)]
struct ToggleArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Select this strip on the displayed timeline first.
    #[arg(long)]
    strip: Option<String>,
}

#[derive(Parser, Debug)]
struct MatchArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Select this strip on the displayed timeline first.
    #[arg(long)]
    strip: Option<String>,

    /// Playhead position (defaults to the timeline's current frame).
    #[arg(long, allow_negative_numbers = true)]
    frame: Option<i64>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Link configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON list of events.
    #[arg(long)]
    events: PathBuf,
}

#[derive(Parser, Debug)]
struct MarkersArgs {
    /// JSON list of `{ "frame": .., "camera": .. }` markers.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timeline the generated strips play back.
    #[arg(long)]
    target: String,

    /// Channel for the generated strips.
    #[arg(long, default_value_t = scenelink::MARKER_CHANNEL)]
    channel: u32,

    /// Length of the strip started by the last marker.
    #[arg(long, default_value_t = scenelink::DEFAULT_MARKER_TAIL)]
    tail: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Resolve(args) => cmd_resolve(args),
        Command::Toggle(args) => cmd_toggle(args),
        Command::Match(args) => cmd_match(args),
        Command::Replay(args) => cmd_replay(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Markers(args) => cmd_markers(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    let value = serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))?;
    Ok(value)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<scenelink::LinkConfig> {
    match path {
        Some(p) => read_json(p, "config"),
        None => Ok(scenelink::LinkConfig::default()),
    }
}

fn load_host(path: &Path) -> anyhow::Result<scenelink::MemoryHost> {
    let project: scenelink::Project = read_json(path, "project")?;
    scenelink::MemoryHost::new(project).with_context(|| format!("load '{}'", path.display()))
}

fn select(host: &mut scenelink::MemoryHost, strip: Option<&str>) -> anyhow::Result<String> {
    let displayed = host.active_timeline().to_string();
    if let Some(name) = strip {
        host.select_strip(&displayed, Some(name))?;
    }
    Ok(displayed)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

#[derive(Serialize)]
struct ResolvedFrame<'a> {
    frame: scenelink::FrameIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    strip: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    camera: Option<String>,
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let host = load_host(&args.in_path)?;
    let config = read_config(args.config.as_deref())?;
    let name = args
        .timeline
        .unwrap_or_else(|| host.active_timeline().to_string());
    let timeline = host
        .timeline(&name)
        .with_context(|| format!("unknown timeline '{name}'"))?;

    let mut rows = Vec::with_capacity(args.frames.len());
    for frame in args.frames.into_iter().map(scenelink::FrameIndex) {
        let strip = scenelink::Resolver::winning_strip(timeline, frame, config.target_match);
        rows.push(ResolvedFrame {
            frame,
            strip: strip.map(|s| s.name.as_str()),
            camera: strip
                .and_then(|s| s.scene())
                .and_then(|s| s.camera_target())
                .map(str::to_string),
        });
    }
    print_json(&rows)
}

#[derive(Serialize)]
struct Report<O: Serialize> {
    outcome: O,
    active_timeline: String,
    commands: Vec<scenelink::HostCommand>,
}

impl<O: Serialize> Report<O> {
    fn new(outcome: O, mut host: scenelink::MemoryHost) -> Self {
        Self {
            outcome,
            active_timeline: host.active_timeline().to_string(),
            commands: host.take_commands(),
        }
    }
}

fn cmd_toggle(args: ToggleArgs) -> anyhow::Result<()> {
    let mut host = load_host(&args.in_path)?;
    let displayed = select(&mut host, args.strip.as_deref())?;

    let mut session = scenelink::LinkSession::default();
    let outcome = session.on_toggle_requested(&mut host, &displayed);
    print_json(&Report::new(outcome, host))
}

fn cmd_match(args: MatchArgs) -> anyhow::Result<()> {
    let mut host = load_host(&args.in_path)?;
    let displayed = select(&mut host, args.strip.as_deref())?;
    let frame = match args.frame {
        Some(f) => scenelink::FrameIndex(f),
        None => host
            .timeline(&displayed)
            .map(|t| t.current_frame)
            .unwrap_or_default(),
    };

    let mut session = scenelink::LinkSession::default();
    let outcome = session.on_match_frame_requested(&mut host, &displayed, frame);
    print_json(&Report::new(outcome, host))
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let mut host = load_host(&args.in_path)?;
    let config = read_config(args.config.as_deref())?;
    let events: Vec<scenelink::LinkEvent> = read_json(&args.events, "events")?;

    let mut session = scenelink::LinkSession::new(config);
    let outcomes: Vec<_> = events
        .iter()
        .map(|event| session.dispatch(&mut host, event))
        .collect();
    eprintln!("replayed {} events", events.len());
    print_json(&Report::new(outcomes, host))
}

fn cmd_validate(args: ProjectArgs) -> anyhow::Result<()> {
    let project: scenelink::Project = read_json(&args.in_path, "project")?;
    project
        .validate()
        .with_context(|| format!("validate '{}'", args.in_path.display()))?;
    let strips: usize = project.timelines.iter().map(|t| t.strips.len()).sum();
    eprintln!(
        "ok: {} timelines, {strips} strips",
        project.timelines.len()
    );
    Ok(())
}

fn cmd_markers(args: MarkersArgs) -> anyhow::Result<()> {
    let markers: Vec<scenelink::CameraMarker> = read_json(&args.in_path, "markers")?;
    let strips =
        scenelink::strips_from_camera_markers(&markers, &args.target, args.channel, args.tail)?;
    print_json(&strips)
}
