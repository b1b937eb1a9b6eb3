use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reelwright", version)]
struct Cli {
    /// Input scene script JSON.
    #[arg(long, global = true)]
    script: Option<PathBuf>,

    /// Compose config JSON. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print composition metadata and the scene timeline.
    Info,
    /// Dump the composed layer tree as JSON.
    Plan,
    /// Evaluate a single frame and dump it as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range as NDJSON, followed by a distinct-frame stats line.
    Sample(SampleArgs),
    /// Dump the audio cue manifest as JSON.
    Audio,
    /// Probe every referenced media source and report failures.
    Preflight(PreflightArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive). Defaults to the composition duration.
    #[arg(long)]
    end: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Evaluation chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Emit one fingerprint per frame instead of the full evaluated frame.
    #[arg(long, default_value_t = false)]
    fingerprints: bool,
}

#[derive(Parser, Debug)]
struct PreflightArgs {
    /// Directory local sources resolve against. Defaults to the script's directory.
    #[arg(long)]
    assets_root: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let script_path = cli
        .script
        .clone()
        .context("missing required argument '--script <PATH>'")?;
    let script = reelwright::SceneScript::from_path(&script_path)
        .with_context(|| format!("load scene script '{}'", script_path.display()))?;
    let cfg = match &cli.config {
        Some(p) => reelwright::ComposeConfig::from_path(p)
            .with_context(|| format!("load compose config '{}'", p.display()))?,
        None => reelwright::ComposeConfig::default(),
    };

    let opts = match &cli.cmd {
        Command::Sample(a) => reelwright::RenderSessionOpts {
            parallel: a.parallel,
            chunk_size: a.chunk_size,
            threads: a.threads,
        },
        _ => reelwright::RenderSessionOpts::default(),
    };
    let mut sess = reelwright::RenderSession::new(&script, &cfg, opts)?;

    let mut out = open_output(cli.out.as_deref())?;
    match cli.cmd {
        Command::Info => cmd_info(&sess, &mut out)?,
        Command::Plan => write_json(&mut out, sess.plan())?,
        Command::Frame(args) => {
            let frame = sess.eval_frame(reelwright::FrameIndex(args.frame))?;
            write_json(&mut out, &frame)?;
        }
        Command::Sample(args) => cmd_sample(&sess, args, &mut out)?,
        Command::Audio => write_json(&mut out, &sess.audio_manifest())?,
        Command::Preflight(args) => {
            let root = args.assets_root.unwrap_or_else(|| {
                script_path
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .to_path_buf()
            });
            cmd_preflight(&mut sess, &root, &mut out)?;
        }
    }
    out.flush().context("flush output")?;
    Ok(())
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn std::io::Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(Box::new(BufWriter::new(f)))
}

fn write_json<T: serde::Serialize>(out: &mut dyn std::io::Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("serialize JSON")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_info(sess: &reelwright::RenderSession, out: &mut dyn std::io::Write) -> anyhow::Result<()> {
    let plan = sess.plan();
    let info = &plan.info;
    writeln!(
        out,
        "{} {}x{} @ {}/{} fps, {} frames (computed {})",
        info.id,
        info.canvas.width,
        info.canvas.height,
        info.fps.num,
        info.fps.den,
        info.duration_frames,
        info.computed_frames
    )?;
    match &plan.background.source {
        Some(src) => writeln!(
            out,
            "background {src} offset={} loop={:?}",
            plan.background.offset_frames, plan.background.loop_frames
        )?,
        None => writeln!(out, "background none")?,
    }
    for s in &plan.scenes {
        writeln!(
            out,
            "scene {:>3} [{:>6}, {:>6}) {:>7.3}s timed={} layers={} memes={}",
            s.scene_number,
            s.range.start.0,
            s.range.end.0,
            s.duration_secs,
            s.timed,
            s.layers.len(),
            s.meme_layout
                .map(|m| format!("{m:?}").to_ascii_lowercase())
                .unwrap_or_else(|| "-".to_owned()),
        )?;
    }
    Ok(())
}

fn cmd_sample(
    sess: &reelwright::RenderSession,
    args: SampleArgs,
    out: &mut dyn std::io::Write,
) -> anyhow::Result<()> {
    let end = args.end.unwrap_or_else(|| sess.duration_frames());
    let range = reelwright::FrameRange::new(
        reelwright::FrameIndex(args.start),
        reelwright::FrameIndex(end),
    )?;
    let stats = if args.fingerprints {
        let (fingerprints, stats) = sess.fingerprint_range(range)?;
        for (i, fp) in fingerprints.iter().enumerate() {
            let line = serde_json::json!({
                "frame": range.start.0 + i as u64,
                "fingerprint": fp.to_string(),
            });
            writeln!(out, "{line}")?;
        }
        stats
    } else {
        let (frames, stats) = sess.eval_range(range)?;
        for f in &frames {
            serde_json::to_writer(&mut *out, f).context("serialize frame")?;
            writeln!(out)?;
        }
        stats
    };
    serde_json::to_writer(&mut *out, &stats).context("serialize stats")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_preflight(
    sess: &mut reelwright::RenderSession,
    root: &Path,
    out: &mut dyn std::io::Write,
) -> anyhow::Result<()> {
    let loader = reelwright::FsMediaLoader::new(root);
    let mut reported = Vec::new();
    let failed = sess
        .preflight(&loader, &mut |f: &reelwright::MediaLoadFailure| {
            reported.push(f.clone())
        })
        .len();
    for f in &reported {
        writeln!(out, "failed {:?} {}: {}", f.usage, f.source, f.reason)?;
    }
    writeln!(out, "sources={} failed={failed}", sess.plan().sources().len())?;
    Ok(())
}
