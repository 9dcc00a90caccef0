use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use puredata_compiler::{Node, Patch, PatchDef, RenderOpts, render_with, write_file};

#[derive(Parser, Debug)]
#[command(name = "pdc", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a patch description and write the `.pd` text.
    Build(BuildArgs),
    /// Build a patch description and report its size.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Input patch description JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output `.pd` path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Font size written into the top-level canvas header.
    #[arg(long, default_value_t = 10)]
    font_size: u32,

    /// Open subpatch windows when the patch is loaded.
    #[arg(long, default_value_t = false)]
    open_subpatches: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input patch description JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load(path: &Path) -> anyhow::Result<Patch> {
    let def = PatchDef::from_path(path)?;
    let patch = def
        .build()
        .with_context(|| format!("build patch '{}'", path.display()))?;
    Ok(patch)
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let patch = load(&args.in_path)?;
    let opts = RenderOpts {
        font_size: args.font_size,
        subpatch_open: args.open_subpatches,
        ..RenderOpts::default()
    };
    let text = render_with(&patch, &opts);

    match args.out {
        Some(out) => {
            write_file(&out, &text)?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            std::io::stdout()
                .write_all(text.as_bytes())
                .context("write patch to stdout")?;
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let patch = load(&args.in_path)?;
    let (nodes, connections, subpatches) = count(&patch);
    println!("{nodes} nodes, {connections} connections, {subpatches} subpatches");
    Ok(())
}

fn count(patch: &Patch) -> (usize, usize, usize) {
    let mut totals = (patch.nodes().len(), patch.connections().len(), 0);
    for node in patch.nodes() {
        if let Node::Subpatch(s) = node {
            let (n, c, sp) = count(&s.patch);
            totals.0 += n;
            totals.1 += c;
            totals.2 += sp + 1;
        }
    }
    totals
}
