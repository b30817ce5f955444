use prepcont::{
    cfg::PrepCfg,
    error::PrepError,
    pipeline::{Pipeline, PrepRequest},
};

use std::path::PathBuf;

use clap::Parser;

use log::{debug, info};

use progress_bar::*;

/// Writes the SLURM job chain that splits, calibrates and averages the
/// per-beam Measurement Sets of a calibrator/science SB pair.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(value_name("CAL_SB"))]
    cal_sb: String,

    #[clap(value_name("SCI_SB"))]
    sci_sb: String,

    #[clap(value_name("NBEAMS"))]
    nbeams: usize,

    #[clap(value_name("NCHANNELS"))]
    nchans: usize,

    #[clap(short('c'), long("cfg"), value_name("config file"))]
    cfg: Option<PathBuf>,

    #[clap(short('w'), long("workdir"), value_name("dir"), default_value("."))]
    workdir: PathBuf,

    #[clap(long("sb-path"), value_name("scheduling block root"))]
    sb_path: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), PrepError> {
    let mut cfg = match &args.cfg {
        Some(path) => PrepCfg::from_yaml_file(path)?,
        None => PrepCfg::default(),
    };
    if let Some(sb_path) = args.sb_path {
        cfg.sb_path = sb_path;
    }
    debug!("{:?}", cfg);

    println!();
    println!("Calibration SB:      {}", args.cal_sb);
    println!("Science target SB:   {}", args.sci_sb);
    println!("Number of beams:     {}", args.nbeams);
    println!("Number of channels:  {}", args.nchans);

    let req = PrepRequest {
        cal_sb: args.cal_sb,
        sci_sb: args.sci_sb,
        nbeams: args.nbeams,
        nchans: args.nchans,
    };
    let pipeline = Pipeline::new(cfg, req, &args.workdir)?;

    println!();
    println!("Found cal MS:        {}", pipeline.cal_ms().display());
    println!("Found target MS:     {}", pipeline.sci_ms().display());
    println!();

    if pipeline.ensure_script_dir()? {
        println!("Creating folder:     {}", pipeline.script_dir().display());
    } else {
        println!("Script folder:       {}", pipeline.script_dir().display());
    }
    println!();

    let nbeams = pipeline.request().nbeams;
    if nbeams > 0 {
        init_progress_bar(nbeams);
        set_progress_bar_action("Writing", Color::Blue, Style::Bold);
    }
    let out = pipeline.run(|_| inc_progress_bar())?;
    if nbeams > 0 {
        finalize_progress_bar();
    }
    info!("{} beam files written", out.beam_files.len());

    println!("Submission script:   {}", out.run_script.display());
    println!("Cleanup script:      {}", out.cleanup_script.display());
    println!();
    Ok(())
}

fn main() {
    env_logger::try_init().unwrap_or(());
    let args = Args::parse();

    if let Err(e) = run(args) {
        debug!("{:?}", e);
        eprintln!();
        eprintln!("{}", e);
        eprintln!();
        std::process::exit(-1);
    }
}
