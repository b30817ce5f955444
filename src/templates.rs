//! Text of the files handed to the scheduler, mssplit and CASA.
//!
//! Every renderer is a pure function of its arguments; writing to disk is
//! done separately by [`write_text`].

use std::{fs, path::Path};

use log::trace;

use crate::{beam::Role, cfg::PrepCfg, error::PrepError};

fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn sbatch_header(cfg: &PrepCfg, time: &str, job_name: &str, mem: Option<&str>) -> Vec<String> {
    let slurm = &cfg.slurm;
    let mut lines = vec![
        "#!/bin/bash -l".to_string(),
        format!("#SBATCH --partition={}", slurm.partition),
        format!("#SBATCH --clusters={}", slurm.clusters),
        format!("#SBATCH --time={}", time),
        "#SBATCH --ntasks=1".to_string(),
        "#SBATCH --ntasks-per-node=1".to_string(),
        format!("#SBATCH --job-name={}", job_name),
        format!("#SBATCH --export={}", slurm.export),
    ];
    if let Some(mem) = mem {
        lines.push(format!("#SBATCH --mem={}", mem));
    }
    if let Some(account) = &slurm.account {
        lines.push(format!("#SBATCH --account={}", account));
    }
    lines
}

pub fn mssplit_config(
    cfg: &PrepCfg,
    beam: usize,
    in_ms: &Path,
    out_ms: &str,
    nchans: usize,
    role: Role,
) -> String {
    let mut lines = vec![
        format!("vis = {}", in_ms.display()),
        format!("outputvis = {}", out_ms),
        format!("stman.bucketsize = {}", cfg.mssplit.bucketsize),
        format!("stman.tilenchan = {}", cfg.mssplit.tilenchan),
    ];
    // calibrator scans are one per beam
    if role == Role::Cal {
        lines.push(format!("scans = [{}]", beam));
    }
    lines.push(format!("beams = [{}]", beam));
    lines.push(format!("channel = 1-{}", nchans));
    lines.push(format!("width = {}", cfg.mssplit.width));
    finish(lines)
}

pub fn mssplit_slurm(cfg: &PrepCfg, config: &Path) -> String {
    let mut lines = sbatch_header(cfg, &cfg.slurm.split_time, "mssplit", None);
    lines.push(String::new());
    lines.push(format!("module load {}", cfg.mssplit.module));
    lines.push(String::new());
    lines.push(format!("aprun -n 1 -N 1 mssplit -c {}", config.display()));
    finish(lines)
}

pub fn casa_slurm(
    cfg: &PrepCfg,
    casa_script: &Path,
    job_name: &str,
    time: &str,
    ms_name: &str,
) -> String {
    let casa_family = cfg.casa.module.split('/').next().unwrap_or("casa");
    let mut lines = sbatch_header(cfg, time, job_name, Some(&cfg.slurm.casa_mem));
    lines.push(String::new());
    lines.push(format!("export OMP_NUM_THREADS={}", cfg.casa.omp_num_threads));
    lines.push(format!("module unload {}", casa_family));
    lines.push(format!("module load {}", cfg.casa.module));
    lines.push("export SCRIPTS=$PWD".to_string());
    lines.push(format!("mkdir out_{}", ms_name));
    lines.push(format!("cd out_{}", ms_name));
    lines.push(String::new());
    lines.push(format!(
        "aprun -b casa -n 1 -N 1 -ss casapy --nogui --nologger --log2term -c $SCRIPTS/{} > mycasalog_X${{SLURM_JOB_ID}}.log",
        casa_script.display()
    ));
    finish(lines)
}

/// Flagging, flux scale and bandpass solve on one calibrator beam.
pub fn casa_cal_script(cfg: &PrepCfg, ms_name: &str) -> String {
    finish(vec![
        "import os".to_string(),
        format!("myms = \"../{}\"", ms_name),
        "soloms = myms.split(\"/\")[-1]".to_string(),
        "beam = soloms.split(\"_\")[3].replace(\"beam\",\"\")".to_string(),
        "caltab = \"cal_\"+soloms+\".B\"".to_string(),
        "os.system(\"ln -s \"+myms+\" .\")".to_string(),
        "flagdata(vis=soloms,mode=\"manual\",autocorr=True)".to_string(),
        "flagdata(vis=soloms,mode=\"rflag\",datacolumn=\"DATA\")".to_string(),
        "flagdata(vis=soloms,mode=\"tfcrop\",datacolumn=\"DATA\")".to_string(),
        format!(
            "setjy(vis=soloms,field=beam,usescratch=True,standard=\"{}\")",
            cfg.casa.flux_standard
        ),
        "bandpass(vis=myms,field=beam,caltable=caltab,solnorm=False)".to_string(),
        "os.system(\"mv \"+caltab+\" ../\")".to_string(),
    ])
}

/// Name of the bandpass table the calibrator script leaves in the working
/// directory for `cal_ms`.
pub fn bandpass_table(cal_ms: &str) -> String {
    format!("cal_{}.B", cal_ms)
}

/// Flagging, bandpass application and per-field averaging of one science beam.
/// `cal_ms` is the calibrator product of the same beam.
pub fn casa_sci_script(cfg: &PrepCfg, ms_name: &str, cal_ms: &str) -> String {
    finish(vec![
        "import os".to_string(),
        "import numpy".to_string(),
        format!("myms = \"../{}\"", ms_name),
        "soloms = myms.split(\"/\")[-1]".to_string(),
        format!("caltab = \"../{}\"", bandpass_table(cal_ms)),
        "os.system(\"ln -s \"+myms+\" .\")".to_string(),
        "flagdata(vis=soloms,mode=\"manual\",autocorr=True)".to_string(),
        "flagdata(vis=soloms,mode=\"rflag\",datacolumn=\"DATA\")".to_string(),
        "flagdata(vis=soloms,mode=\"tfcrop\",datacolumn=\"DATA\")".to_string(),
        "tb.open(soloms+\"/FIELD\")".to_string(),
        "flds = tb.getcol(\"NAME\")".to_string(),
        "tb.done()".to_string(),
        "applycal(vis=soloms,gaintable=caltab,interp=[\"nearest\"])".to_string(),
        "for i in range(0,len(flds)):".to_string(),
        "    opms = soloms.replace(\"_sci\",\"_\"+flds[i]+\"_wtspec\")".to_string(),
        format!(
            "    mstransform(vis=soloms,outputvis=opms,field=str(i),datacolumn=\"corrected\",chanaverage=True,chanbin={},usewtspectrum=True,realmodelcol=True)",
            cfg.casa.chanbin
        ),
    ])
}

pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<(), PrepError> {
    let path = path.as_ref();
    trace!("writing {} ({} bytes)", path.display(), text.len());
    fs::write(path, text).map_err(|e| PrepError::io(path, e))
}
