use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    beam::{casa_job_name, cleanup_script_name, ms_list, run_script_name, BeamProducts, Role},
    cfg::PrepCfg,
    cleanup::cleanup_script,
    dataset::resolve_pair,
    error::PrepError,
    submit::{beam_jobs, JobSubmission, RunScript},
    templates::{
        casa_cal_script, casa_sci_script, casa_slurm, mssplit_config, mssplit_slurm, write_text,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepRequest {
    pub cal_sb: String,
    pub sci_sb: String,
    pub nbeams: usize,
    pub nchans: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedScripts {
    pub run_script: PathBuf,
    pub cleanup_script: PathBuf,
    pub beam_files: Vec<PathBuf>,
}

/// One calibrator/science pair with its datasets resolved and product
/// names derived. Generated paths are relative to `workdir`.
#[derive(Debug)]
pub struct Pipeline {
    cfg: PrepCfg,
    req: PrepRequest,
    workdir: PathBuf,
    cal_ms: PathBuf,
    sci_ms: PathBuf,
    cal_list: Vec<String>,
    sci_list: Vec<String>,
}

impl Pipeline {
    pub fn new<P: AsRef<Path>>(cfg: PrepCfg, req: PrepRequest, workdir: P) -> Result<Self, PrepError> {
        let (cal_ms, sci_ms) = resolve_pair(&cfg, &req.cal_sb, &req.sci_sb)?;
        let cal_list = ms_list(&req.cal_sb, &cal_ms, req.nbeams, Role::Cal);
        let sci_list = ms_list(&req.sci_sb, &sci_ms, req.nbeams, Role::Sci);
        Ok(Pipeline {
            cfg,
            req,
            workdir: workdir.as_ref().to_path_buf(),
            cal_ms,
            sci_ms,
            cal_list,
            sci_list,
        })
    }

    pub fn cal_ms(&self) -> &Path {
        &self.cal_ms
    }

    pub fn sci_ms(&self) -> &Path {
        &self.sci_ms
    }

    pub fn cal_list(&self) -> &[String] {
        &self.cal_list
    }

    pub fn sci_list(&self) -> &[String] {
        &self.sci_list
    }

    pub fn request(&self) -> &PrepRequest {
        &self.req
    }

    pub fn script_dir(&self) -> PathBuf {
        self.workdir.join(&self.cfg.script_dir)
    }

    /// Returns true if the directory had to be created.
    pub fn ensure_script_dir(&self) -> Result<bool, PrepError> {
        let dir = self.script_dir();
        if dir.is_dir() {
            return Ok(false);
        }
        create_dir_all(&dir).map_err(|e| PrepError::io(&dir, e))?;
        Ok(true)
    }

    pub fn products(&self, beam: usize) -> Result<BeamProducts, PrepError> {
        match (self.cal_list.get(beam), self.sci_list.get(beam)) {
            (Some(cal), Some(sci)) => Ok(BeamProducts::derive(
                &self.cfg,
                beam,
                cal.clone(),
                sci.clone(),
            )),
            _ => Err(PrepError::BeamOutOfRange {
                beam,
                nbeams: self.req.nbeams,
            }),
        }
    }

    /// Writes the split configs and job scripts of one beam and returns
    /// the jobs that submit them.
    pub fn write_beam(&self, beam: usize) -> Result<Vec<JobSubmission>, PrepError> {
        let cfg = &self.cfg;
        let p = self.products(beam)?;
        let at = |rel: &PathBuf| self.workdir.join(rel);
        debug!("beam {}: {} / {}", beam, p.cal_ms, p.sci_ms);

        write_text(
            at(&p.cal_split_config),
            &mssplit_config(cfg, beam, &self.cal_ms, &p.cal_ms, self.req.nchans, Role::Cal),
        )?;
        write_text(at(&p.cal_split_slurm), &mssplit_slurm(cfg, &p.cal_split_config))?;

        write_text(
            at(&p.sci_split_config),
            &mssplit_config(cfg, beam, &self.sci_ms, &p.sci_ms, self.req.nchans, Role::Sci),
        )?;
        write_text(at(&p.sci_split_slurm), &mssplit_slurm(cfg, &p.sci_split_config))?;

        write_text(at(&p.cal_casa_script), &casa_cal_script(cfg, &p.cal_ms))?;
        write_text(
            at(&p.cal_casa_slurm),
            &casa_slurm(
                cfg,
                &p.cal_casa_script,
                &casa_job_name(&self.req.cal_sb, Role::Cal),
                &cfg.slurm.cal_time,
                &p.cal_ms,
            ),
        )?;

        write_text(at(&p.sci_casa_script), &casa_sci_script(cfg, &p.sci_ms, &p.cal_ms))?;
        write_text(
            at(&p.sci_casa_slurm),
            &casa_slurm(
                cfg,
                &p.sci_casa_script,
                &casa_job_name(&self.req.sci_sb, Role::Sci),
                &cfg.slurm.sci_time,
                &p.sci_ms,
            ),
        )?;

        Ok(beam_jobs(&p))
    }

    pub fn write_run_script(&self, run: &RunScript) -> Result<PathBuf, PrepError> {
        let path = self
            .workdir
            .join(run_script_name(&self.req.cal_sb, &self.req.sci_sb));
        write_text(&path, &run.render()?)?;
        Ok(path)
    }

    pub fn write_cleanup_script(&self) -> Result<PathBuf, PrepError> {
        let path = self
            .workdir
            .join(cleanup_script_name(&self.req.cal_sb, &self.req.sci_sb));
        write_text(
            &path,
            &cleanup_script(&self.cal_list, &self.sci_list, &self.cfg.script_dir),
        )?;
        Ok(path)
    }

    /// Writes everything. `on_beam` is called after each beam's files are
    /// on disk.
    pub fn run<F: FnMut(usize)>(&self, mut on_beam: F) -> Result<GeneratedScripts, PrepError> {
        if self.ensure_script_dir()? {
            info!("created {}", self.script_dir().display());
        }
        let mut run = RunScript::new();
        let mut beam_files = Vec::new();
        for beam in 0..self.req.nbeams {
            run.extend(self.write_beam(beam)?);
            beam_files.extend(
                self.products(beam)?
                    .files()
                    .iter()
                    .map(|f| self.workdir.join(f)),
            );
            on_beam(beam);
        }
        info!("{} jobs in chain", run.jobs.len());
        Ok(GeneratedScripts {
            run_script: self.write_run_script(&run)?,
            cleanup_script: self.write_cleanup_script()?,
            beam_files,
        })
    }
}
