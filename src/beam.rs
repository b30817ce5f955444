use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{cfg::PrepCfg, constants::MS_SUFFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Cal,
    Sci,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Cal => "cal",
            Role::Sci => "sci",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shell variable holding the scheduler id of one submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn cal_split(beam: usize) -> Self {
        JobId(format!("CAL_SPLIT_BEAM{}_ID", beam))
    }

    pub fn sci_split(beam: usize) -> Self {
        JobId(format!("SCI_SPLIT_BEAM{}_ID", beam))
    }

    pub fn cal_casa(beam: usize) -> Self {
        JobId(format!("CAL_CASA1_BEAM{}_ID", beam))
    }

    pub fn sci_casa(beam: usize) -> Self {
        JobId(format!("SCI_CASA2_BEAM{}_ID", beam))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `SB<sb_id>_<dataset>` with every `.ms` in the dataset name replaced by
/// `_beam<beam>_<role>.ms`.
pub fn split_ms_name(sb_id: &str, dataset: &Path, beam: usize, role: Role) -> String {
    let base = dataset
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "SB{}_{}",
        sb_id,
        base.replace(MS_SUFFIX, &format!("_beam{}_{}{}", beam, role, MS_SUFFIX))
    )
}

pub fn ms_list(sb_id: &str, dataset: &Path, nbeams: usize, role: Role) -> Vec<String> {
    (0..nbeams)
        .map(|beam| split_ms_name(sb_id, dataset, beam, role))
        .collect()
}

pub fn run_script_name(cal_sb: &str, sci_sb: &str) -> String {
    format!("submit_cal{}_sci{}.sh", cal_sb, sci_sb)
}

pub fn cleanup_script_name(cal_sb: &str, sci_sb: &str) -> String {
    format!("cleanup_cal{}_sci{}.sh", cal_sb, sci_sb)
}

pub fn casa_job_name(sb_id: &str, role: Role) -> String {
    match role {
        Role::Cal => format!("proc_cal_{}", sb_id),
        Role::Sci => format!("cal_sci_{}", sb_id),
    }
}

/// Every name generated for a single beam.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamProducts {
    pub beam: usize,
    pub cal_ms: String,
    pub sci_ms: String,
    pub cal_split_slurm: PathBuf,
    pub cal_split_config: PathBuf,
    pub sci_split_slurm: PathBuf,
    pub sci_split_config: PathBuf,
    pub cal_casa_script: PathBuf,
    pub cal_casa_slurm: PathBuf,
    pub sci_casa_script: PathBuf,
    pub sci_casa_slurm: PathBuf,
}

impl BeamProducts {
    pub fn derive(cfg: &PrepCfg, beam: usize, cal_ms: String, sci_ms: String) -> Self {
        let p = |name: String| cfg.script_path(&name);
        BeamProducts {
            beam,
            cal_ms,
            sci_ms,
            cal_split_slurm: p(format!("split_cal_beam{}.slurm", beam)),
            cal_split_config: p(format!("config_split_cal_beam{}.in", beam)),
            sci_split_slurm: p(format!("split_sci_beam{}.slurm", beam)),
            sci_split_config: p(format!("config_split_sci_beam{}.in", beam)),
            cal_casa_script: p(format!("casa_cal_1_beam{}.py", beam)),
            cal_casa_slurm: p(format!("cal_1_beam{}.slurm", beam)),
            sci_casa_script: p(format!("casa_sci_2_beam{}.py", beam)),
            sci_casa_slurm: p(format!("sci_2_beam{}.slurm", beam)),
        }
    }

    pub fn files(&self) -> [&PathBuf; 8] {
        [
            &self.cal_split_slurm,
            &self.cal_split_config,
            &self.sci_split_slurm,
            &self.sci_split_config,
            &self.cal_casa_script,
            &self.cal_casa_slurm,
            &self.sci_casa_script,
            &self.sci_casa_slurm,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_name_follows_sb_and_beam() {
        let ms = Path::new("/sbs/1234/2016-11-15_101010.ms");
        assert_eq!(
            split_ms_name("1234", ms, 0, Role::Cal),
            "SB1234_2016-11-15_101010_beam0_cal.ms"
        );
        assert_eq!(
            split_ms_name("5678", ms, 35, Role::Sci),
            "SB5678_2016-11-15_101010_beam35_sci.ms"
        );
    }

    #[test]
    fn every_ms_token_is_replaced() {
        let ms = Path::new("2016.msx.ms");
        assert_eq!(
            split_ms_name("1", ms, 2, Role::Sci),
            "SB1_2016_beam2_sci.msx_beam2_sci.ms"
        );
    }

    #[test]
    fn lists_cover_every_beam_in_order() {
        let ms = Path::new("2016-01-01.ms");
        let list = ms_list("9", ms, 3, Role::Cal);
        assert_eq!(
            list,
            vec![
                "SB9_2016-01-01_beam0_cal.ms",
                "SB9_2016-01-01_beam1_cal.ms",
                "SB9_2016-01-01_beam2_cal.ms",
            ]
        );
        assert!(ms_list("9", ms, 0, Role::Cal).is_empty());
    }

    #[test]
    fn products_are_deterministic() {
        let cfg = PrepCfg::default();
        let a = BeamProducts::derive(&cfg, 7, "c".into(), "s".into());
        let b = BeamProducts::derive(&cfg, 7, "c".into(), "s".into());
        assert_eq!(a, b);
        assert_eq!(a.sci_casa_slurm, PathBuf::from("slurmfiles/sci_2_beam7.slurm"));
        assert_eq!(
            a.cal_split_config,
            PathBuf::from("slurmfiles/config_split_cal_beam7.in")
        );
    }

    #[test]
    fn job_ids_and_script_names() {
        assert_eq!(JobId::sci_casa(3).as_str(), "SCI_CASA2_BEAM3_ID");
        assert_eq!(JobId::cal_split(0).to_string(), "CAL_SPLIT_BEAM0_ID");
        assert_eq!(run_script_name("10", "11"), "submit_cal10_sci11.sh");
        assert_eq!(cleanup_script_name("10", "11"), "cleanup_cal10_sci11.sh");
        assert_eq!(casa_job_name("10", Role::Cal), "proc_cal_10");
        assert_eq!(casa_job_name("11", Role::Sci), "cal_sci_11");
    }
}
