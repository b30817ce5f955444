use serde::{Deserialize, Serialize};

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::{
    constants::{DEFAULT_MS_PATTERN, DEFAULT_SB_PATH, DEFAULT_SCRIPT_DIR},
    error::PrepError,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SlurmCfg {
    pub partition: String,
    pub clusters: String,
    pub export: String,
    pub account: Option<String>,
    pub split_time: String,
    pub cal_time: String,
    pub sci_time: String,
    pub casa_mem: String,
}

impl Default for SlurmCfg {
    fn default() -> Self {
        SlurmCfg {
            partition: "workq".to_string(),
            clusters: "galaxy".to_string(),
            export: "NONE".to_string(),
            account: None,
            split_time: "02:00:00".to_string(),
            cal_time: "04:00:00".to_string(),
            sci_time: "06:00:00".to_string(),
            casa_mem: "16G".to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MsSplitCfg {
    pub module: String,
    pub bucketsize: usize,
    pub tilenchan: usize,
    pub width: usize,
}

impl Default for MsSplitCfg {
    fn default() -> Self {
        MsSplitCfg {
            module: "askapsoft".to_string(),
            bucketsize: 1048576,
            tilenchan: 54,
            width: 1,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CasaCfg {
    pub module: String,
    pub omp_num_threads: usize,
    pub chanbin: usize,
    pub flux_standard: String,
}

impl Default for CasaCfg {
    fn default() -> Self {
        CasaCfg {
            module: "casa/4.5.0-el5".to_string(),
            omp_num_threads: 1,
            chanbin: 27,
            flux_standard: "Perley-Butler 2010".to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PrepCfg {
    pub sb_path: PathBuf,
    pub script_dir: PathBuf,
    pub ms_pattern: String,
    pub slurm: SlurmCfg,
    pub mssplit: MsSplitCfg,
    pub casa: CasaCfg,
}

impl Default for PrepCfg {
    fn default() -> Self {
        PrepCfg {
            sb_path: PathBuf::from(DEFAULT_SB_PATH),
            script_dir: PathBuf::from(DEFAULT_SCRIPT_DIR),
            ms_pattern: DEFAULT_MS_PATTERN.to_string(),
            slurm: SlurmCfg::default(),
            mssplit: MsSplitCfg::default(),
            casa: CasaCfg::default(),
        }
    }
}

impl PrepCfg {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, PrepError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PrepError::io(path, e))?;
        serde_yaml::from_reader(file).map_err(|source| PrepError::Cfg {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path of a generated file as it is referenced from the run script,
    /// i.e. relative to the working directory.
    pub fn script_path(&self, name: &str) -> PathBuf {
        self.script_dir.join(name)
    }
}
