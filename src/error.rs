use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("Error finding unique Measurement Set for SB {sb_id}: {found} matches for {pattern}")]
    DatasetNotUnique {
        sb_id: String,
        pattern: String,
        found: usize,
    },

    #[error("Invalid dataset pattern {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Job {job} depends on {missing}, which is not submitted before it")]
    ForwardReference { job: String, missing: String },

    #[error("Beam {beam} is outside the {nbeams} requested beams")]
    BeamOutOfRange { beam: usize, nbeams: usize },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error when reading config {path}: {source}")]
    Cfg {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl PrepError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepError::Io {
            path: path.into(),
            source,
        }
    }
}
