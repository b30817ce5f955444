use std::{collections::HashSet, path::PathBuf};

use crate::{
    beam::{BeamProducts, JobId},
    constants::JOB_ID_FIELD,
    error::PrepError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct JobSubmission {
    pub id: JobId,
    pub depends_on: Vec<JobId>,
    pub script: PathBuf,
    pub args: Vec<String>,
}

impl JobSubmission {
    pub fn render(&self) -> String {
        let mut cmd = String::from("sbatch ");
        if !self.depends_on.is_empty() {
            let deps: Vec<_> = self
                .depends_on
                .iter()
                .map(|d| format!("${{{}}}", d))
                .collect();
            cmd.push_str(&format!("-d afterok:{} ", deps.join(":")));
        }
        cmd.push_str(&self.script.display().to_string());
        for a in &self.args {
            cmd.push(' ');
            cmd.push_str(a);
        }
        format!(
            "{}=`{} | awk '{{print ${}}}'`",
            self.id, cmd, JOB_ID_FIELD
        )
    }
}

/// The four jobs of one beam, in submission order.
pub fn beam_jobs(products: &BeamProducts) -> Vec<JobSubmission> {
    let beam = products.beam;
    vec![
        JobSubmission {
            id: JobId::cal_split(beam),
            depends_on: vec![],
            script: products.cal_split_slurm.clone(),
            args: vec![],
        },
        JobSubmission {
            id: JobId::sci_split(beam),
            depends_on: vec![],
            script: products.sci_split_slurm.clone(),
            args: vec![],
        },
        JobSubmission {
            id: JobId::cal_casa(beam),
            depends_on: vec![JobId::cal_split(beam)],
            script: products.cal_casa_slurm.clone(),
            args: vec![products.cal_ms.clone()],
        },
        JobSubmission {
            id: JobId::sci_casa(beam),
            depends_on: vec![JobId::sci_split(beam), JobId::cal_casa(beam)],
            script: products.sci_casa_slurm.clone(),
            args: vec![products.sci_ms.clone()],
        },
    ]
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunScript {
    pub jobs: Vec<JobSubmission>,
}

impl RunScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = JobSubmission>>(&mut self, jobs: I) {
        self.jobs.extend(jobs);
    }

    /// Every dependency must name a job submitted earlier in the script.
    pub fn validate(&self) -> Result<(), PrepError> {
        let mut defined: HashSet<&JobId> = HashSet::new();
        for job in &self.jobs {
            if let Some(missing) = job.depends_on.iter().find(|d| !defined.contains(*d)) {
                return Err(PrepError::ForwardReference {
                    job: job.id.to_string(),
                    missing: missing.to_string(),
                });
            }
            defined.insert(&job.id);
        }
        Ok(())
    }

    pub fn render(&self) -> Result<String, PrepError> {
        self.validate()?;
        Ok(self
            .jobs
            .iter()
            .map(|j| j.render() + "\n")
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cfg::PrepCfg;

    fn products(beam: usize) -> BeamProducts {
        BeamProducts::derive(
            &PrepCfg::default(),
            beam,
            format!("SB1_x_beam{}_cal.ms", beam),
            format!("SB2_x_beam{}_sci.ms", beam),
        )
    }

    #[test]
    fn split_job_has_no_dependency() {
        let jobs = beam_jobs(&products(0));
        assert_eq!(
            jobs[0].render(),
            "CAL_SPLIT_BEAM0_ID=`sbatch slurmfiles/split_cal_beam0.slurm | awk '{print $4}'`"
        );
    }

    #[test]
    fn science_casa_waits_for_split_and_bandpass() {
        let jobs = beam_jobs(&products(3));
        assert_eq!(
            jobs[2].render(),
            "CAL_CASA1_BEAM3_ID=`sbatch -d afterok:${CAL_SPLIT_BEAM3_ID} slurmfiles/cal_1_beam3.slurm SB1_x_beam3_cal.ms | awk '{print $4}'`"
        );
        assert_eq!(
            jobs[3].render(),
            "SCI_CASA2_BEAM3_ID=`sbatch -d afterok:${SCI_SPLIT_BEAM3_ID}:${CAL_CASA1_BEAM3_ID} slurmfiles/sci_2_beam3.slurm SB2_x_beam3_sci.ms | awk '{print $4}'`"
        );
    }

    #[test]
    fn generated_chain_has_no_forward_reference() {
        let mut run = RunScript::new();
        for beam in 0..4 {
            run.extend(beam_jobs(&products(beam)));
        }
        assert!(run.validate().is_ok());
        let text = run.render().unwrap();
        assert_eq!(text.lines().count(), 16);
        assert!(text.ends_with("| awk '{print $4}'`\n"));
    }

    #[test]
    fn reordered_chain_is_rejected() {
        let mut jobs = beam_jobs(&products(0));
        jobs.swap(0, 2);
        let run = RunScript { jobs };
        match run.render() {
            Err(PrepError::ForwardReference { job, missing }) => {
                assert_eq!(job, "CAL_CASA1_BEAM0_ID");
                assert_eq!(missing, "CAL_SPLIT_BEAM0_ID");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn self_reference_is_rejected() {
        let run = RunScript {
            jobs: vec![JobSubmission {
                id: JobId::cal_split(0),
                depends_on: vec![JobId::cal_split(0)],
                script: PathBuf::from("a.slurm"),
                args: vec![],
            }],
        };
        assert!(run.validate().is_err());
    }
}
