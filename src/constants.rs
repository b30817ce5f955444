pub const DEFAULT_SB_PATH: &str = "/scratch2/askap/askapops/askap-scheduling-blocks/";
pub const DEFAULT_SCRIPT_DIR: &str = "slurmfiles";
pub const DEFAULT_MS_PATTERN: &str = "20*.ms";

pub const MS_SUFFIX: &str = ".ms";

// sbatch prints "Submitted batch job <id> on cluster <name>"
pub const JOB_ID_FIELD: usize = 4;
