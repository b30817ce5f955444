use std::path::Path;

// produced by the CASA jobs in the working directory
const CASA_LEFTOVERS: [&str; 2] = ["*.flagversions", "cal_*.B"];
const JOB_LEFTOVERS: [&str; 2] = ["out_*.ms", "slurm*.out"];

/// Removes the split products, the script directory and everything the
/// scheduled jobs leave behind.
pub fn cleanup_script(cal_ms: &[String], sci_ms: &[String], script_dir: &Path) -> String {
    let mut targets: Vec<String> = cal_ms.iter().chain(sci_ms.iter()).cloned().collect();
    targets.extend(CASA_LEFTOVERS.iter().map(|s| s.to_string()));
    targets.push(format!("{}/", script_dir.display()));
    targets.extend(JOB_LEFTOVERS.iter().map(|s| s.to_string()));

    targets
        .iter()
        .map(|t| format!("rm -rf {}\n", t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_products_then_leftovers() {
        let cal = vec!["SB1_a_beam0_cal.ms".to_string(), "SB1_a_beam1_cal.ms".to_string()];
        let sci = vec!["SB2_b_beam0_sci.ms".to_string(), "SB2_b_beam1_sci.ms".to_string()];
        let text = cleanup_script(&cal, &sci, Path::new("slurmfiles"));
        assert_eq!(
            text,
            "rm -rf SB1_a_beam0_cal.ms\n\
             rm -rf SB1_a_beam1_cal.ms\n\
             rm -rf SB2_b_beam0_sci.ms\n\
             rm -rf SB2_b_beam1_sci.ms\n\
             rm -rf *.flagversions\n\
             rm -rf cal_*.B\n\
             rm -rf slurmfiles/\n\
             rm -rf out_*.ms\n\
             rm -rf slurm*.out\n"
        );
    }

    #[test]
    fn no_beams_still_clears_leftovers() {
        let text = cleanup_script(&[], &[], Path::new("jobs"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("rm -rf jobs/\n"));
    }
}
