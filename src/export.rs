use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::household::SimulationResult;
use crate::occupancy::{BINS_PER_DAY, MINUTES_PER_BIN};

/// Write the full simulation result as pretty-printed JSON.
pub fn write_json(result: &SimulationResult, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Write one CSV row per ten-minute bin: day, time of day, household state
/// and one column per simulated member.
pub fn write_csv(result: &SimulationResult, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_csv_to(result, &mut writer)?;
    writer.flush()
}

/// CSV rendering of a result into any writer.
pub fn write_csv_to<W: Write>(result: &SimulationResult, writer: &mut W) -> io::Result<()> {
    write!(writer, "bin,day,time,household")?;
    for (i, label) in result.member_labels.iter().enumerate() {
        write!(writer, ",member_{}_{}", i, label)?;
    }
    writeln!(writer)?;

    for (bin, state) in result.occ.states().iter().enumerate() {
        let minute_of_day = (bin % BINS_PER_DAY) * MINUTES_PER_BIN;
        write!(
            writer,
            "{},{},{:02}:{:02},{}",
            bin,
            bin / BINS_PER_DAY,
            minute_of_day / 60,
            minute_of_day % 60,
            state
        )?;
        for member in &result.occ_m {
            write!(writer, ",{}", member.states()[bin])?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::{Chronology, DayCountRule};
    use crate::household::SimulationDiagnostics;
    use crate::occupancy::{merge, YearSeries};
    use std::fs;
    use tempfile::tempdir;

    fn result() -> SimulationResult {
        let chronology = Chronology::build(2013, DayCountRule::Calendar).unwrap();
        let bins = chronology.day_count * BINS_PER_DAY;
        let a = YearSeries::from_states(vec![2; bins]);
        let b = YearSeries::from_states((0..bins).map(|i| if i % 2 == 0 { 1 } else { 3 }).collect());
        SimulationResult {
            household: "h".into(),
            seed: 1,
            chronology,
            occ: merge(&[a.clone(), b.clone()]).unwrap(),
            occ_m: vec![a, b],
            member_labels: vec!["FTE".into(), "Retired".into()],
            weeks: Vec::new(),
            diagnostics: SimulationDiagnostics::default(),
        }
    }

    #[test]
    fn test_csv_layout() {
        let mut out = Vec::new();
        write_csv_to(&result(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 365 * BINS_PER_DAY);
        assert_eq!(lines[0], "bin,day,time,household,member_0_FTE,member_1_Retired");
        assert_eq!(lines[1], "0,0,00:00,1,2,1");
        assert_eq!(lines[2], "1,0,00:10,2,2,3");
        assert_eq!(lines[1 + 145], "145,1,00:10,2,2,3");
    }

    #[test]
    fn test_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("h.json");
        write_json(&result(), &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["household"], "h");
        assert_eq!(value["chronology"]["day_count"], 365);
        assert_eq!(value["occ"]["states"].as_array().unwrap().len(), 365 * BINS_PER_DAY);
        assert_eq!(value["member_labels"][1], "Retired");
    }
}
