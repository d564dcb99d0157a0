//! CSV export of production plans.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Error;
use crate::plan::Plan;

/// Leading columns; one column per exported plant follows.
const HEADER: [&str; 2] = ["timestep", "duration_min"];

/// Exports a plan to a CSV file at the given path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created and [`Error::Csv`]
/// if writing fails.
pub fn export_plan_csv(plan: &Plan, path: &Path) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_plan_csv(plan, io::BufWriter::new(file))
}

/// Writes a plan as CSV to any writer.
///
/// Writes a header row followed by one row per timestep. Plant columns are
/// those of [`Plan::plant_ids`], matching the JSON export. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns [`Error::Csv`] if writing fails.
pub fn write_plan_csv(plan: &Plan, writer: impl Write) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    let plant_ids = plan.plant_ids();

    // Header
    let header = HEADER.iter().copied().chain(plant_ids.iter().map(String::as_str));
    wtr.write_record(header)?;

    // Data rows
    for (t, duration) in plan.timeline().future_durations().iter().enumerate() {
        let mut record = vec![t.to_string(), duration.to_string()];
        record.extend(
            plant_ids
                .iter()
                .map(|id| format!("{:.4}", plan.get_production(t, id))),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Timeline;

    fn make_plan() -> Plan {
        let mut plan = Plan::new(&Timeline::new(vec![10, 30, 60]));
        for t in 0..3 {
            plan.set_production(t, "P1", t as f64 + 1.0).unwrap();
        }
        plan.set_production(0, "P0", 0.5).unwrap();
        plan
    }

    #[test]
    fn header_lists_plants_in_order() {
        let mut buf = Vec::new();
        write_plan_csv(&make_plan(), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output.lines().next(), Some("timestep,duration_min,P0,P1"));
    }

    #[test]
    fn row_count_matches_timeline() {
        let mut buf = Vec::new();
        write_plan_csv(&make_plan(), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        // 1 header + 3 data rows
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "0,10,0.5000,1.0000");
        assert_eq!(lines[3], "2,60,0.0000,3.0000");
    }

    #[test]
    fn deterministic_output() {
        let plan = make_plan();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_plan_csv(&plan, &mut buf1).unwrap();
        write_plan_csv(&plan, &mut buf2).unwrap();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn rows_parse_back() {
        let mut buf = Vec::new();
        write_plan_csv(&make_plan(), &mut buf).unwrap();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(4));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.unwrap();
            for i in 2..4 {
                let val: Result<f64, _> = rec[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }

    #[test]
    fn empty_plan_has_only_leading_columns() {
        let plan = Plan::new(&Timeline::new(vec![15]));
        let mut buf = Vec::new();
        write_plan_csv(&plan, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "timestep,duration_min\n0,15\n");
    }
}
