// src/export.rs

use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

use crate::error::Result;
use crate::history::ObservationTable;
use crate::stations::StationDirectory;

/// Header line, then one line per row.
pub fn write_table_csv<W: Write>(table: &ObservationTable, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_stations_csv<W: Write>(directory: &StationDirectory, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(StationDirectory::COLUMNS)?;
    for rec in directory.iter() {
        wtr.write_record(rec.fields())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Pretty JSON, written to `path`.
pub fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, value)?;
    info!(path = %path.display(), "wrote JSON");
    Ok(())
}

/// Read a table previously written with [`save_json`].
pub fn load_table_json(path: impl AsRef<Path>) -> Result<ObservationTable> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::StationRecord;
    use tempfile::tempdir;

    fn sample() -> ObservationTable {
        ObservationTable::from_parts(
            vec!["Time".into(), "Conditions".into()],
            vec![
                vec!["12:00".into(), "Rain, light".into()],
                vec!["12:05".into(), "Clear".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn table_csv_quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_table_csv(&sample(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Time,Conditions\n12:00,\"Rain, light\"\n12:05,Clear\n"
        );
    }

    #[test]
    fn stations_csv_has_column_header() {
        let dir = StationDirectory {
            records: vec![StationRecord {
                id: "KWASEATT1".into(),
                neighborhood: "Queen Anne".into(),
                city: "Seattle".into(),
                station_type: "Rapid \"Fire\"".into(),
            }],
        };
        let mut buf = Vec::new();
        write_stations_csv(&dir, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "id,neighborhood,city,type\nKWASEATT1,Queen Anne,Seattle,\"Rapid \"\"Fire\"\"\"\n"
        );
    }

    #[test]
    fn json_table_reloads_as_seed() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("seed.json");
        save_json(&sample(), &path).unwrap();
        assert_eq!(load_table_json(&path).unwrap(), sample());
    }
}
