// src/stations/extract.rs

use tracing::trace;

use super::StationRecord;
use crate::error::ExtractFault;

/// Turns the rendered markup of one directory row into a record.
pub trait RowExtractor {
    fn extract(&self, row_markup: &str) -> Result<StationRecord, ExtractFault>;
}

const ID_MARKER: &str = "ID=";
const CELL_MARKER: &str = "<td>";
const TYPE_MARKER: &str = "station-type\">";
const QUOTE: &str = "\"";
const NBSP: &str = "&nbsp;";

/// The directory page's fixed layout: one cell per line, in the order
/// id link, neighborhood, city, station type. Line 0 is the `<tr>` itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalRowExtractor;

impl RowExtractor for PositionalRowExtractor {
    fn extract(&self, row_markup: &str) -> Result<StationRecord, ExtractFault> {
        let lines: Vec<&str> = row_markup.lines().collect();
        let line = |index: usize| {
            lines.get(index).copied().ok_or(ExtractFault::MissingLine {
                index,
                found: lines.len(),
            })
        };

        let id = until(after(line(1)?, ID_MARKER, 1)?, QUOTE, 1)?;
        let neighborhood = until_nbsp(after(line(2)?, CELL_MARKER, 2)?, 2)?;
        let city = until_nbsp(after(line(3)?, CELL_MARKER, 3)?, 3)?;
        let station_type = until_nbsp(after(line(4)?, TYPE_MARKER, 4)?, 4)?;

        let record = StationRecord {
            id: id.trim().to_string(),
            neighborhood: neighborhood.trim().to_string(),
            city: city.trim().to_string(),
            station_type: station_type.trim().to_string(),
        };
        trace!(?record, "extracted station row");
        Ok(record)
    }
}

/// Text following the first `marker` on `s`.
fn after<'a>(s: &'a str, marker: &'static str, line: usize) -> Result<&'a str, ExtractFault> {
    s.find(marker)
        .map(|i| &s[i + marker.len()..])
        .ok_or(ExtractFault::MissingMarker { line, marker })
}

/// Text before the first `stop` on `s`.
fn until<'a>(s: &'a str, stop: &'static str, line: usize) -> Result<&'a str, ExtractFault> {
    s.find(stop)
        .map(|i| &s[..i])
        .ok_or(ExtractFault::MissingMarker { line, marker: stop })
}

/// Text before the first non-breaking space, either raw or as `&nbsp;`.
fn until_nbsp(s: &str, line: usize) -> Result<&str, ExtractFault> {
    let raw = s.find('\u{a0}');
    let entity = s.find(NBSP);
    match (raw, entity) {
        (Some(a), Some(b)) => Ok(&s[..a.min(b)]),
        (Some(i), None) | (None, Some(i)) => Ok(&s[..i]),
        (None, None) => Err(ExtractFault::MissingMarker { line, marker: NBSP }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "<tr>\n\
        <td><a href=\"/weatherstation/WXDailyHistory.asp?ID=KWASEATT1\">KWASEATT1</a></td>\n\
        <td>  Queen Anne&nbsp;</td>\n\
        <td>Seattle\u{a0}</td>\n\
        <td class=\"station-type\">Rapid Fire&nbsp;</td>\n\
        </tr>";

    #[test]
    fn extracts_four_trimmed_fields() {
        let rec = PositionalRowExtractor.extract(ROW).unwrap();
        assert_eq!(rec.id, "KWASEATT1");
        assert_eq!(rec.neighborhood, "Queen Anne");
        assert_eq!(rec.city, "Seattle");
        assert_eq!(rec.station_type, "Rapid Fire");
    }

    #[test]
    fn missing_id_marker_is_a_fault() {
        let row = ROW.replace("ID=", "STATION=");
        assert_eq!(
            PositionalRowExtractor.extract(&row).unwrap_err(),
            ExtractFault::MissingMarker {
                line: 1,
                marker: "ID="
            }
        );
    }

    #[test]
    fn short_row_is_a_fault() {
        let row = "<tr>\n<td><a href=\"?ID=K1\">K1</a></td>\n<td>X&nbsp;</td>";
        assert_eq!(
            PositionalRowExtractor.extract(row).unwrap_err(),
            ExtractFault::MissingLine { index: 3, found: 3 }
        );
    }

    #[test]
    fn nbsp_stops_at_whichever_form_comes_first() {
        assert_eq!(until_nbsp("a\u{a0}b&nbsp;c", 2), Ok("a"));
        assert_eq!(until_nbsp("a&nbsp;b\u{a0}c", 2), Ok("a"));
    }

    fn fault_for(from: &str, to: &str) -> ExtractFault {
        let row = ROW.replacen(from, to, 1);
        PositionalRowExtractor.extract(&row).unwrap_err()
    }

    #[test]
    fn missing_cell_marker_on_neighborhood_line() {
        assert_eq!(
            fault_for("<td>  Queen", "<th>  Queen"),
            ExtractFault::MissingMarker { line: 2, marker: "<td>" }
        );
    }

    #[test]
    fn missing_cell_marker_on_city_line() {
        assert_eq!(
            fault_for("<td>Seattle", "<td class=\"city\">Seattle"),
            ExtractFault::MissingMarker { line: 3, marker: "<td>" }
        );
    }

    #[test]
    fn missing_station_type_marker() {
        assert_eq!(
            fault_for("station-type", "station-kind"),
            ExtractFault::MissingMarker {
                line: 4,
                marker: "station-type\">"
            }
        );
    }

    #[test]
    fn missing_nbsp_is_a_fault_not_a_longer_field() {
        assert_eq!(
            fault_for("Seattle\u{a0}", "Seattle\u{fffd}"),
            ExtractFault::MissingMarker { line: 3, marker: "&nbsp;" }
        );
        assert_eq!(
            fault_for("Rapid Fire&nbsp;", "Rapid Fire"),
            ExtractFault::MissingMarker { line: 4, marker: "&nbsp;" }
        );
    }

    #[test]
    fn unterminated_id_is_a_fault() {
        let row = "<tr>\n<td>ID=K1</td>\n<td>N&nbsp;</td>\n<td>C&nbsp;</td>\n<td class=\"station-type\">T&nbsp;</td>";
        assert_eq!(
            PositionalRowExtractor.extract(row).unwrap_err(),
            ExtractFault::MissingMarker { line: 1, marker: "\"" }
        );
    }
}
