use crate::error::IngestError;
use crate::table::RawTable;
use chrono::NaiveDate;
use core_types::{AttributeValue, Fund, ReturnObservation};

/// Source-layout knobs for [`normalize`]. The defaults match the Morningstar
/// export the system was built around; the configuration crate overrides them
/// from `config.toml`.
#[derive(Debug, Clone)]
pub struct NormalizerOptions {
    /// The static column holding the fund name. Rows are identified by it and
    /// the whole source is rejected if it is absent.
    pub name_column: String,
    /// Rows whose name cell equals this marker are section dividers, not
    /// funds, and are dropped from both output tables.
    pub sentinel: String,
    /// `chrono` format string for the date-column headers.
    pub date_format: String,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            name_column: "Group/Investment".to_string(),
            sentinel: "Local Funds".to_string(),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

/// How a source column participates in normalization.
#[derive(Debug, Clone)]
enum Column {
    /// A fund attribute column, keyed by its second-row header.
    Static { index: usize, name: String },
    /// A monthly return column, keyed by the date parsed from its first-row
    /// header.
    Date { index: usize, date: NaiveDate },
}

/// Normalizes a two-header-row table into the fund table and the long-format
/// return table.
///
/// Rows whose name cell is blank or equals the sentinel are dropped before
/// `fund_id` assignment, so ids are always exactly `1..=N` over the retained
/// rows. Returns are emitted only for non-blank cells and come back sorted by
/// `(fund_id, date)`.
pub fn normalize(
    table: &RawTable,
    options: &NormalizerOptions,
) -> Result<(Vec<Fund>, Vec<ReturnObservation>), IngestError> {
    if table.row_count() < 2 {
        return Err(IngestError::MissingHeaderRows(table.row_count()));
    }

    let columns = classify_columns(table, options)?;

    let name_index = columns
        .iter()
        .find_map(|col| match col {
            Column::Static { index, name } if name == &options.name_column => Some(*index),
            _ => None,
        })
        .ok_or_else(|| IngestError::MissingNameColumn(options.name_column.clone()))?;

    let mut funds = Vec::new();
    let mut observations = Vec::new();

    for row in 2..table.row_count() {
        let Some(name) = table.cell(row, name_index) else {
            continue;
        };
        if name == options.sentinel {
            continue;
        }

        let fund_id = funds.len() as u32 + 1;
        let mut fund = Fund::new(fund_id, name);

        for column in &columns {
            match column {
                Column::Static { index, name } => {
                    if *index == name_index {
                        continue;
                    }
                    if let Some(raw) = table.cell(row, *index) {
                        assign_attribute(&mut fund, name, raw);
                    }
                }
                Column::Date { index, date } => {
                    let Some(raw) = table.cell(row, *index) else {
                        continue;
                    };
                    let value: f64 =
                        raw.parse()
                            .ok()
                            .filter(|v: &f64| v.is_finite())
                            .ok_or_else(|| IngestError::InvalidNumericCell {
                                row: row - 1,
                                column: date.format("%d/%m/%Y").to_string(),
                                value: raw.to_string(),
                            })?;
                    observations.push(ReturnObservation {
                        fund_id,
                        date: *date,
                        monthly_return: value,
                    });
                }
            }
        }

        funds.push(fund);
    }

    // Date columns can appear in any order in the export; consumers rely on
    // (fund_id, date) ascending.
    observations.sort_by_key(|obs| (obs.fund_id, obs.date));

    tracing::info!(
        funds = funds.len(),
        observations = observations.len(),
        "normalized source table"
    );

    Ok((funds, observations))
}

/// Splits the header into static and date columns.
///
/// A column is static when its first-row header is blank (pandas-style
/// `Unnamed:` markers from the original export count as blank); anything else
/// must parse as a date or the source is structurally broken.
fn classify_columns(
    table: &RawTable,
    options: &NormalizerOptions,
) -> Result<Vec<Column>, IngestError> {
    let mut columns = Vec::new();

    for index in 0..table.column_count() {
        let first = table.cell(0, index);
        let is_static = match first {
            None => true,
            Some(value) => value.starts_with("Unnamed"),
        };

        if is_static {
            // A static column without a field name is unaddressable; skip it.
            if let Some(name) = table.cell(1, index) {
                columns.push(Column::Static {
                    index,
                    name: name.to_string(),
                });
            }
        } else {
            let value = first.unwrap_or_default();
            let date = NaiveDate::parse_from_str(value, &options.date_format).map_err(|_| {
                IngestError::InvalidDateHeader {
                    column: index,
                    value: value.to_string(),
                    format: options.date_format.clone(),
                }
            })?;
            columns.push(Column::Date { index, date });
        }
    }

    Ok(columns)
}

/// Routes a static cell to its typed `Fund` field, falling back to the `extra`
/// map for unrecognized headers or cells that fail the field's expected type.
fn assign_attribute(fund: &mut Fund, header: &str, raw: &str) {
    match header {
        "ISIN" => fund.isin = Some(raw.to_string()),
        "Firm Name" => fund.firm_name = Some(raw.to_string()),
        "Morningstar Category" => fund.category = Some(raw.to_string()),
        "ASISA Sector (South Africa)" => fund.sector = Some(raw.to_string()),
        "Investment Area" => fund.investment_area = Some(raw.to_string()),
        "Morningstar Rating Overall" => match raw.trim().parse::<i64>() {
            Ok(rating) => fund.rating = Some(rating),
            Err(_) => {
                fund.extra
                    .insert(header.to_string(), AttributeValue::Text(raw.to_string()));
            }
        },
        "Management Fee" => match parse_fee(raw) {
            Some(fee) => fund.management_fee = Some(fee),
            None => {
                fund.extra
                    .insert(header.to_string(), AttributeValue::Text(raw.to_string()));
            }
        },
        "Performance Fee" => match parse_fee(raw) {
            Some(fee) => fund.performance_fee = Some(fee),
            None => {
                fund.extra
                    .insert(header.to_string(), AttributeValue::Text(raw.to_string()));
            }
        },
        _ => {
            fund.extra
                .insert(header.to_string(), AttributeValue::parse(raw));
        }
    }
}

fn parse_fee(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::read_raw_table;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(source: &str) -> Result<(Vec<Fund>, Vec<ReturnObservation>), IngestError> {
        let table = read_raw_table(source.as_bytes(), 0).unwrap();
        normalize(&table, &NormalizerOptions::default())
    }

    const SOURCE: &str = "\
,,31/01/2024,29/02/2024\n\
Group/Investment,Morningstar Category,,\n\
Local Funds,,,\n\
Alpha Fund,ZA Equity,1.5,-0.8\n\
Beta Fund,ZA Bond,,2.1\n";

    #[test]
    fn normalizes_funds_and_returns() {
        let (funds, observations) = parse(SOURCE).unwrap();

        assert_eq!(funds.len(), 2);
        assert_eq!(funds[0].fund_id, 1);
        assert_eq!(funds[0].fund_name, "Alpha Fund");
        assert_eq!(funds[0].category.as_deref(), Some("ZA Equity"));
        assert_eq!(funds[1].fund_id, 2);
        assert_eq!(funds[1].fund_name, "Beta Fund");

        // Beta's blank January cell emits nothing.
        assert_eq!(observations.len(), 3);
        assert_eq!(
            observations[0],
            ReturnObservation {
                fund_id: 1,
                date: date(2024, 1, 31),
                monthly_return: 1.5
            }
        );
        assert_eq!(observations[2].fund_id, 2);
        assert_eq!(observations[2].date, date(2024, 2, 29));
    }

    #[test]
    fn sentinel_row_is_dropped_and_consumes_no_fund_id() {
        let (funds, observations) = parse(SOURCE).unwrap();
        assert!(funds.iter().all(|f| f.fund_name != "Local Funds"));
        let ids: Vec<u32> = funds.iter().map(|f| f.fund_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(observations.iter().all(|o| o.fund_id <= 2));
    }

    #[test]
    fn blank_name_row_is_dropped() {
        let source = "\
,,31/01/2024\n\
Group/Investment,Morningstar Category,\n\
,Orphan Category,9.9\n\
Alpha Fund,ZA Equity,1.0\n";
        let (funds, observations) = parse(source).unwrap();
        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].fund_id, 1);
        assert_eq!(observations.len(), 1);
    }

    #[test]
    fn missing_name_column_is_a_schema_error() {
        let source = "\
,,31/01/2024\n\
Name,Category,\n\
Alpha Fund,ZA Equity,1.0\n";
        let err = parse(source).unwrap_err();
        assert!(matches!(err, IngestError::MissingNameColumn(ref c) if c == "Group/Investment"));
    }

    #[test]
    fn unparsable_date_header_is_a_schema_error() {
        let source = "\
,,January 2024\n\
Group/Investment,Morningstar Category,\n\
Alpha Fund,ZA Equity,1.0\n";
        let err = parse(source).unwrap_err();
        assert!(matches!(err, IngestError::InvalidDateHeader { column: 2, .. }));
    }

    #[test]
    fn non_numeric_return_cell_aborts() {
        let source = "\
,,31/01/2024\n\
Group/Investment,Morningstar Category,\n\
Alpha Fund,ZA Equity,n/a\n";
        let err = parse(source).unwrap_err();
        assert!(matches!(err, IngestError::InvalidNumericCell { .. }));
    }

    #[test]
    fn source_with_only_headers_yields_empty_tables() {
        let source = "\
,,31/01/2024\n\
Group/Investment,Morningstar Category,\n";
        let (funds, observations) = parse(source).unwrap();
        assert!(funds.is_empty());
        assert!(observations.is_empty());
    }

    #[test]
    fn observations_are_sorted_even_when_date_columns_are_not() {
        let source = "\
,,29/02/2024,31/01/2024\n\
Group/Investment,Morningstar Category,,\n\
Alpha Fund,ZA Equity,2.0,1.0\n";
        let (_, observations) = parse(source).unwrap();
        let dates: Vec<NaiveDate> = observations.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 2, 29)]);
    }

    #[test]
    fn known_attributes_fill_typed_fields_and_rest_goes_to_extra() {
        let source = "\
,,,,,31/01/2024\n\
Group/Investment,ISIN,Management Fee,Morningstar Rating Overall,Base Currency,\n\
Alpha Fund,ZAE000001,1.25,4,ZAR,0.5\n";
        let (funds, _) = parse(source).unwrap();
        let fund = &funds[0];
        assert_eq!(fund.isin.as_deref(), Some("ZAE000001"));
        assert_eq!(fund.management_fee, Some(1.25));
        assert_eq!(fund.rating, Some(4));
        assert_eq!(
            fund.extra.get("Base Currency"),
            Some(&AttributeValue::Text("ZAR".to_string()))
        );
    }

    #[test]
    fn unnamed_marker_counts_as_blank_first_header() {
        let source = "\
Unnamed: 0_level_0,Unnamed: 1_level_0,31/01/2024\n\
Group/Investment,Morningstar Category,\n\
Alpha Fund,ZA Equity,1.0\n";
        let (funds, observations) = parse(source).unwrap();
        assert_eq!(funds.len(), 1);
        assert_eq!(observations.len(), 1);
    }
}
