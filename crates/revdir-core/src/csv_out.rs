//! CSV emission for scraped listing records.
//!
//! The column set is fixed and matches the files the downstream consumers
//! already ingest. Missing fields are rendered as a literal `N/A` rather than
//! an empty cell; the trailing `Other Details` column is a constant
//! placeholder kept for format compatibility.

use std::io::Write;
use std::path::Path;

use crate::record::ListingRecord;
use crate::OutputError;

/// Sentinel written for any absent field.
pub const NOT_AVAILABLE: &str = "N/A";

const HEADER: [&str; 5] = [
    "Company Name/Product Name",
    "Average Rating",
    "Review Count",
    "Website URL",
    "Other Details",
];

/// Writes the header row plus one data row per record to `writer`.
///
/// Rows are written in slice order, which for driver output is discovery
/// order (page order, then in-page order).
///
/// # Errors
///
/// Returns [`OutputError`] if CSV serialization or the underlying write fails.
pub fn write_records<W: Write>(records: &[ListingRecord], writer: W) -> Result<(), OutputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for record in records {
        let rating = record
            .average_rating
            .map_or_else(|| NOT_AVAILABLE.to_owned(), |r| format!("{r:.1}"));
        let reviews = record
            .review_count
            .map_or_else(|| NOT_AVAILABLE.to_owned(), |n| n.to_string());
        let website = record.website_url.as_deref().unwrap_or(NOT_AVAILABLE);
        let name = if record.name.is_empty() {
            NOT_AVAILABLE
        } else {
            record.name.as_str()
        };

        csv_writer.write_record([name, &rating, &reviews, website, NOT_AVAILABLE])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes all records to it.
///
/// # Errors
///
/// Returns [`OutputError`] if the file cannot be created or written.
pub fn write_records_to_path<P: AsRef<Path>>(
    records: &[ListingRecord],
    path: P,
) -> Result<(), OutputError> {
    let file = std::fs::File::create(path)?;
    write_records(records, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> ListingRecord {
        ListingRecord {
            name: "HubSpot".to_owned(),
            profile_url: Some("https://example.com/products/hubspot".to_owned()),
            website_url: Some("https://www.hubspot.com".to_owned()),
            average_rating: Some(4.4),
            review_count: Some(12_540),
        }
    }

    fn rendered(records: &[ListingRecord]) -> String {
        let mut buf = Vec::new();
        write_records(records, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_matches_fixed_column_set() {
        let out = rendered(&[]);
        assert_eq!(
            out.lines().next().unwrap(),
            "Company Name/Product Name,Average Rating,Review Count,Website URL,Other Details"
        );
    }

    #[test]
    fn full_record_renders_all_fields() {
        let out = rendered(&[full_record()]);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row, "HubSpot,4.4,12540,https://www.hubspot.com,N/A");
    }

    #[test]
    fn missing_fields_render_as_na_not_empty() {
        let out = rendered(&[ListingRecord::named("Lonely")]);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row, "Lonely,N/A,N/A,N/A,N/A");
    }

    #[test]
    fn empty_name_renders_as_na() {
        let out = rendered(&[ListingRecord::named("")]);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row, "N/A,N/A,N/A,N/A,N/A");
    }

    #[test]
    fn one_data_row_per_record_in_order() {
        let records = vec![
            ListingRecord::named("First"),
            ListingRecord::named("Second"),
            ListingRecord::named("Third"),
        ];
        let out = rendered(&records);
        let names: Vec<&str> = out
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn write_to_path_creates_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_records_to_path(&[full_record()], &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
