//! Spreadsheet export for enriched stargazer rows.
//!
//! Writes one `.xlsx` worksheet with a fixed column layout, one row per
//! processed user. Absent values become empty cells, never error text.
//! Writing is blocking; the orchestrator invokes it under a worker-thread
//! offload.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use starreach_core::{EnrichedRow, ExportError, RowExporter};
use std::path::Path;

/// Column headers, in output order.
const COLUMNS: [&str; 12] = [
    "Login",
    "Profile URL",
    "Name",
    "Bio",
    "Company",
    "Location",
    "Website",
    "GitHub Email",
    "Scraped Email",
    "LinkedIn",
    "Twitter",
    "Scrape Status",
];

/// Writes enriched rows to an `.xlsx` workbook.
#[derive(Debug, Default)]
pub struct XlsxExporter;

impl XlsxExporter {
    /// Create an exporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_workbook(rows: &[EnrichedRow], path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Stargazers")?;

        let header_format = Format::new().set_bold();
        for (col, header) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            let detail = row.detail.as_ref();
            let scrape = row.scrape.as_ref();

            let cells: [&str; 12] = [
                &row.record.login,
                &row.record.profile_url,
                opt(detail.and_then(|d| d.name.as_deref())),
                opt(detail.and_then(|d| d.bio.as_deref())),
                opt(detail.and_then(|d| d.company.as_deref())),
                opt(detail.and_then(|d| d.location.as_deref())),
                opt(detail.and_then(|d| d.blog_url.as_deref())),
                opt(detail.and_then(|d| d.public_email.as_deref())),
                opt(scrape.and_then(|s| s.email.as_deref())),
                opt(scrape.and_then(|s| s.linkedin_url.as_deref())),
                opt(detail.and_then(|d| d.twitter.as_deref())),
                scrape.map_or("", |s| s.status.as_str()),
            ];

            for (col, value) in cells.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r, col as u16, *value)?;
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}

/// Absent fields render as empty cells.
fn opt(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

impl RowExporter for XlsxExporter {
    fn export(&self, rows: Vec<EnrichedRow>, path: &Path) -> Result<(), ExportError> {
        Self::write_workbook(&rows, path).map_err(|e| ExportError(e.to_string()))?;
        tracing::info!(rows = rows.len(), path = %path.display(), "spreadsheet written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starreach_core::{DetailError, ProfileDetail, ScrapeResult, StargazerRecord};

    fn sample_rows() -> Vec<EnrichedRow> {
        let full = EnrichedRow::new(StargazerRecord {
            login: "octocat".to_string(),
            profile_url: "https://github.com/octocat".to_string(),
            joined_at: None,
        })
        .with_detail(ProfileDetail {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            bio: Some("Mascot".to_string()),
            blog_url: Some("octocat.example.com".to_string()),
            company: Some("GitHub".to_string()),
            location: None,
            public_email: None,
            twitter: None,
        })
        .with_scrape(ScrapeResult::completed(
            "http://octocat.example.com".to_string(),
            Some("octo@example.com".to_string()),
            None,
        ));

        let bare = EnrichedRow::new(StargazerRecord {
            login: "ghost".to_string(),
            profile_url: "https://github.com/ghost".to_string(),
            joined_at: None,
        })
        .with_detail_error(DetailError::NotFound)
        .with_scrape(ScrapeResult::skipped());

        vec![full, bare]
    }

    #[test]
    fn test_export_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        XlsxExporter::new().export(sample_rows(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives.
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_export_tolerates_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        XlsxExporter::new().export(Vec::new(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_fails_on_unwritable_path() {
        let result = XlsxExporter::new().export(
            sample_rows(),
            Path::new("/nonexistent-dir/out.xlsx"),
        );
        assert!(result.is_err());
    }
}
