use std::collections::BTreeSet;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Rows whose occupation cell holds this placeholder are dropped.
const PLACEHOLDER_TITLE: &str = "undefined";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no table with both an Occupation and a Visa column")]
    SchemaMismatch,
}

/// One listing entry: a job title and the visa codes found in its Visa cell.
/// The set deduplicates codes within that single cell only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupationRow {
    pub title: String,
    pub codes: BTreeSet<String>,
}

/// Extract occupation rows from one rendered listing page.
///
/// Scans the document's tables in order and uses the first one whose header
/// row has both an "Occupation" and a "Visa" column. Codes are NOT filtered
/// against the known-program set here; that happens at aggregation.
pub fn extract_rows(html: &str) -> Result<Vec<OccupationRow>, ExtractError> {
    let table_sel = Selector::parse("table").unwrap();
    let tr_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("th, td").unwrap();
    let code_re = Regex::new(r"\b\d{3}\b").unwrap();

    let doc = Html::parse_document(html);

    for table in doc.select(&table_sel) {
        let mut trs = table.select(&tr_sel);
        let Some(header) = trs.next() else { continue };

        let columns: Vec<String> = header.select(&cell_sel).map(cell_text).collect();
        let occupation_col = columns.iter().position(|c| c == "Occupation");
        let visa_col = columns.iter().position(|c| c == "Visa");
        let (Some(occupation_col), Some(visa_col)) = (occupation_col, visa_col) else {
            continue;
        };

        let mut rows = Vec::new();
        for tr in trs {
            let cells: Vec<String> = tr.select(&cell_sel).map(cell_text).collect();
            let Some(title) = cells.get(occupation_col) else { continue };
            if title.is_empty() || title == PLACEHOLDER_TITLE {
                continue;
            }

            let visa_text = cells.get(visa_col).map(String::as_str).unwrap_or("");
            let codes = code_re
                .find_iter(visa_text)
                .map(|m| m.as_str().to_string())
                .collect();

            rows.push(OccupationRow {
                title: title.clone(),
                codes,
            });
        }
        return Ok(rows);
    }

    Err(ExtractError::SchemaMismatch)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

// ── Tests ──
