use indexmap::IndexMap;

use crate::extract::OccupationRow;

/// The visa programs the scraper reports on. Order here is the order
/// artifacts are written in. Codes seen in the listing that are not in
/// this set are discarded during aggregation.
pub const KNOWN_PROGRAMS: [&str; 11] = [
    "186",
    "189",
    "190",
    "494",
    "485",
    "407",
    "187",
    "491",
    "482 Medium term stream",
    "482 Short term stream",
    "489 state or territory nominated",
];

/// Program code -> occupation titles, in page-then-row encounter order.
/// Duplicate titles across rows are kept as-is.
pub type ProgramIndex = IndexMap<String, Vec<String>>;

/// Accumulates extracted rows into a [`ProgramIndex`].
pub struct ProgramAggregator {
    index: ProgramIndex,
}

impl ProgramAggregator {
    /// Seed the index with every program in `programs`, each mapped to an
    /// empty title list, preserving the slice's order.
    pub fn new(programs: &[&str]) -> Self {
        let index = programs
            .iter()
            .map(|p| (p.to_string(), Vec::new()))
            .collect();
        ProgramAggregator { index }
    }

    /// Attribute `row.title` to every known program in the row's code set.
    /// Codes outside the seeded set are routine noise and ignored silently.
    pub fn add(&mut self, row: &OccupationRow) {
        for code in &row.codes {
            if let Some(titles) = self.index.get_mut(code.as_str()) {
                titles.push(row.title.clone());
            }
        }
    }

    /// Consume the aggregator and hand over the finished index.
    pub fn finalize(self) -> ProgramIndex {
        self.index
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn row(title: &str, codes: &[&str]) -> OccupationRow {
        OccupationRow {
            title: title.to_string(),
            codes: codes.iter().map(|c| c.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn unknown_codes_are_dropped() {
        let mut agg = ProgramAggregator::new(&["186", "189"]);
        agg.add(&row("Chef", &["351"]));
        let index = agg.finalize();
        assert!(!index.contains_key("351"));
        assert!(index.values().all(|titles| titles.is_empty()));
    }

    #[test]
    fn every_seeded_program_is_keyed() {
        let index = ProgramAggregator::new(&KNOWN_PROGRAMS).finalize();
        assert_eq!(index.len(), KNOWN_PROGRAMS.len());
        for program in KNOWN_PROGRAMS {
            assert!(index.contains_key(program), "missing key {program}");
        }
    }

    #[test]
    fn seed_order_is_preserved() {
        let index = ProgramAggregator::new(&KNOWN_PROGRAMS).finalize();
        let keys: Vec<&str> = index.keys().map(String::as_str).collect();
        assert_eq!(keys, KNOWN_PROGRAMS);
    }

    #[test]
    fn titles_accumulate_in_encounter_order() {
        let mut agg = ProgramAggregator::new(&["186", "190"]);
        agg.add(&row("Mechanical Engineer", &["186", "190"]));
        agg.add(&row("Welder", &["186"]));
        let index = agg.finalize();
        assert_eq!(index["186"], vec!["Mechanical Engineer", "Welder"]);
        assert_eq!(index["190"], vec!["Mechanical Engineer"]);
    }

    #[test]
    fn duplicate_titles_across_rows_are_kept() {
        let mut agg = ProgramAggregator::new(&["189"]);
        agg.add(&row("Accountant", &["189"]));
        agg.add(&row("Accountant", &["189"]));
        let index = agg.finalize();
        assert_eq!(index["189"], vec!["Accountant", "Accountant"]);
    }
}
