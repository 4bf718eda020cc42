use crate::category::match_key;
use crate::record::{FilterSelection, Record};

/// Keep records whose year and category match the selection, in input order.
///
/// The year is compared through its string form, so a numeric `2023` matches
/// the control value `"2023"`. Categories compare case-insensitively after
/// trimming; a record without a string category never matches.
pub fn filter_records(records: &[Record], selection: &FilterSelection) -> Vec<Record> {
    let wanted = match_key(&selection.category_label());
    records
        .iter()
        .filter(|r| r.year_text() == selection.year)
        .filter(|r| r.category_text().map(match_key).as_deref() == Some(wanted.as_str()))
        .cloned()
        .collect()
}
