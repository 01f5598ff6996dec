use std::collections::BTreeSet;

use super::model::Record;

/// Keep only the named columns of each record.
///
/// Field order follows each record's own order. A selected column that a
/// record lacks is left out of that record rather than filled with null.
pub fn project(records: &[Record], columns: &BTreeSet<String>) -> Vec<Record> {
    records
        .iter()
        .map(|record| -> Record {
            record
                .iter()
                .filter(|(name, _)| columns.contains(*name))
                .map(|(name, value)| (name, value.clone()))
                .collect()
        })
        .collect()
}
