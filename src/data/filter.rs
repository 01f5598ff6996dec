use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::{field_text, Record};

// ---------------------------------------------------------------------------
// Criterion: one field/value condition joined by AND or OR
// ---------------------------------------------------------------------------

/// How a criterion combines with the rest of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperand {
    #[default]
    And,
    Or,
}

impl fmt::Display for LogicalOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperand::And => write!(f, "AND"),
            LogicalOperand::Or => write!(f, "OR"),
        }
    }
}

impl FromStr for LogicalOperand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(LogicalOperand::And),
            "OR" => Ok(LogicalOperand::Or),
            other => Err(format!("unknown logical operand: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub field: String,
    pub value: String,
    pub operand: LogicalOperand,
}

impl Criterion {
    pub fn new(field: impl Into<String>, value: impl Into<String>, operand: LogicalOperand) -> Self {
        Criterion {
            field: field.into(),
            value: value.into(),
            operand,
        }
    }

    /// Case-insensitive string equality on the field's stringified value.
    ///
    /// The field name itself is matched exactly. A record without the field
    /// compares as the text `undefined`.
    pub fn matches(&self, record: &Record) -> bool {
        field_text(record.get(&self.field)).to_lowercase() == self.value.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Filter evaluation
// ---------------------------------------------------------------------------

/// Apply AND/OR criteria to `records`.
///
/// * AND criteria narrow the full set; with none, every record passes.
/// * Each OR criterion selects from the full set (not from the AND result).
/// * The result is the union of both sides, AND matches first, with
///   duplicate records (by value) dropped after their first occurrence.
///
/// With no criteria at all the input comes back unchanged (minus duplicates).
pub fn apply_filters(records: &[Record], criteria: &[Criterion]) -> Vec<Record> {
    log::debug!("Applying {} filter criteria: {:?}", criteria.len(), criteria);

    let (and_group, or_group): (Vec<&Criterion>, Vec<&Criterion>) = criteria
        .iter()
        .partition(|c| c.operand == LogicalOperand::And);

    let and_matches = records
        .iter()
        .filter(|r| and_group.iter().all(|c| c.matches(r)));

    let or_matches = or_group
        .iter()
        .flat_map(|c| records.iter().filter(move |r| c.matches(r)));

    let mut seen = HashSet::new();
    let result: Vec<Record> = and_matches
        .chain(or_matches)
        .filter(|r| seen.insert(*r))
        .cloned()
        .collect();

    log::debug!("Filter kept {} of {} records", result.len(), records.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicalOperand::{And, Or};

    fn rec(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            rec(&[("name", "a"), ("type", "x")]),
            rec(&[("name", "b"), ("type", "y")]),
            rec(&[("name", "c"), ("type", "x")]),
        ]
    }

    fn matches_of(records: &[Record], c: &Criterion) -> Vec<Record> {
        records.iter().filter(|r| c.matches(r)).cloned().collect()
    }

    #[test]
    fn no_criteria_returns_every_record() {
        let records = sample();
        assert_eq!(apply_filters(&records, &[]), records);
    }

    #[test]
    fn no_criteria_on_empty_set_is_empty() {
        assert!(apply_filters(&[], &[]).is_empty());
        let c = Criterion::new("name", "a", Or);
        assert!(apply_filters(&[], &[c]).is_empty());
    }

    #[test]
    fn and_only_is_intersection() {
        let records = vec![
            rec(&[("name", "a"), ("type", "x"), ("size", "s")]),
            rec(&[("name", "b"), ("type", "x"), ("size", "m")]),
            rec(&[("name", "c"), ("type", "y"), ("size", "s")]),
        ];
        let c1 = Criterion::new("type", "x", And);
        let c2 = Criterion::new("size", "s", And);

        let result = apply_filters(&records, &[c1.clone(), c2.clone()]);
        let expected: Vec<Record> = matches_of(&records, &c1)
            .into_iter()
            .filter(|r| matches_of(&records, &c2).contains(r))
            .collect();

        assert_eq!(result, expected);
        assert_eq!(result, vec![records[0].clone()]);
    }

    #[test]
    fn or_only_is_union_over_original_set() {
        let records = sample();
        let result = apply_filters(
            &records,
            &[
                Criterion::new("name", "b", Or),
                Criterion::new("type", "x", Or),
                Criterion::new("name", "a", Or),
            ],
        );
        assert_eq!(
            result,
            vec![records[1].clone(), records[0].clone(), records[2].clone()]
        );
    }

    #[test]
    fn mixed_and_or_lists_and_matches_first() {
        let records = sample();
        let result = apply_filters(
            &records,
            &[
                Criterion::new("type", "x", And),
                Criterion::new("name", "b", Or),
            ],
        );
        assert_eq!(
            result,
            vec![
                rec(&[("name", "a"), ("type", "x")]),
                rec(&[("name", "c"), ("type", "x")]),
                rec(&[("name", "b"), ("type", "y")]),
            ]
        );
    }

    #[test]
    fn or_results_are_not_restricted_by_and_group() {
        let records = sample();
        // The AND criterion matches nothing; OR still selects from the full set.
        let result = apply_filters(
            &records,
            &[
                Criterion::new("type", "z", And),
                Criterion::new("type", "y", Or),
            ],
        );
        assert_eq!(result, vec![records[1].clone()]);
    }

    #[test]
    fn duplicate_records_collapse_to_first_occurrence() {
        let records = vec![
            rec(&[("name", "a"), ("type", "x")]),
            rec(&[("name", "b"), ("type", "y")]),
            rec(&[("type", "x"), ("name", "a")]),
        ];
        assert_eq!(
            apply_filters(&records, &[]),
            vec![records[0].clone(), records[1].clone()]
        );
    }

    #[test]
    fn duplicate_special_float_records_collapse() {
        use crate::data::model::CellValue;

        let float_rec = |v: f64| -> Record { [("x", CellValue::Float(v))].into_iter().collect() };
        let records = vec![
            float_rec(f64::NAN),
            float_rec(f64::NAN),
            float_rec(-0.0),
            float_rec(0.0),
        ];
        let out = apply_filters(&records, &[]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].get("x").map(|v| v.to_string()), Some("NaN".to_string()));
        assert_eq!(out[1].get("x").map(|v| v.to_string()), Some("0".to_string()));
    }

    #[test]
    fn leading_zero_csv_values_match_their_text() {
        let ds = crate::data::parse_csv_records("zip\n00123\n123\n".as_bytes()).unwrap();
        let c = Criterion::new("zip", "00123", And);
        let out = apply_filters(&ds.records, &[c]);
        assert_eq!(out, vec![ds.records[0].clone()]);
    }

    #[test]
    fn value_comparison_ignores_case() {
        let records = vec![rec(&[("type", "x")])];
        let c = Criterion::new("type", "X", And);
        assert_eq!(apply_filters(&records, &[c]), records);
    }

    #[test]
    fn field_name_comparison_is_case_sensitive() {
        let records = vec![rec(&[("type", "x")])];
        let c = Criterion::new("Type", "x", And);
        assert!(apply_filters(&records, &[c]).is_empty());
    }

    #[test]
    fn missing_field_only_matches_literal_undefined() {
        let records = vec![rec(&[("name", "a")])];
        assert!(!Criterion::new("type", "", And).matches(&records[0]));
        assert!(!Criterion::new("type", "null", And).matches(&records[0]));
        assert!(Criterion::new("type", "undefined", And).matches(&records[0]));
        assert!(Criterion::new("type", "UNDEFINED", Or).matches(&records[0]));
    }

    #[test]
    fn non_string_values_are_stringified() {
        let record: Record = [
            ("count", crate::data::model::CellValue::Integer(3)),
            ("ok", crate::data::model::CellValue::Bool(true)),
            ("score", crate::data::model::CellValue::Float(2.0)),
            ("note", crate::data::model::CellValue::Null),
        ]
        .into_iter()
        .collect();
        assert!(Criterion::new("count", "3", And).matches(&record));
        assert!(Criterion::new("ok", "TRUE", And).matches(&record));
        assert!(Criterion::new("score", "2", And).matches(&record));
        assert!(Criterion::new("note", "null", And).matches(&record));
    }

    #[test]
    fn operand_parses_and_serializes_uppercase() {
        assert_eq!("and".parse::<LogicalOperand>(), Ok(And));
        assert_eq!(" OR ".parse::<LogicalOperand>(), Ok(Or));
        assert!("xor".parse::<LogicalOperand>().is_err());

        let c: Criterion =
            serde_json::from_str(r#"{"field":"type","value":"x","operand":"OR"}"#).unwrap();
        assert_eq!(c, Criterion::new("type", "x", Or));
        assert_eq!(
            serde_json::to_string(&Criterion::new("a", "b", And)).unwrap(),
            r#"{"field":"a","value":"b","operand":"AND"}"#
        );
    }
}
