//! The step trace produced alongside every transform result.
//!
//! A [`StepTrace`] is built once by an engine through [`TraceBuilder`] and is
//! read-only afterwards. The builder owns the bookkeeping that keeps traces
//! well formed: ids are assigned contiguously from 0 and only the record
//! passed to [`TraceBuilder::finish`] is flagged final.

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::id::StepId;
use crate::step::{StepDetail, StepRecord};

/// Title of the single record in a fail-soft error trace.
pub const ERROR_TITLE: &str = "Error";

/// Ordered, immutable sequence of step records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepTrace {
    records: Vec<StepRecord>,
}

impl StepTrace {
    /// A trace made of one error-flagged record.
    ///
    /// `detail` should carry the unmodified input as its result so that the
    /// record still renders something sensible.
    pub fn error(description: impl Into<String>, detail: StepDetail) -> Self {
        StepTrace {
            records: vec![StepRecord {
                id: StepId(0),
                title: ERROR_TITLE.to_string(),
                description: description.into(),
                is_final: true,
                is_error: true,
                detail,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: StepId) -> Option<&StepRecord> {
        self.records.get(id.index())
    }

    pub fn first(&self) -> Option<&StepRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.records.last()
    }

    /// True when the trace reports an invalid configuration.
    pub fn is_error(&self) -> bool {
        self.records.iter().any(|r| r.is_error)
    }

    /// The complete result, as carried by the final record.
    pub fn final_result(&self) -> Option<&str> {
        self.records
            .last()
            .filter(|r| r.is_final)
            .map(StepRecord::result_so_far)
    }

    /// Checks the structural invariants every engine-produced trace upholds.
    pub fn validate(&self) -> Result<(), TraceError> {
        let last = self.records.last().ok_or(TraceError::Empty)?;

        for (index, record) in self.records.iter().enumerate() {
            let expected = StepId::from(index);
            if record.id != expected {
                return Err(TraceError::NonContiguousId {
                    expected,
                    found: record.id,
                });
            }
            if record.is_final && index + 1 != self.records.len() {
                return Err(TraceError::MisplacedFinal { id: record.id });
            }
        }
        if !last.is_final {
            return Err(TraceError::MissingFinal { id: last.id });
        }
        if self.records.len() < 2 && !last.is_error {
            return Err(TraceError::TooShort {
                len: self.records.len(),
            });
        }

        for pair in self.records.windows(2) {
            if !pair[1].result_so_far().starts_with(pair[0].result_so_far()) {
                return Err(TraceError::ResultShrank { id: pair[1].id });
            }
        }

        self.validate_detail_shape()
    }

    /// All records come from one engine; rail fence grids never change size.
    fn validate_detail_shape(&self) -> Result<(), TraceError> {
        let Some(first) = self.records.first() else {
            return Ok(());
        };
        match &first.detail {
            StepDetail::Caesar(_) => {
                for record in &self.records {
                    if !matches!(record.detail, StepDetail::Caesar(_)) {
                        return Err(TraceError::MixedEngines { id: record.id });
                    }
                }
            }
            StepDetail::RailFence(step) => {
                let rows = step.grid_snapshot.rows();
                let cols = step.grid_snapshot.cols();
                for record in &self.records {
                    let StepDetail::RailFence(step) = &record.detail else {
                        return Err(TraceError::MixedEngines { id: record.id });
                    };
                    let grid = &step.grid_snapshot;
                    let ragged = (0..grid.rows())
                        .any(|r| grid.row(r).map_or(0, |cells| cells.len()) != grid.cols());
                    if grid.rows() != rows || grid.cols() != cols || ragged {
                        return Err(TraceError::GridDimensions {
                            id: record.id,
                            rows,
                            cols,
                            found_rows: grid.rows(),
                            found_cols: grid.cols(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, TraceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes a trace and rejects it unless it is well formed.
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let trace: StepTrace = serde_json::from_str(json)?;
        trace.validate()?;
        Ok(trace)
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Append-only builder used by the engines.
#[derive(Debug, Default)]
pub(crate) struct TraceBuilder {
    records: Vec<StepRecord>,
}

impl TraceBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        detail: StepDetail,
    ) {
        self.append(title.into(), description.into(), detail, false);
    }

    /// Appends the final record and seals the trace.
    pub(crate) fn finish(
        mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        detail: StepDetail,
    ) -> StepTrace {
        self.append(title.into(), description.into(), detail, true);
        StepTrace {
            records: self.records,
        }
    }

    fn append(&mut self, title: String, description: String, detail: StepDetail, is_final: bool) {
        let id = StepId::from(self.records.len());
        self.records.push(StepRecord {
            id,
            title,
            description,
            is_final,
            is_error: false,
            detail,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{CaesarStep, Direction, Grid, Phase, RailFenceStep};

    fn caesar(result: &str) -> StepDetail {
        StepDetail::Caesar(CaesarStep {
            input_text: "ab".into(),
            cursor_index: -1,
            current_char: None,
            shift_amount: 1,
            original_alphabet_position: None,
            new_alphabet_position: None,
            output_char: None,
            result_so_far: result.into(),
            skipped_non_alphabetic: false,
        })
    }

    fn rail_fence(rows: usize, cols: usize) -> StepDetail {
        StepDetail::RailFence(RailFenceStep {
            rails: rows as i64,
            grid_snapshot: Grid::new(rows, cols),
            cursor_column: None,
            cursor_row: None,
            zigzag_direction: Direction::Down,
            read_order_so_far: Vec::new(),
            result_so_far: String::new(),
            phase: Phase::Filling,
        })
    }

    #[test]
    fn builder_assigns_contiguous_ids_and_one_final() {
        let mut builder = TraceBuilder::new();
        builder.push("Setup", "start", caesar(""));
        builder.push("Step", "one", caesar("b"));
        let trace = builder.finish("Done", "end", caesar("bc"));

        assert_eq!(trace.len(), 3);
        let ids: Vec<u32> = trace.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(trace.iter().filter(|r| r.is_final).count(), 1);
        assert!(trace.last().unwrap().is_final);
        assert_eq!(trace.final_result(), Some("bc"));
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn error_trace_is_single_final_error_record() {
        let trace = StepTrace::error("bad rails", caesar("ab"));
        assert_eq!(trace.len(), 1);
        let record = trace.first().unwrap();
        assert_eq!(record.title, ERROR_TITLE);
        assert!(record.is_final && record.is_error);
        assert!(trace.is_error());
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_trace() {
        let trace = StepTrace::default();
        assert!(matches!(trace.validate(), Err(TraceError::Empty)));
        assert_eq!(trace.final_result(), None);
    }

    #[test]
    fn validate_rejects_single_non_error_record() {
        let trace = TraceBuilder::new().finish("Done", "end", caesar(""));
        assert!(matches!(trace.validate(), Err(TraceError::TooShort { len: 1 })));
    }

    #[test]
    fn validate_rejects_shrinking_result() {
        let mut builder = TraceBuilder::new();
        builder.push("Setup", "", caesar("abc"));
        let trace = builder.finish("Done", "", caesar("ab"));
        assert!(matches!(
            trace.validate(),
            Err(TraceError::ResultShrank { id: StepId(1) })
        ));
    }

    #[test]
    fn validate_rejects_gap_in_ids() {
        let mut builder = TraceBuilder::new();
        builder.push("Setup", "", caesar(""));
        let mut trace = builder.finish("Done", "", caesar(""));
        trace.records[1].id = StepId(5);
        assert!(matches!(
            trace.validate(),
            Err(TraceError::NonContiguousId { .. })
        ));
    }

    #[test]
    fn validate_rejects_early_final() {
        let mut builder = TraceBuilder::new();
        builder.push("Setup", "", caesar(""));
        let mut trace = builder.finish("Done", "", caesar(""));
        trace.records[0].is_final = true;
        assert!(matches!(
            trace.validate(),
            Err(TraceError::MisplacedFinal { id: StepId(0) })
        ));
    }

    #[test]
    fn validate_rejects_resized_grid() {
        let mut builder = TraceBuilder::new();
        builder.push("Setup", "", rail_fence(3, 4));
        let trace = builder.finish("Done", "", rail_fence(3, 5));
        assert!(matches!(
            trace.validate(),
            Err(TraceError::GridDimensions { id: StepId(1), .. })
        ));
    }

    #[test]
    fn validate_rejects_mixed_engines() {
        let mut builder = TraceBuilder::new();
        builder.push("Setup", "", rail_fence(2, 0));
        let trace = builder.finish("Done", "", caesar(""));
        assert!(matches!(
            trace.validate(),
            Err(TraceError::MixedEngines { id: StepId(1) })
        ));
    }

    #[test]
    fn json_roundtrip_preserves_records() {
        let mut builder = TraceBuilder::new();
        builder.push("Setup", "start", rail_fence(2, 3));
        let trace = builder.finish("Done", "end", rail_fence(2, 3));

        let json = trace.to_json_pretty().unwrap();
        let back = StepTrace::from_json(&json).unwrap();
        assert_eq!(back, trace);
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(matches!(
            StepTrace::from_json("{not json"),
            Err(TraceError::Json(_))
        ));
        assert!(matches!(StepTrace::from_json("[]"), Err(TraceError::Empty)));
    }
}
