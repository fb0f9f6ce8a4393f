use chrono::{DateTime, SecondsFormat, Utc};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use study_utils::sus::sus_score;

use crate::codec::{self, TableRecord};

/// One completed task trial.
///
/// Missing JSON fields decode to their defaults rather than rejecting the
/// submission; `time_taken_ms` is recomputed server-side on every write and
/// never trusted from the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyResult {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "participantId")]
    pub participant_id: String,
    #[serde(rename = "taskId")]
    pub task_id: String,

    #[serde(rename = "taskName")]
    pub task_name: String,
    #[serde(rename = "selectionMethod")]
    pub selection_method: String,
    #[serde(rename = "taskDifficulty")]
    pub task_difficulty: String,
    #[serde(rename = "taskType")]
    pub task_type: String,

    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "endedAt")]
    pub ended_at: DateTime<Utc>,
    #[serde(rename = "timeTaken_ms")]
    pub time_taken_ms: i64,

    #[serde(rename = "totalAdjustments")]
    pub total_adjustments: i64,
    #[serde(rename = "excessTravel")]
    pub excess_travel: i64,
    #[serde(rename = "precisionActivations")]
    pub precision_activations: i64,
    #[serde(rename = "precisionDuration")]
    pub precision_duration: f64,
    #[serde(rename = "gestureCount")]
    pub gesture_count: i64,
    #[serde(rename = "longPressCount")]
    pub long_press_count: i64,
    #[serde(rename = "tapCount")]
    pub tap_count: i64,
    #[serde(rename = "dragCount")]
    pub drag_count: i64,

    #[serde(rename = "accuracyScore")]
    pub accuracy_score: f64,
    #[serde(rename = "errorCount")]
    pub error_count: i64,
    #[serde(rename = "averageSelectionSpeed")]
    pub average_selection_speed: f64,
    #[serde(rename = "completionStatus")]
    pub completion_status: String,

    #[serde(rename = "finalSelectionStart")]
    pub final_selection_start: i64,
    #[serde(rename = "finalSelectionEnd")]
    pub final_selection_end: i64,
    #[serde(rename = "textLength")]
    pub text_length: i64,

    #[serde(
        rename = "cognitiveLoadScore",
        skip_serializing_if = "Option::is_none"
    )]
    pub cognitive_load_score: Option<f64>,
}

impl TableRecord for StudyResult {
    const HEADER: &'static [&'static str] = &[
        "SessionID",
        "ParticipantID",
        "TaskID",
        "TaskName",
        "SelectionMethod",
        "TaskDifficulty",
        "TaskType",
        "StartedAt",
        "EndedAt",
        "TimeTakenMs",
        "TotalAdjustments",
        "ExcessTravel",
        "PrecisionActivations",
        "PrecisionDuration",
        "GestureCount",
        "LongPressCount",
        "TapCount",
        "DragCount",
        "AccuracyScore",
        "ErrorCount",
        "AverageSelectionSpeed",
        "CompletionStatus",
        "FinalSelectionStart",
        "FinalSelectionEnd",
        "TextLength",
        "CognitiveLoadScore",
    ];
    const MIN_FIELDS: usize = 26;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.session_id.clone(),
            self.participant_id.clone(),
            self.task_id.clone(),
            self.task_name.clone(),
            self.selection_method.clone(),
            self.task_difficulty.clone(),
            self.task_type.clone(),
            rfc3339(&self.started_at),
            rfc3339(&self.ended_at),
            self.time_taken_ms.to_string(),
            self.total_adjustments.to_string(),
            self.excess_travel.to_string(),
            self.precision_activations.to_string(),
            format!("{:.3}", self.precision_duration),
            self.gesture_count.to_string(),
            self.long_press_count.to_string(),
            self.tap_count.to_string(),
            self.drag_count.to_string(),
            format!("{:.3}", self.accuracy_score),
            self.error_count.to_string(),
            format!("{:.3}", self.average_selection_speed),
            self.completion_status.clone(),
            self.final_selection_start.to_string(),
            self.final_selection_end.to_string(),
            self.text_length.to_string(),
            self.cognitive_load_score
                .map(|score| format!("{score:.2}"))
                .unwrap_or_default(),
        ]
    }

    fn from_row(row: &StringRecord) -> Option<Self> {
        if row.len() < Self::MIN_FIELDS {
            return None;
        }

        Some(StudyResult {
            session_id: codec::text(row, 0),
            participant_id: codec::text(row, 1),
            task_id: codec::text(row, 2),
            task_name: codec::text(row, 3),
            selection_method: codec::text(row, 4),
            task_difficulty: codec::text(row, 5),
            task_type: codec::text(row, 6),
            started_at: codec::timestamp(row, 7),
            ended_at: codec::timestamp(row, 8),
            time_taken_ms: codec::number(row, 9),
            total_adjustments: codec::number(row, 10),
            excess_travel: codec::number(row, 11),
            precision_activations: codec::number(row, 12),
            precision_duration: codec::number(row, 13),
            gesture_count: codec::number(row, 14),
            long_press_count: codec::number(row, 15),
            tap_count: codec::number(row, 16),
            drag_count: codec::number(row, 17),
            accuracy_score: codec::number(row, 18),
            error_count: codec::number(row, 19),
            average_selection_speed: codec::number(row, 20),
            completion_status: codec::text(row, 21),
            final_selection_start: codec::number(row, 22),
            final_selection_end: codec::number(row, 23),
            text_length: codec::number(row, 24),
            cognitive_load_score: codec::optional_number(row, 25),
        })
    }
}

/// One System Usability Scale response set.
///
/// The derived total score is computed at write time and stored as the last
/// CSV column only; it is never read back into the record or returned to the
/// submitting client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SusSubmission {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub responses: Vec<i64>,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

impl TableRecord for SusSubmission {
    const HEADER: &'static [&'static str] = &[
        "SessionID",
        "SubmittedAt",
        "Q1",
        "Q2",
        "Q3",
        "Q4",
        "Q5",
        "Q6",
        "Q7",
        "Q8",
        "Q9",
        "Q10",
        "TotalScore",
    ];
    const MIN_FIELDS: usize = 13;

    fn to_row(&self) -> Vec<String> {
        let mut row = vec![self.session_id.clone(), rfc3339(&self.submitted_at)];
        row.extend(self.responses.iter().map(|r| r.to_string()));
        row.push(sus_score(&self.responses).to_string());
        row
    }

    fn from_row(row: &StringRecord) -> Option<Self> {
        if row.len() < Self::MIN_FIELDS {
            return None;
        }

        Some(SusSubmission {
            session_id: codec::text(row, 0),
            submitted_at: codec::timestamp(row, 1),
            responses: (2..12).map(|idx| codec::number(row, idx)).collect(),
        })
    }
}

fn rfc3339(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_result() -> StudyResult {
        StudyResult {
            session_id: "session_p1_1000".to_string(),
            participant_id: "p1".to_string(),
            task_id: "t3".to_string(),
            task_name: "select sentence".to_string(),
            selection_method: "precision".to_string(),
            task_difficulty: "hard".to_string(),
            task_type: "selection".to_string(),
            started_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
            ended_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 42).unwrap(),
            time_taken_ms: 42_000,
            total_adjustments: 4,
            excess_travel: 12,
            precision_activations: 2,
            precision_duration: 1.5,
            gesture_count: 9,
            long_press_count: 1,
            tap_count: 5,
            drag_count: 3,
            accuracy_score: 0.875,
            error_count: 1,
            average_selection_speed: 13.25,
            completion_status: "completed".to_string(),
            final_selection_start: 10,
            final_selection_end: 54,
            text_length: 120,
            cognitive_load_score: Some(3.75),
        }
    }

    #[test]
    fn study_result_round_trips() {
        let original = sample_result();
        let row = StringRecord::from(original.to_row());
        let decoded = StudyResult::from_row(&row).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn absent_cognitive_load_round_trips_as_absent() {
        let mut original = sample_result();
        original.cognitive_load_score = None;
        let row = StringRecord::from(original.to_row());
        let decoded = StudyResult::from_row(&row).unwrap();
        assert_eq!(decoded.cognitive_load_score, None);
    }

    #[test]
    fn short_row_is_rejected() {
        let row = StringRecord::from(vec!["only"; 25]);
        assert!(StudyResult::from_row(&row).is_none());
    }

    #[test]
    fn unparseable_fields_decode_to_defaults() {
        let mut fields = sample_result().to_row();
        fields[9] = "not-a-number".to_string();
        fields[7] = "not-a-timestamp".to_string();
        let decoded = StudyResult::from_row(&StringRecord::from(fields)).unwrap();
        assert_eq!(decoded.time_taken_ms, 0);
        assert_eq!(decoded.started_at, DateTime::<Utc>::default());
    }

    #[test]
    fn sus_row_carries_derived_total_score() {
        let submission = SusSubmission {
            session_id: "session_p1_1000".to_string(),
            responses: vec![5, 1, 5, 1, 5, 1, 5, 1, 5, 1],
            submitted_at: Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap(),
        };
        let row = submission.to_row();
        assert_eq!(row.len(), 13);
        assert_eq!(row[12], "100");
    }

    #[test]
    fn sus_row_round_trips_without_total_score() {
        let submission = SusSubmission {
            session_id: "s".to_string(),
            responses: vec![3; 10],
            submitted_at: Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap(),
        };
        let row = StringRecord::from(submission.to_row());
        let decoded = SusSubmission::from_row(&row).unwrap();
        assert_eq!(decoded, submission);
    }

    #[test]
    fn study_result_json_uses_original_field_names() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert!(json.get("timeTaken_ms").is_some());
        assert!(json.get("sessionId").is_some());
        assert!(json.get("cognitiveLoadScore").is_some());
    }
}
