//! Response normalization: maps the backend's arbitrarily-shaped JSON onto the
//! fixed `ResumeEvaluation` / `InterviewScenario` records.
//!
//! Every field is resolved through an ordered alias list accumulated from the
//! key spellings the backend has actually shipped. Both entry points are
//! total: malformed input degrades field by field to null/empty, never to an
//! error, so the caller can always render a partial record.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::screening::coerce::{number_like, pick, string_list};
use crate::screening::models::{
    Criterion, CriterionDetail, InterviewScenario, ResumeEvaluation, Role, RoleSuitability,
    Verdict,
};
use crate::screening::suitability::{derive_suitability, recommend_role};
use crate::screening::unwrap::{self, SECTION_RESUME, SECTION_SCENARIO};

const TOTAL_SCORE_ALIASES: [&str; 3] = ["total_score", "overall_score", "score"];
const RECOMMENDED_ALIASES: [&str; 4] = ["recommended_role", "recommendation", "recommended", "role"];
const SUITABILITY_ALIASES: [&str; 3] = ["suitability", "role_suitability", "fit"];
const CRITERIA_ALIASES: [&str; 6] = [
    "criteria_scores",
    "scores",
    "criteria",
    "criteriaScore",
    "criteria_score",
    "score_breakdown",
];
const CRITERIA_DETAIL_ALIASES: [&str; 2] = ["criteria_details", "details"];
const CRITERION_ID_ALIASES: [&str; 4] = ["id", "criterion", "name", "key"];
const RED_FLAG_ALIASES: [&str; 4] = ["red_flags", "redflags", "concerns", "risks"];
const BONUS_ALIASES: [&str; 5] = ["bonus_points", "bonus", "strengths", "pluses", "advantages"];

const PROBLEM_ALIASES: [&str; 3] = ["selected_problem", "problem", "case"];
const PROBLEM_LABEL_KEYS: [&str; 4] = ["title", "name", "problem", "summary"];
const COMPETENCY_ALIASES: [&str; 4] = [
    "competencies_needing_deeper_evaluation",
    "competencies",
    "focus_competencies",
    "skills_to_probe",
];
const QUESTION_ALIASES: [&str; 3] = ["questions", "deep_dive_questions", "interview_questions"];
const QUESTION_LABEL_KEYS: [&str; 3] = ["question", "text", "title"];

/// Normalizes a full backend response into both records.
pub fn normalize_response(raw: &Value) -> (ResumeEvaluation, InterviewScenario) {
    (
        normalize_resume(&unwrap::section(raw, SECTION_RESUME)),
        normalize_scenario(&unwrap::section(raw, SECTION_SCENARIO)),
    )
}

/// Normalizes the resume-evaluation section. Total: any input yields a record
/// with all required keys present.
pub fn normalize_resume(raw: &Value) -> ResumeEvaluation {
    let data = unwrap::object_like(raw);

    let total_score = pick(&data, &TOTAL_SCORE_ALIASES).and_then(number_like);
    let suitability = extract_suitability(&data, total_score);
    let (criteria_scores, criteria_details) = extract_criteria(&data);

    // The backend's own recommendation wins; otherwise derive one, but only
    // when a total score exists at all (an empty payload stays empty).
    let recommended_role = pick(&data, &RECOMMENDED_ALIASES)
        .and_then(Value::as_str)
        .and_then(Role::parse)
        .or_else(|| total_score.map(|_| recommend_role(&suitability)));

    ResumeEvaluation {
        recommended_role,
        total_score,
        suitability,
        criteria_scores,
        criteria_details,
        red_flags: string_list(pick(&data, &RED_FLAG_ALIASES)),
        bonus_points: string_list(pick(&data, &BONUS_ALIASES)),
    }
}

/// Normalizes the interview-scenario section.
pub fn normalize_scenario(raw: &Value) -> InterviewScenario {
    let data = unwrap::object_like(raw);

    InterviewScenario {
        selected_problem: pick(&data, &PROBLEM_ALIASES).and_then(problem_string),
        competencies_needing_deeper_evaluation: string_list(pick(&data, &COMPETENCY_ALIASES)),
        questions: question_strings(pick(&data, &QUESTION_ALIASES)),
    }
}

/// Per-role verdicts: backend-supplied values win, roles the backend omitted
/// are derived from the total score.
fn extract_suitability(data: &Map<String, Value>, total: Option<f64>) -> RoleSuitability {
    let derived = derive_suitability(total);
    let container = pick(data, &SUITABILITY_ALIASES).and_then(Value::as_object);

    let explicit = |role: Role| -> Option<Verdict> {
        pick(container?, role.key_aliases())
            .and_then(Value::as_str)
            .and_then(Verdict::parse)
    };

    RoleSuitability {
        apm: explicit(Role::Apm).unwrap_or(derived.apm),
        pm: explicit(Role::Pm).unwrap_or(derived.pm),
        spm: explicit(Role::Spm).unwrap_or(derived.spm),
    }
}

fn clamp_score(n: f64) -> f64 {
    n.clamp(0.0, 5.0)
}

type CriteriaScores = BTreeMap<Criterion, Option<f64>>;
type CriteriaDetails = BTreeMap<Criterion, CriterionDetail>;

/// Criteria arrive either as a keyed mapping or as an ordered sequence of
/// `{id, score, strengths, weaknesses}` records; both reduce to the same
/// keyed shapes with all six criteria present.
fn extract_criteria(data: &Map<String, Value>) -> (CriteriaScores, CriteriaDetails) {
    match pick(data, &CRITERIA_ALIASES) {
        Some(Value::Array(records)) => criteria_from_records(records),
        container => criteria_from_maps(container.and_then(Value::as_object), data),
    }
}

fn criteria_from_records(records: &[Value]) -> (CriteriaScores, CriteriaDetails) {
    let mut scores: CriteriaScores = Criterion::ALL.into_iter().map(|c| (c, None)).collect();
    let mut details = CriteriaDetails::new();

    for record in records {
        let Some(entry) = record.as_object() else {
            continue;
        };
        // records without a recognizable id are discarded
        let Some(criterion) = pick(entry, &CRITERION_ID_ALIASES)
            .and_then(Value::as_str)
            .and_then(Criterion::from_id)
        else {
            continue;
        };

        // number_like unwraps the record's own score/value wrapper key
        scores.insert(criterion, number_like(record).map(clamp_score));

        let detail = CriterionDetail {
            strengths: string_list(entry.get("strengths")),
            weaknesses: string_list(entry.get("weaknesses")),
        };
        if !detail.is_empty() {
            details.insert(criterion, detail);
        }
    }

    (scores, details)
}

fn criteria_from_maps(
    container: Option<&Map<String, Value>>,
    data: &Map<String, Value>,
) -> (CriteriaScores, CriteriaDetails) {
    let detail_container = pick(data, &CRITERIA_DETAIL_ALIASES).and_then(Value::as_object);

    let mut scores = CriteriaScores::new();
    let mut details = CriteriaDetails::new();

    for criterion in Criterion::ALL {
        scores.insert(criterion, keyed_score(container, data, criterion));

        let detail = keyed_detail(&[detail_container, container, Some(data)], criterion);
        if !detail.is_empty() {
            details.insert(criterion, detail);
        }
    }

    (scores, details)
}

/// First alias that coerces to a number, looked up in the criteria container
/// and then at the payload top level (older backend versions flattened the
/// scores).
fn keyed_score(
    container: Option<&Map<String, Value>>,
    data: &Map<String, Value>,
    criterion: Criterion,
) -> Option<f64> {
    for alias in criterion.aliases() {
        for source in [container, Some(data)].into_iter().flatten() {
            if let Some(n) = source.get(*alias).and_then(number_like) {
                return Some(clamp_score(n));
            }
        }
    }
    None
}

fn keyed_detail(sources: &[Option<&Map<String, Value>>], criterion: Criterion) -> CriterionDetail {
    for alias in criterion.aliases() {
        for source in sources.iter().flatten() {
            if let Some(entry) = source.get(*alias).and_then(Value::as_object) {
                let detail = CriterionDetail {
                    strengths: string_list(entry.get("strengths")),
                    weaknesses: string_list(entry.get("weaknesses")),
                };
                if !detail.is_empty() {
                    return detail;
                }
            }
        }
    }
    CriterionDetail::default()
}

/// The selected problem may be a string or a labeled object.
fn problem_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => pick(map, &PROBLEM_LABEL_KEYS)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| value.to_string()),
        _ => return None,
    };
    let s = s.trim().to_string();
    (!s.is_empty()).then_some(s)
}

/// Question lists mix bare strings with `{question}`/`{text}` objects.
fn question_strings(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let s = match item {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Object(map) => pick(map, &QUESTION_LABEL_KEYS)
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .unwrap_or_else(|| item.to_string()),
                _ => return None,
            };
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        })
        .collect()
}
