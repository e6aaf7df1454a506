//! Normalized screening records and their fixed vocabularies.
//!
//! `ResumeEvaluation` and `InterviewScenario` are built fresh for every
//! submission and live only until the response is serialized; nothing here is
//! persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Role level a candidate may be screened for, lowest to highest seniority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "APM")]
    Apm,
    #[serde(rename = "PM")]
    Pm,
    #[serde(rename = "SPM")]
    Spm,
}

impl Role {
    /// All roles, seniority descending. Recommendation ties break toward the
    /// front of this list.
    pub const BY_SENIORITY: [Role; 3] = [Role::Spm, Role::Pm, Role::Apm];

    /// Key spellings observed inside backend suitability containers.
    pub fn key_aliases(&self) -> &'static [&'static str] {
        match self {
            Role::Apm => &["APM", "apm", "ApM", "apm_fit", "APM_fit", "apmSuitability"],
            Role::Pm => &["PM", "pm", "Pm", "pm_fit", "PM_fit", "pmSuitability"],
            Role::Spm => &["SPM", "spm", "SpM", "spm_fit", "SPM_fit", "spmSuitability"],
        }
    }

    /// Loose parse of a backend-supplied role identifier.
    /// "spm"/"apm" are checked before "pm" since both contain it.
    pub fn parse(raw: &str) -> Option<Role> {
        let s = raw.trim().to_lowercase();
        if s.contains("spm") || s.contains("senior") {
            Some(Role::Spm)
        } else if s.contains("apm") || s.contains("associate") {
            Some(Role::Apm)
        } else if s.contains("pm") {
            Some(Role::Pm)
        } else {
            None
        }
    }
}

/// Suitability verdict for one role level.
///
/// Backends have emitted a fourth "strong" label in some revisions; it is a
/// display synonym and parses as `Suitable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NotSuitable,
    Borderline,
    Suitable,
}

impl Verdict {
    /// Loose parse of a backend-supplied verdict string.
    /// The "not suitable" family must be matched before the bare "suitable"
    /// substring.
    pub fn parse(raw: &str) -> Option<Verdict> {
        let s = raw.trim().to_lowercase().replace(['-', ' '], "_");
        if s.is_empty() {
            return None;
        }
        if s.contains("not_suitable") || s.contains("unsuitable") || s == "no" {
            Some(Verdict::NotSuitable)
        } else if s.contains("border") || s.contains("maybe") || s.contains("moderate") {
            Some(Verdict::Borderline)
        } else if s.contains("suitable") || s.contains("strong") || s.contains("fit") || s == "yes"
        {
            Some(Verdict::Suitable)
        } else {
            None
        }
    }
}

/// Verdict per role level. Always carries all three roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSuitability {
    #[serde(rename = "APM")]
    pub apm: Verdict,
    #[serde(rename = "PM")]
    pub pm: Verdict,
    #[serde(rename = "SPM")]
    pub spm: Verdict,
}

impl RoleSuitability {
    pub fn get(&self, role: Role) -> Verdict {
        match role {
            Role::Apm => self.apm,
            Role::Pm => self.pm,
            Role::Spm => self.spm,
        }
    }
}

impl Default for RoleSuitability {
    fn default() -> Self {
        RoleSuitability {
            apm: Verdict::NotSuitable,
            pm: Verdict::NotSuitable,
            spm: Verdict::NotSuitable,
        }
    }
}

/// One of the six fixed evaluation dimensions, each scored 0–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Experience,
    Achievements,
    Education,
    Skills,
    IndustryExperience,
    TeamManagement,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Criterion::Experience,
        Criterion::Achievements,
        Criterion::Education,
        Criterion::Skills,
        Criterion::IndustryExperience,
        Criterion::TeamManagement,
    ];

    /// Key spellings observed for this criterion, canonical name first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Criterion::Experience => &["experience", "work_experience", "exp"],
            Criterion::Achievements => &["achievements", "accomplishments", "impact"],
            Criterion::Education => &["education", "degree", "education_score"],
            Criterion::Skills => &["skills", "skillset", "abilities"],
            Criterion::IndustryExperience => &["industry_experience", "domain", "industry"],
            Criterion::TeamManagement => {
                &["team_management", "leadership", "people_management", "team"]
            }
        }
    }

    /// Matches a backend-supplied criterion id against the alias lists.
    pub fn from_id(raw: &str) -> Option<Criterion> {
        let id = raw.trim().to_lowercase().replace([' ', '-'], "_");
        Criterion::ALL
            .into_iter()
            .find(|c| c.aliases().contains(&id.as_str()))
    }
}

/// Strengths and weaknesses reported for one criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionDetail {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl CriterionDetail {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty() && self.weaknesses.is_empty()
    }
}

/// Normalized resume evaluation. Every field degrades to null/empty rather
/// than being absent; `criteria_scores` always carries all six criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeEvaluation {
    pub recommended_role: Option<Role>,
    pub total_score: Option<f64>,
    pub suitability: RoleSuitability,
    pub criteria_scores: BTreeMap<Criterion, Option<f64>>,
    pub criteria_details: BTreeMap<Criterion, CriterionDetail>,
    pub red_flags: Vec<String>,
    pub bonus_points: Vec<String>,
}

impl ResumeEvaluation {
    /// A record with every field empty; the shape invariants still hold.
    pub fn empty() -> Self {
        ResumeEvaluation {
            recommended_role: None,
            total_score: None,
            suitability: RoleSuitability::default(),
            criteria_scores: Criterion::ALL.into_iter().map(|c| (c, None)).collect(),
            criteria_details: BTreeMap::new(),
            red_flags: Vec::new(),
            bonus_points: Vec::new(),
        }
    }

    /// True when normalization recovered nothing from the payload.
    pub fn is_empty(&self) -> bool {
        self.total_score.is_none()
            && self.criteria_scores.values().all(Option::is_none)
            && self.criteria_details.values().all(CriterionDetail::is_empty)
            && self.red_flags.is_empty()
            && self.bonus_points.is_empty()
    }
}

/// Normalized interview scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewScenario {
    pub selected_problem: Option<String>,
    pub competencies_needing_deeper_evaluation: Vec<String>,
    pub questions: Vec<String>,
}

impl InterviewScenario {
    pub fn is_empty(&self) -> bool {
        self.selected_problem.is_none()
            && self.competencies_needing_deeper_evaluation.is_empty()
            && self.questions.is_empty()
    }
}
