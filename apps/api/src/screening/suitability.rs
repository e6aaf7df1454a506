//! Score-to-suitability derivation.
//!
//! Pure threshold logic: a total score in 0–30 maps to one verdict per role
//! level, and the three verdicts collapse to a single recommended role with
//! ties broken toward seniority.
//!
//! Source history carried two SPM tables (lower bound 15 vs 18); this module
//! pins the 18 table and the other is treated as a defect.

use crate::screening::models::{Role, RoleSuitability, Verdict};

/// Tier boundaries for one role. Totals below `borderline_min` are not
/// suitable, totals at or above `suitable_min` are suitable.
struct Thresholds {
    borderline_min: f64,
    suitable_min: f64,
}

const fn thresholds(role: Role) -> Thresholds {
    match role {
        // APM: ≤7 / 8–12 / ≥13
        Role::Apm => Thresholds {
            borderline_min: 8.0,
            suitable_min: 13.0,
        },
        // PM: ≤12 / 13–18 / ≥19
        Role::Pm => Thresholds {
            borderline_min: 13.0,
            suitable_min: 19.0,
        },
        // SPM: ≤18 / 19–23 / ≥24
        Role::Spm => Thresholds {
            borderline_min: 19.0,
            suitable_min: 24.0,
        },
    }
}

/// Verdict for a single role at a given total score.
pub fn verdict_for(role: Role, total: f64) -> Verdict {
    let t = thresholds(role);
    if !total.is_finite() || total < t.borderline_min {
        Verdict::NotSuitable
    } else if total < t.suitable_min {
        Verdict::Borderline
    } else {
        Verdict::Suitable
    }
}

/// Derives the per-role verdicts from a total score (0–30).
/// A missing or non-finite total resolves every role to not suitable.
pub fn derive_suitability(total: Option<f64>) -> RoleSuitability {
    match total {
        Some(t) if t.is_finite() => RoleSuitability {
            apm: verdict_for(Role::Apm, t),
            pm: verdict_for(Role::Pm, t),
            spm: verdict_for(Role::Spm, t),
        },
        _ => RoleSuitability::default(),
    }
}

/// Picks the single recommended role: the most senior suitable role, else the
/// most senior borderline role, else APM.
pub fn recommend_role(suitability: &RoleSuitability) -> Role {
    for role in Role::BY_SENIORITY {
        if suitability.get(role) == Verdict::Suitable {
            return role;
        }
    }
    for role in Role::BY_SENIORITY {
        if suitability.get(role) == Verdict::Borderline {
            return role;
        }
    }
    Role::Apm
}
