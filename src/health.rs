//! Cycle health scoring: variability statistics plus a fixed set of
//! rule-based insights.
//!
//! Rules are evaluated independently in a fixed order, so more than one
//! insight can fire for the same history:
//!
//! 1. cycle length bucket (always exactly one of short, long or normal)
//! 2. irregular variability
//! 3. short or long period duration
//! 4. heavy flow on a strict majority of records

use chrono::NaiveDate;

use crate::config::CycleConfig;
use crate::error::Result;
use crate::models::{
    CycleAnalysis, CyclePhase, FlowLevel, HealthInsight, InsightKind, InsightType, PeriodRecord,
    PhaseGuide, Severity,
};
use crate::prediction::{cycle_lengths, mean, sorted_history, std_deviation};

pub fn analyze(history: &[PeriodRecord], config: &CycleConfig) -> Result<CycleAnalysis> {
    for record in history {
        record.validate()?;
    }

    if history.len() < 2 {
        tracing::debug!(records = history.len(), "not enough history for health analysis");
        return Ok(CycleAnalysis {
            average_cycle_length: config.default_cycle_length,
            cycle_variability: 0,
            average_period_length: config.default_period_length,
            is_regular: true,
            insights: vec![insight(InsightKind::TrackMoreCycles)],
        });
    }

    let lengths = cycle_lengths(&sorted_history(history));
    let period_lengths: Vec<f64> = history
        .iter()
        .filter_map(PeriodRecord::length_days)
        .map(|d| d as f64)
        .collect();

    let average_cycle = mean(&lengths);
    let average_period = if period_lengths.is_empty() {
        config.default_period_length as f64
    } else {
        mean(&period_lengths)
    };
    let variability = std_deviation(&lengths);

    let is_regular = variability <= config.max_regular_variability
        && average_cycle >= config.min_regular_cycle as f64
        && average_cycle <= config.max_regular_cycle as f64;

    let heavy = history
        .iter()
        .filter(|r| r.flow_level == Some(FlowLevel::Heavy))
        .count();
    let mostly_heavy = heavy as f64 > history.len() as f64 * config.heavy_flow_share;

    let insights = insight_kinds(average_cycle, variability, average_period, mostly_heavy, config)
        .into_iter()
        .map(insight)
        .collect();

    Ok(CycleAnalysis {
        average_cycle_length: average_cycle.round() as i64,
        cycle_variability: variability.round() as i64,
        average_period_length: average_period.round() as i64,
        is_regular,
        insights,
    })
}

fn insight_kinds(
    average_cycle: f64,
    variability: f64,
    average_period: f64,
    mostly_heavy: bool,
    config: &CycleConfig,
) -> Vec<InsightKind> {
    let mut kinds = Vec::new();

    if average_cycle < config.min_regular_cycle as f64 {
        kinds.push(InsightKind::ShortCycles);
    } else if average_cycle > config.max_regular_cycle as f64 {
        kinds.push(InsightKind::LongCycles);
    } else {
        kinds.push(InsightKind::NormalCycles);
    }

    if variability > config.max_regular_variability {
        kinds.push(InsightKind::IrregularCycles);
    }

    if average_period < config.short_period_days {
        kinds.push(InsightKind::ShortPeriods);
    } else if average_period > config.long_period_days {
        kinds.push(InsightKind::LongPeriods);
    }

    if mostly_heavy {
        kinds.push(InsightKind::HeavyFlow);
    }

    kinds
}

/// Fixed copy for each insight.
pub fn insight(kind: InsightKind) -> HealthInsight {
    use InsightType::*;
    use Severity::*;

    let (insight_type, severity, title, description, recommendation) = match kind {
        InsightKind::TrackMoreCycles => (
            Info,
            Low,
            "Track More Cycles",
            "You need at least 2-3 cycles of data for accurate health insights.",
            "Continue tracking your periods to get personalized health insights.",
        ),
        InsightKind::ShortCycles => (
            Warning,
            Medium,
            "Short Menstrual Cycles",
            "Your average cycle length is shorter than normal (less than 21 days).",
            "Consider consulting with a healthcare provider to discuss potential causes such as thyroid issues or stress.",
        ),
        InsightKind::LongCycles => (
            Warning,
            Medium,
            "Long Menstrual Cycles",
            "Your average cycle length is longer than normal (more than 35 days).",
            "Long cycles may indicate PCOS or other hormonal imbalances. Consider speaking with a healthcare provider.",
        ),
        InsightKind::NormalCycles => (
            Success,
            Low,
            "Healthy Cycle Length",
            "Your cycle length is within the normal range (21-35 days).",
            "Continue maintaining your current lifestyle and tracking habits.",
        ),
        InsightKind::IrregularCycles => (
            Warning,
            Medium,
            "Irregular Cycle Pattern",
            "Your cycle lengths vary significantly from month to month.",
            "Track stress levels, sleep, and diet. Consider lifestyle modifications and consult a healthcare provider if irregularity persists.",
        ),
        InsightKind::ShortPeriods => (
            Warning,
            Medium,
            "Short Period Duration",
            "Your periods are shorter than average (less than 3 days).",
            "Short periods may indicate low estrogen levels. Consider discussing with a healthcare provider.",
        ),
        InsightKind::LongPeriods => (
            Warning,
            High,
            "Long Period Duration",
            "Your periods last longer than average (more than 7 days).",
            "Extended bleeding may indicate hormonal imbalances or other conditions. Consult with a healthcare provider.",
        ),
        InsightKind::HeavyFlow => (
            Warning,
            High,
            "Frequently Heavy Flow",
            "You experience heavy flow more than half the time.",
            "Heavy menstrual bleeding can lead to anemia. Consider tracking symptoms and consulting with a healthcare provider.",
        ),
    };

    HealthInsight {
        id: kind,
        insight_type,
        title: title.into(),
        description: description.into(),
        recommendation: recommendation.into(),
        severity,
    }
}

/// Phase of the cycle `today` falls in, from fixed day-offset thresholds.
pub fn current_cycle_phase(
    last_period_start: NaiveDate,
    average_cycle_length: i64,
    today: NaiveDate,
    config: &CycleConfig,
) -> CyclePhase {
    let days_since = (today - last_period_start).num_days();
    let midpoint = average_cycle_length as f64 / 2.0;

    if days_since <= config.menstrual_phase_days {
        CyclePhase::Menstrual
    } else if days_since as f64 <= midpoint - config.ovulation_phase_half_width {
        CyclePhase::Follicular
    } else if days_since as f64 <= midpoint + config.ovulation_phase_half_width {
        CyclePhase::Ovulation
    } else {
        CyclePhase::Luteal
    }
}

pub fn phase_guide(phase: CyclePhase) -> PhaseGuide {
    match phase {
        CyclePhase::Menstrual => PhaseGuide {
            title: "Menstrual Phase",
            description: "Your body is shedding the uterine lining. This is a time for rest and self-care.",
            tips: [
                "Stay hydrated and get plenty of rest",
                "Use heat therapy for cramps",
                "Eat iron-rich foods to replenish lost nutrients",
                "Practice gentle yoga or light stretching",
            ],
        },
        CyclePhase::Follicular => PhaseGuide {
            title: "Follicular Phase",
            description: "Estrogen levels are rising, and you may feel more energetic and optimistic.",
            tips: [
                "Take advantage of increased energy for new projects",
                "Focus on strength training and cardio",
                "Eat fresh, light foods",
                "Schedule important meetings or decisions",
            ],
        },
        CyclePhase::Ovulation => PhaseGuide {
            title: "Ovulation Phase",
            description: "You're at your most fertile. Energy and confidence are typically at their peak.",
            tips: [
                "This is your peak fertility window",
                "High-intensity workouts are great now",
                "Social activities and communication excel",
                "Consider scheduling important presentations",
            ],
        },
        CyclePhase::Luteal => PhaseGuide {
            title: "Luteal Phase",
            description: "Progesterone is dominant. You may feel more introspective and detail-oriented.",
            tips: [
                "Focus on detail-oriented tasks and organization",
                "Practice stress management techniques",
                "Eat complex carbohydrates to support mood",
                "Prepare for your upcoming period",
            ],
        },
    }
}
