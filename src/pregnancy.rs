//! Pregnancy progress counted back from the due date.
//!
//! A full term is taken as 40 weeks (280 days), so the pregnancy is
//! dated from `due_date - 280 days`.

use chrono::NaiveDate;

use crate::date_math::add_days;
use crate::error::{CoreError, Result};
use crate::models::{FetalMilestone, PregnancyProgress, Trimester, TrimesterGuide};

const FULL_TERM_DAYS: i64 = 280;
const FULL_TERM_WEEKS: i64 = 40;

const MILESTONES: [(i64, &str, &str); 10] = [
    (4, "Poppy seed (2mm)", "Neural tube forms, heart begins to beat"),
    (8, "Raspberry (1.6cm)", "All major organs forming, limbs developing"),
    (12, "Lime (6cm)", "Reflexes developing, kidneys producing urine"),
    (16, "Avocado (11cm)", "Sex can be determined, hair and nails growing"),
    (20, "Banana (16cm)", "Hearing developed, movements felt by mom"),
    (24, "Corn (30cm)", "Lungs developing, brain growing rapidly"),
    (28, "Eggplant (37cm)", "Eyes can open, fat accumulating"),
    (32, "Coconut (42cm)", "Bones hardening, immune system developing"),
    (36, "Lettuce (47cm)", "Lungs nearly mature, gaining weight"),
    (40, "Watermelon (51cm)", "Ready for birth, fully developed"),
];

/// A new pregnancy cannot be tracked against a due date that already passed.
pub fn validate_due_date(due_date: NaiveDate, today: NaiveDate) -> Result<()> {
    if due_date < today {
        return Err(CoreError::DueDateInPast(due_date));
    }
    Ok(())
}

pub fn progress(due_date: NaiveDate, today: NaiveDate) -> PregnancyProgress {
    let dated_from = add_days(due_date, -FULL_TERM_DAYS);
    let elapsed = (today - dated_from).num_days();
    let weeks = elapsed.div_euclid(7);

    PregnancyProgress {
        due_date,
        weeks,
        days: elapsed.rem_euclid(7),
        weeks_remaining: (FULL_TERM_WEEKS - weeks).max(0),
        progress_percent: (weeks as f64 / FULL_TERM_WEEKS as f64 * 100.0).clamp(0.0, 100.0),
        trimester: trimester(weeks),
        size_comparison: size_comparison(weeks),
        milestone: milestone(weeks),
    }
}

pub fn trimester(weeks: i64) -> Trimester {
    if weeks < 13 {
        Trimester::First
    } else if weeks < 27 {
        Trimester::Second
    } else {
        Trimester::Third
    }
}

pub fn size_comparison(weeks: i64) -> &'static str {
    match weeks {
        i64::MIN..=10 => "Like a strawberry",
        11..=20 => "Like an avocado",
        21..=30 => "Like an eggplant",
        _ => "Like a watermelon",
    }
}

/// Nearest development milestone; ties go to the earlier week.
pub fn milestone(weeks: i64) -> FetalMilestone {
    let (week, size, development) = MILESTONES
        .iter()
        .copied()
        .min_by_key(|(w, _, _)| (w - weeks).abs())
        .unwrap_or(MILESTONES[0]);
    FetalMilestone {
        week,
        size,
        development,
    }
}

pub fn trimester_guide(trimester: Trimester) -> TrimesterGuide {
    match trimester {
        Trimester::First => TrimesterGuide {
            title: "First Trimester",
            description: "During the first trimester, your baby's body structure and organ systems develop. \
                Most miscarriages and birth defects occur during this period.",
            common_symptoms: &[
                "Morning sickness",
                "Fatigue",
                "Food cravings or aversions",
                "Mood swings",
                "Frequent urination",
            ],
            tips: &[
                "Take prenatal vitamins",
                "Stay hydrated",
                "Get plenty of rest",
                "Avoid alcohol, tobacco, and excessive caffeine",
            ],
        },
        Trimester::Second => TrimesterGuide {
            title: "Second Trimester",
            description: "The second trimester is often called the \"golden period\" of pregnancy. \
                Many women find that symptoms like nausea and fatigue improve.",
            common_symptoms: &[
                "Baby movements (\"quickening\")",
                "Growing belly",
                "Increased appetite",
                "Nasal congestion",
                "Skin changes",
            ],
            tips: &[
                "Start pregnancy exercises",
                "Use moisturizer to prevent stretch marks",
                "Sleep on your side with a pregnancy pillow",
                "Prepare for the baby's arrival",
            ],
        },
        Trimester::Third => TrimesterGuide {
            title: "Third Trimester",
            description: "Your baby continues to grow and mature. You may feel more uncomfortable \
                as your baby and uterus grow larger.",
            common_symptoms: &[
                "Shortness of breath",
                "Backaches",
                "Braxton Hicks contractions",
                "Swollen ankles and feet",
                "Difficulty sleeping",
            ],
            tips: &[
                "Practice breathing exercises for labor",
                "Keep track of baby's movements",
                "Prepare a hospital bag",
                "Learn signs of labor",
                "Rest and conserve energy",
            ],
        },
    }
}
