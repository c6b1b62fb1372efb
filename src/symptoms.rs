use crate::models::{PhysicalSymptom, SymptomLogEntry, SymptomTrends};

/// Frequency counts and averages over a set of daily logs.
/// Order of `logs` does not matter; absent fields are left out of their average.
pub fn aggregate(logs: &[SymptomLogEntry]) -> SymptomTrends {
    let mut trends = SymptomTrends::default();
    if logs.is_empty() {
        return trends;
    }

    for log in logs {
        for symptom in &log.physical_symptoms {
            *trends.most_common_symptoms.entry(*symptom).or_insert(0) += 1;
        }
        if let Some(mood) = log.mood {
            *trends.mood_distribution.entry(mood).or_insert(0) += 1;
        }
    }

    trends.average_pain_level = average(logs.iter().filter_map(|l| l.pain_level.map(f64::from)));
    trends.average_energy_level = average(logs.iter().filter_map(|l| l.energy_level.map(f64::from)));
    trends.average_sleep_hours = average(logs.iter().filter_map(|l| l.sleep_hours));
    trends.average_sleep_quality = average(logs.iter().filter_map(|l| l.sleep_quality.map(f64::from)));

    trends
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl SymptomTrends {
    /// Up to `n` symptoms, most frequent first. Ties keep label order.
    pub fn top_symptoms(&self, n: usize) -> Vec<(PhysicalSymptom, usize)> {
        let mut ranked: Vec<(PhysicalSymptom, usize)> = self
            .most_common_symptoms
            .iter()
            .map(|(s, c)| (*s, *c))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
