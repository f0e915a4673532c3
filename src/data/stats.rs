use serde::Deserialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsSummary {
    pub total_students: u64,
    pub active_students: u64,
    pub inactive_students: u64,
    pub course_distribution: HashMap<String, u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CourseShare<'a> {
    pub course: &'a str,
    pub count: u64,
    /// `None` when there are no students at all
    pub percentage: Option<f64>,
}

impl CourseShare<'_> {
    pub fn percentage_label(&self) -> String {
        self.percentage
            .map_or_else(|| "0".to_string(), |pct| format!("{pct:.1}"))
    }

    pub fn bar_width(&self) -> f64 {
        self.percentage.unwrap_or(0.0)
    }
}

impl StatisticsSummary {
    pub fn course_count(&self) -> usize {
        self.course_distribution.len()
    }

    /// Biggest course first. Ties come out in whatever order the map gives.
    pub fn sorted_distribution(&self) -> Vec<CourseShare<'_>> {
        let mut shares: Vec<_> = self
            .course_distribution
            .iter()
            .map(|(course, &count)| CourseShare {
                course,
                count,
                percentage: percentage(count, self.total_students),
            })
            .collect();
        shares.sort_by(|a, b| b.count.cmp(&a.count));
        shares
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn percentage(count: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| count as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: u64, courses: &[(&str, u64)]) -> StatisticsSummary {
        StatisticsSummary {
            total_students: total,
            active_students: total,
            inactive_students: 0,
            course_distribution: courses
                .iter()
                .map(|(name, count)| ((*name).to_string(), *count))
                .collect(),
        }
    }

    #[test]
    fn sorts_by_descending_count() {
        let stats = summary(10, &[("Civil", 1), ("Computer Science", 6), ("Mechanical", 3)]);
        let order: Vec<_> = stats.sorted_distribution().iter().map(|s| s.course).collect();
        assert_eq!(order, ["Computer Science", "Mechanical", "Civil"]);
    }

    #[test]
    fn zero_total_means_zero_percent() {
        let stats = summary(0, &[("Computer Science", 2), ("Civil", 1)]);
        for share in stats.sorted_distribution() {
            assert_eq!(share.percentage, None);
            assert_eq!(share.percentage_label(), "0");
            assert!(share.bar_width().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn percentages_have_one_decimal() {
        let stats = summary(3, &[("Computer Science", 1)]);
        assert_eq!(stats.sorted_distribution()[0].percentage_label(), "33.3");
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let stats: StatisticsSummary =
            serde_json::from_value(serde_json::json!({"totalStudents": 4})).unwrap();
        assert_eq!(stats.total_students, 4);
        assert_eq!(stats.active_students, 0);
        assert_eq!(stats.course_count(), 0);
    }
}
