use crate::{
    data::stats::StatisticsSummary,
    maud_conveniences::{render_table, spanning_row, td, title},
};
use maud::{Markup, html};

pub const NO_COURSES_MESSAGE: &str = "No course data available";
const PLACEHOLDER: &str = "-";

fn counter(id: &str, label: &str, value: Option<String>) -> Markup {
    html! {
        div class="bg-gray-700 rounded p-4 flex flex-col items-center" {
            span id=(id) class="text-3xl font-bold" {(value.as_deref().unwrap_or(PLACEHOLDER))}
            span class="text-gray-400 text-sm" {(label)}
        }
    }
}

/// The four counters; `None` keeps the placeholders.
pub fn counters(stats: Option<&StatisticsSummary>) -> Markup {
    html! {
        div id="counters" class="grid grid-cols-4 gap-4" {
            (counter("total_students", "Total Students", stats.map(|s| s.total_students.to_string())))
            (counter("active_students", "Active", stats.map(|s| s.active_students.to_string())))
            (counter("inactive_students", "Inactive", stats.map(|s| s.inactive_students.to_string())))
            (counter("course_count", "Courses", stats.map(|s| s.course_count().to_string())))
        }
    }
}

pub fn distribution_rows(stats: &StatisticsSummary) -> Markup {
    let shares = stats.sorted_distribution();

    html! {
        @if shares.is_empty() {
            (spanning_row(3, "text-gray-400", NO_COURSES_MESSAGE))
        }
        @for share in shares {
            tr {
                (td(share.course))
                (td(share.count))
                (td(html! {
                    div class="flex items-center space-x-2" {
                        div class="bg-gray-600 rounded h-2 w-32" {
                            div class="bg-blue-500 rounded h-2" style={"width: " (share.percentage_label()) "%"} {}
                        }
                        span {(share.percentage_label()) "%"}
                    }
                }))
            }
        }
    }
}

/// Everything the dashboard fragment swaps in once the statistics arrive.
pub fn dashboard(stats: &StatisticsSummary) -> Markup {
    html! {
        (counters(Some(stats)))
        (render_table(["Course", "Students", "Share"], "course_distribution", distribution_rows(stats)))
    }
}

pub fn dashboard_page() -> Markup {
    html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full flex flex-col space-y-4" {
            (title("Dashboard"))
            div id="dashboard" class="flex flex-col space-y-4" hx-get="/internal/dashboard" hx-trigger="load" {
                (counters(None))
            }
            div class="flex flex-row space-x-4 justify-center" {
                a href="/students" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {"View Students"}
                a href="/students/form" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {"Add Student"}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: u64, courses: &[(&str, u64)]) -> StatisticsSummary {
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
    fn empty_distribution_gets_one_row() {
        let html = distribution_rows(&stats(0, &[])).into_string();
        assert_eq!(html.matches("<tr>").count(), 1);
        assert!(html.contains(NO_COURSES_MESSAGE));
    }

    #[test]
    fn no_students_means_zero_percent_everywhere() {
        let html = distribution_rows(&stats(0, &[("Computer Science", 2), ("Civil Engineering", 1)]))
            .into_string();
        assert_eq!(html.matches("<span>0%</span>").count(), 2);
        assert_eq!(html.matches("width: 0%").count(), 2);
    }

    #[test]
    fn counters_fill_in_or_keep_placeholders() {
        let placeholder = counters(None).into_string();
        assert_eq!(placeholder.matches(">-<").count(), 4);

        let filled = counters(Some(&stats(5, &[("Computer Science", 3), ("Civil Engineering", 2)])))
            .into_string();
        assert!(filled.contains(r#"<span id="total_students" class="text-3xl font-bold">5</span>"#));
        assert!(filled.contains(r#"<span id="course_count" class="text-3xl font-bold">2</span>"#));
    }

    #[test]
    fn rows_show_one_decimal_percentages() {
        let html = distribution_rows(&stats(3, &[("Computer Science", 2), ("Civil Engineering", 1)]))
            .into_string();
        assert!(html.contains("66.7%"));
        assert!(html.contains("33.3%"));
        assert!(html.find("Computer Science") < html.find("Civil Engineering"));
    }
}
