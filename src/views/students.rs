use crate::{
    config::date_locale::DateLocaleConfig,
    controllers::list::{DeletePrompt, Listing},
    data::{
        page::PageToken,
        student::{StudentRecord, StudentStatus},
    },
    error::RegistrarResult,
    maud_conveniences::{BUTTON, render_table, spanning_row, td},
};
use jiff::civil::Date;
use maud::{Markup, html};

pub const LISTING_ID: &str = "students_listing";
pub const COLUMNS: [&str; 8] = [
    "ID", "Name", "Email", "Phone", "Course", "Year", "Status", "Actions",
];
pub const EMPTY_MESSAGE: &str = "No students found";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading students";

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 Student".to_string()
    } else {
        format!("{count} Students")
    }
}

pub fn badge(count: usize, out_of_band: bool) -> Markup {
    html! {
        span id="student_count" hx-swap-oob=[out_of_band.then_some("true")] class="bg-blue-600 text-white text-sm font-semibold px-3 py-1 rounded-full" {
            (count_label(count))
        }
    }
}

fn status_pill(status: StudentStatus) -> Markup {
    let classes = match status {
        StudentStatus::Active => "bg-green-700",
        StudentStatus::Inactive => "bg-gray-600",
    };
    html! {
        span class={"text-xs font-semibold px-2 py-1 rounded " (classes)} {(status.as_str())}
    }
}

fn student_row(student: &StudentRecord) -> Markup {
    let id = student.id.get();
    html! {
        tr {
            (td(id))
            (td(student))
            (td(&student.email))
            (td(&student.phone))
            (td(&student.course))
            (td(student.year))
            (td(status_pill(student.status)))
            (td(html! {
                div class="flex space-x-2" {
                    button hx-get={"/internal/students/" (id) "/details"} hx-target="#modal" class={(BUTTON) " bg-sky-600 hover:bg-sky-800"} {"View"}
                    button hx-get={"/internal/students/" (id) "/edit"} class={(BUTTON) " bg-amber-600 hover:bg-amber-800"} {"Edit"}
                    button hx-post={"/internal/students/" (id) "/delete"} hx-target="#modal" class={(BUTTON) " bg-red-600 hover:bg-red-800"} {"Delete"}
                }
            }))
        }
    }
}

/// Table body for a collection. Never empty: no students means one placeholder row.
pub fn rows(students: &[StudentRecord]) -> Markup {
    html! {
        @if students.is_empty() {
            (spanning_row(COLUMNS.len(), "text-gray-400", EMPTY_MESSAGE))
        } @else {
            @for student in students {
                (student_row(student))
            }
        }
    }
}

pub fn error_row() -> Markup {
    spanning_row(COLUMNS.len(), "text-red-400", LOAD_ERROR_MESSAGE)
}

/// What ends up in the table body, if anything.
pub fn listing(listing: &Listing) -> Option<Markup> {
    match listing {
        Listing::Students(students) => Some(html! {
            (rows(students))
            (badge(students.len(), true))
        }),
        Listing::LoadFailed => Some(error_row()),
        Listing::Unchanged | Listing::Superseded => None,
    }
}

/// Every request from inside the page carries `page` in its headers.
pub fn list_page(page: PageToken) -> Markup {
    html! {
        div hx-headers=(page.hx_headers()) class="bg-gray-800 p-8 rounded shadow-md max-w-6xl w-full flex flex-col space-y-4" {
            div class="flex flex-row justify-between items-center" {
                h1 class="text-2xl font-semibold" {"Students"}
                (badge(0, false))
            }
            div class="flex flex-row space-x-4" {
                input type="search" name="keyword" placeholder="Search by name, email or course..."
                    hx-get="/internal/students/search" hx-trigger="keyup[key=='Enter'], search" hx-target={"#" (LISTING_ID)}
                    class="shadow appearance-none border rounded flex-grow py-2 px-3 leading-tight bg-gray-700 border-gray-600" {}
                select name="status" hx-get="/internal/students/filter" hx-trigger="change" hx-target={"#" (LISTING_ID)}
                    class="shadow border rounded py-2 px-3 bg-gray-700 border-gray-600" {
                    option value="" {"All Statuses"}
                    @for status in StudentStatus::ALL {
                        option value=(status.as_str()) {(status.as_str())}
                    }
                }
                a href="/students/form" class={(BUTTON) " bg-blue-500 hover:bg-blue-700"} {"Add Student"}
            }
            (render_table(COLUMNS, LISTING_ID, html! {
                tr hx-get="/internal/students" hx-trigger="load" hx-target={"#" (LISTING_ID)} {
                    td colspan=(COLUMNS.len()) class="py-4 px-4 text-center text-gray-400" {"Loading..."}
                }
            }))
        }
    }
}

fn modal(contents: Markup) -> Markup {
    html! {
        div class="fixed inset-0 bg-black/60 flex items-center justify-center z-40" {
            div class="bg-gray-800 p-8 rounded shadow-md max-w-lg w-full" {
                (contents)
            }
        }
    }
}

/// Empties `#modal` from any response.
pub fn dismiss_modal() -> Markup {
    html! {
        div id="modal" hx-swap-oob="innerHTML" {}
    }
}

pub fn details(
    student: &StudentRecord,
    today: Date,
    dates: &DateLocaleConfig,
) -> RegistrarResult<Markup> {
    let date_of_birth = dates.medium_date(student.date_of_birth)?;
    let enrolled = student
        .enrollment_date
        .map(|date| dates.medium_date(date))
        .transpose()?;

    let rows: [(&str, Markup); 11] = [
        ("ID", html! {(student.id.get())}),
        ("Email", html! {(student.email)}),
        ("Phone", html! {(student.phone)}),
        ("Date of Birth", html! {(date_of_birth)}),
        ("Age", html! {(student.age_on(today)) " years"}),
        ("Gender", html! {(student.gender)}),
        ("Address", html! {(student.address)}),
        ("Course", html! {(student.course)}),
        ("Year", html! {(student.year)}),
        ("Status", status_pill(student.status)),
        ("Enrolled", html! {(enrolled.as_deref().unwrap_or("-"))}),
    ];

    Ok(modal(html! {
        h2 class="text-xl font-semibold mb-4" {(student)}
        dl class="grid grid-cols-2 gap-2 mb-6" {
            @for (label, value) in rows {
                dt class="text-gray-400" {(label)}
                dd {(value)}
            }
        }
        button type="button" onclick="document.getElementById('modal').replaceChildren()" class={(BUTTON) " bg-slate-600 hover:bg-slate-800"} {"Close"}
    }))
}

/// Lives in `#modal`, outside the list page, so it names the page itself.
pub fn delete_prompt(prompt: &DeletePrompt, page: PageToken) -> Markup {
    let id = prompt.id.get();
    modal(html! {
        h2 class="text-xl font-semibold mb-4" {"Delete Student"}
        p class="mb-6" {
            "Are you sure you want to delete " strong {(prompt.label)} "?"
        }
        div hx-headers=(page.hx_headers()) class="flex justify-end space-x-4" {
            button hx-post="/internal/students/delete/cancel" hx-target="#modal" class={(BUTTON) " bg-slate-600 hover:bg-slate-800"} {"Cancel"}
            button hx-post={"/internal/students/" (id) "/delete/confirm"} hx-target={"#" (LISTING_ID)} class={(BUTTON) " bg-red-600 hover:bg-red-800"} {"Delete"}
        }
    })
}
