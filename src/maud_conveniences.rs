use maud::{Markup, Render, html};

pub const BUTTON: &str = "font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline";
pub const INPUT: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

pub fn render_table<const N: usize>(
    titles: [&'static str; N],
    tbody_id: &'static str,
    rows: Markup,
) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                thead class="bg-gray-700" {
                    tr {
                        @for title in titles {
                            th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                        }
                    }
                }
                tbody id=(tbody_id) {
                    (rows)
                }
            }
        }
    }
}

/// A row that spans the whole table, for "nothing here" and "that broke".
pub fn spanning_row(columns: usize, classes: &str, contents: impl Render) -> Markup {
    html! {
        tr {
            td colspan=(columns) class={"py-4 px-4 text-center " (classes)} {(contents)}
        }
    }
}

pub fn td(contents: impl Render) -> Markup {
    html! {
        td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(contents)}
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, element: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2" {(label)}
            (element)
        }
    }
}

pub fn render_nav() -> Markup {
    html! {
        nav class="bg-gray-800 p-4 w-full absolute top-0 left-0 right-0" {
            div class="container mx-auto flex justify-between items-center" {
                a href="/" class="text-white text-xl font-bold" {"Registrar"}
                div class="flex space-x-4" {
                    a href="/" class="text-gray-300 hover:text-white" {"Dashboard"}
                    a href="/students" class="text-gray-300 hover:text-white" {"Students"}
                    a href="/students/form" class="text-gray-300 hover:text-white" {"Add Student"}
                }
            }
        }
    }
}
