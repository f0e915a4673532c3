use crate::{
    data::{
        page::PageToken,
        student::{StudentId, StudentRecord, StudentStatus},
    },
    error::{RegistrarError, RegistrarResult, StudentNotCachedSnafu},
    gateway::Gateway,
    reply::{Navigation, Toasts},
};
use snafu::OptionExt;
use std::collections::HashMap;
use tokio::sync::Mutex;

pub const NOT_FOUND_MESSAGE: &str = "Student not found";
pub const DELETED_MESSAGE: &str = "Student deleted successfully";

/// Handed out when a list request is dispatched; only the newest one gets to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct ListState {
    all_students: Vec<StudentRecord>,
    pending_delete: Option<StudentId>,
    latest_ticket: u64,
    last_used: u64,
}

impl ListState {
    fn dispatch(&mut self) -> Ticket {
        self.latest_ticket += 1;
        Ticket(self.latest_ticket)
    }

    const fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// Swaps the cache out wholesale, unless something newer has been dispatched since.
    fn settle(&mut self, ticket: Ticket, students: Vec<StudentRecord>) -> Listing {
        if !self.is_latest(ticket) {
            debug!(?ticket, latest = self.latest_ticket, "Discarding superseded list response");
            return Listing::Superseded;
        }

        self.all_students = students;
        Listing::Students(self.all_students.clone())
    }

    pub fn find(&self, id: StudentId) -> RegistrarResult<&StudentRecord> {
        self.all_students
            .iter()
            .find(|student| student.id == id)
            .context(StudentNotCachedSnafu { id })
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.all_students
    }

    pub const fn pending_delete(&self) -> Option<StudentId> {
        self.pending_delete
    }
}

/// What a load/search/filter produced for the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Listing {
    Students(Vec<StudentRecord>),
    /// the full load failed, so the table shows an error row
    LoadFailed,
    /// a search or filter failed, the table stays as it was
    Unchanged,
    /// a newer request was dispatched while this one was in flight
    Superseded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletePrompt {
    pub id: StudentId,
    /// `First Last (email)`
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    NothingPending,
    Failed,
    Deleted(Listing),
}

/// Open list pages remembered at once. The least recently used is forgotten first.
pub const MAX_PAGES: usize = 64;

#[derive(Debug, Default)]
struct Pages {
    by_token: HashMap<PageToken, ListState>,
    clock: u64,
}

impl Pages {
    fn page(&mut self, token: PageToken) -> &mut ListState {
        self.clock += 1;

        if !self.by_token.contains_key(&token) && self.by_token.len() >= MAX_PAGES {
            let oldest = self
                .by_token
                .iter()
                .min_by_key(|(_, state)| state.last_used)
                .map(|(token, _)| *token);
            if let Some(oldest) = oldest {
                debug!(%oldest, "Forgetting least recently used list page");
                self.by_token.remove(&oldest);
            }
        }

        let state = self.by_token.entry(token).or_default();
        state.last_used = self.clock;
        state
    }
}

#[derive(Debug)]
pub struct ListController {
    gateway: Gateway,
    pages: Mutex<Pages>,
}

impl ListController {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            pages: Mutex::new(Pages::default()),
        }
    }

    pub async fn cached_students(&self, page: PageToken) -> Vec<StudentRecord> {
        self.pages.lock().await.page(page).students().to_vec()
    }

    pub async fn pending_delete(&self, page: PageToken) -> Option<StudentId> {
        self.pages.lock().await.page(page).pending_delete()
    }

    async fn dispatch(&self, page: PageToken) -> Ticket {
        self.pages.lock().await.page(page).dispatch()
    }

    async fn settle(&self, page: PageToken, ticket: Ticket, students: Vec<StudentRecord>) -> Listing {
        self.pages.lock().await.page(page).settle(ticket, students)
    }

    pub async fn load_all(&self, page: PageToken, toasts: &mut Toasts) -> Listing {
        let ticket = self.dispatch(page).await;

        match self.gateway.list_students(toasts).await {
            Ok(students) => self.settle(page, ticket, students).await,
            Err(e) => {
                error!(?e, %page, "Error loading students");
                if self.pages.lock().await.page(page).is_latest(ticket) {
                    Listing::LoadFailed
                } else {
                    Listing::Superseded
                }
            }
        }
    }

    pub async fn search(&self, page: PageToken, keyword: &str, toasts: &mut Toasts) -> Listing {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.load_all(page, toasts).await;
        }

        let ticket = self.dispatch(page).await;
        match self.gateway.search_students(keyword, toasts).await {
            Ok(students) => {
                let found = students.len();
                let listing = self.settle(page, ticket, students).await;
                if matches!(listing, Listing::Students(_)) {
                    toasts.info(format!("Found {found} student(s) matching \"{keyword}\""));
                }
                listing
            }
            Err(e) => {
                error!(?e, ?keyword, "Error searching students");
                Listing::Unchanged
            }
        }
    }

    pub async fn filter_by_status(
        &self,
        page: PageToken,
        status: Option<StudentStatus>,
        toasts: &mut Toasts,
    ) -> Listing {
        let Some(status) = status else {
            return self.load_all(page, toasts).await;
        };

        let ticket = self.dispatch(page).await;
        match self.gateway.students_by_status(status, toasts).await {
            Ok(students) => self.settle(page, ticket, students).await,
            Err(e) => {
                error!(?e, ?status, "Error filtering students");
                Listing::Unchanged
            }
        }
    }

    /// Straight out of the page's cache, no backend call.
    pub async fn view_details(
        &self,
        page: PageToken,
        id: StudentId,
        toasts: &mut Toasts,
    ) -> Option<StudentRecord> {
        match self.pages.lock().await.page(page).find(id) {
            Ok(student) => Some(student.clone()),
            Err(e) => {
                not_found(&e, toasts);
                None
            }
        }
    }

    #[allow(clippy::unused_self)] //every list action hangs off the controller
    pub fn edit(&self, id: StudentId) -> Navigation {
        Navigation::Now(format!("/students/form?id={id}"))
    }

    pub async fn request_delete(
        &self,
        page: PageToken,
        id: StudentId,
        toasts: &mut Toasts,
    ) -> Option<DeletePrompt> {
        let mut pages = self.pages.lock().await;
        let state = pages.page(page);
        let label = match state.find(id) {
            Ok(student) => format!("{} ({})", student.full_name(), student.email),
            Err(e) => {
                not_found(&e, toasts);
                return None;
            }
        };

        state.pending_delete = Some(id);
        Some(DeletePrompt { id, label })
    }

    /// Deletes `id` only if it is what this page's open prompt asked about. A
    /// confirmation from an older prompt sends nothing to the backend.
    pub async fn confirm_delete(
        &self,
        page: PageToken,
        id: StudentId,
        toasts: &mut Toasts,
    ) -> DeleteOutcome {
        let pending = self.pending_delete(page).await;
        if pending != Some(id) {
            debug!(?pending, %id, %page, "Confirmation does not match the open prompt");
            return DeleteOutcome::NothingPending;
        }

        if let Err(e) = self.gateway.delete_student(id, toasts).await {
            error!(?e, %id, "Error deleting student");
            return DeleteOutcome::Failed;
        }

        info!(%id, "Deleted student");
        toasts.success(DELETED_MESSAGE);
        {
            let mut pages = self.pages.lock().await;
            let state = pages.page(page);
            if state.pending_delete == Some(id) {
                state.pending_delete = None;
            }
        }

        DeleteOutcome::Deleted(self.load_all(page, toasts).await)
    }
}

fn not_found(error: &RegistrarError, toasts: &mut Toasts) {
    warn!(?error, "Stale student list");
    toasts.error(NOT_FOUND_MESSAGE);
}
