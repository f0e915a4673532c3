use crate::{
    config::RuntimeConfiguration,
    controllers::{
        dashboard::DashboardController, form::FormController, list::ListController,
    },
    error::RegistrarResult,
    gateway::Gateway,
    maud_conveniences::render_nav,
    reply::{Reply, Toasts},
};
use jiff::civil::Date;
use maud::{DOCTYPE, Markup, html};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RegistrarState {
    config: RuntimeConfiguration,
    list: Arc<ListController>,
    form: Arc<FormController>,
    dashboard: Arc<DashboardController>,
}

impl RegistrarState {
    pub fn new(config: RuntimeConfiguration) -> RegistrarResult<Self> {
        let gateway = Gateway::new(config.endpoints().clone())?;

        Ok(Self {
            list: Arc::new(ListController::new(gateway.clone())),
            form: Arc::new(FormController::new(gateway.clone())),
            dashboard: Arc::new(DashboardController::new(gateway)),
            config,
        })
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    pub fn list(&self) -> &ListController {
        &self.list
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn dashboard(&self) -> &DashboardController {
        &self.dashboard
    }

    pub fn today(&self) -> Date {
        self.config.date_locale().today()
    }

    pub fn reply(&self, toasts: Toasts) -> Reply {
        Reply::new(toasts, self.config.delays().toast_lifetime)
    }

    /// Full page shell. `extras` lands in the toast area, for anything raised
    /// while the page itself was being built.
    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //direct html! usage at the call sites
    pub fn render(&self, page_title: &str, markup: Markup, extras: Option<Markup>) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { (page_title) " | Registrar" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white pt-20 pb-8" {
                    (render_nav())
                    (markup)
                    div id="modal" {}
                    div id="toasts" class="fixed top-20 right-4 flex flex-col space-y-2 z-50" {
                        @if let Some(extras) = extras {
                            (extras)
                        }
                    }
                }
            }
        }
    }
}
