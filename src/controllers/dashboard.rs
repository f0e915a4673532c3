use crate::{data::stats::StatisticsSummary, gateway::Gateway, reply::Toasts};

#[derive(Debug)]
pub struct DashboardController {
    gateway: Gateway,
}

impl DashboardController {
    pub const fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// `None` leaves the counters on their placeholders; the gateway has
    /// already told the admin why.
    pub async fn load(&self, toasts: &mut Toasts) -> Option<StatisticsSummary> {
        self.gateway
            .statistics(toasts)
            .await
            .inspect_err(|e| error!(?e, "Error loading dashboard statistics"))
            .ok()
    }
}
