use std::collections::HashSet;

use common::model::generation::GenerationJob;
use common::model::template::Template;
use gloo_timers::callback::Interval;
use log::debug;
use yew::prelude::*;

use super::messages::Msg;
use crate::config::STATUS_POLL_MS;

pub struct DashboardPage {
    pub templates: Vec<Template>,
    pub history: Vec<GenerationJob>,
    /// True until the first load answers, successfully or not.
    pub loading: bool,
    /// Present while at least one job is pending or processing.
    pub poller: Option<Interval>,
    /// Template ids with a delete request in flight.
    pub deleting: HashSet<String>,
    /// Job ids with a download in flight.
    pub downloading: HashSet<String>,
    /// Job ids with a status request in flight.
    pub polling: HashSet<String>,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
            history: Vec::new(),
            loading: true,
            poller: None,
            deleting: HashSet::new(),
            downloading: HashSet::new(),
            polling: HashSet::new(),
        }
    }

    pub fn active_jobs(&self) -> impl Iterator<Item = &GenerationJob> {
        self.history.iter().filter(|job| job.status.is_active())
    }

    /// Active jobs without a status request in flight, now marked as polled.
    pub fn jobs_to_poll(&mut self) -> Vec<String> {
        let due: Vec<String> = self
            .history
            .iter()
            .filter(|job| job.status.is_active() && !self.polling.contains(&job.id))
            .map(|job| job.id.clone())
            .collect();
        self.polling.extend(due.iter().cloned());
        due
    }

    /// Starts or stops the status interval to match the history.
    pub fn sync_polling(&mut self, ctx: &Context<Self>) {
        let needed = self.active_jobs().next().is_some();
        match (needed, self.poller.is_some()) {
            (true, false) => {
                debug!("polling generation status every {STATUS_POLL_MS}ms");
                let link = ctx.link().clone();
                self.poller = Some(Interval::new(STATUS_POLL_MS, move || {
                    link.send_message(Msg::Poll)
                }));
            }
            (false, true) => {
                debug!("no active jobs, polling stopped");
                self.poller = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::generation::JobStatus;
    use pretty_assertions::assert_eq;

    fn job(id: &str, status: JobStatus) -> GenerationJob {
        GenerationJob {
            id: id.to_string(),
            template_name: "Staff".into(),
            data_file_name: "staff.csv".into(),
            generated_cards: 0,
            total_cards: 10,
            status,
            created_at: None,
            pdf_url: None,
        }
    }

    fn dashboard() -> DashboardPage {
        let mut page = DashboardPage::new();
        page.history = vec![
            job("1", JobStatus::Processing),
            job("2", JobStatus::Completed),
            job("3", JobStatus::Pending),
        ];
        page
    }

    #[test]
    fn only_active_jobs_are_polled() {
        let mut page = dashboard();
        assert_eq!(page.jobs_to_poll(), vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn slow_answers_are_not_polled_again() {
        let mut page = dashboard();
        page.jobs_to_poll();

        assert!(page.jobs_to_poll().is_empty());

        page.polling.remove("3");
        assert_eq!(page.jobs_to_poll(), vec!["3".to_string()]);
    }
}
