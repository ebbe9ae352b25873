use common::model::generation::merge_job;
use log::{info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::DashboardPage;
use crate::api::{generation, templates};
use crate::components::toast::{show_error, show_toast};
use crate::helpers::{confirm, trigger_download};

pub fn update(page: &mut DashboardPage, ctx: &Context<DashboardPage>, msg: Msg) -> bool {
    let api = &ctx.props().app.api;
    match msg {
        Msg::Loaded(result) => {
            page.loading = false;
            match result {
                Ok((templates, history)) => {
                    page.templates = templates;
                    page.history = history;
                    page.sync_polling(ctx);
                }
                Err(err) => {
                    warn!("dashboard load failed: {err}");
                    show_error("Failed to load dashboard data");
                }
            }
            true
        }
        Msg::Poll => {
            for id in page.jobs_to_poll() {
                let api = api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = generation::status(&api, &id).await;
                    link.send_message(Msg::Progress(id, result));
                });
            }
            false
        }
        Msg::Progress(id, result) => {
            page.polling.remove(&id);
            match result {
                Ok(progress) => {
                    let changed = merge_job(&mut page.history, &id, progress);
                    page.sync_polling(ctx);
                    changed
                }
                Err(err) => {
                    warn!("status of job {id} unavailable: {err}");
                    false
                }
            }
        }
        Msg::Delete(id) => {
            if page.deleting.contains(&id)
                || !confirm("Are you sure you want to delete this template?")
            {
                return false;
            }
            page.deleting.insert(id.clone());
            let api = api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = templates::delete(&api, &id).await;
                link.send_message(Msg::Deleted(id, result));
            });
            true
        }
        Msg::Deleted(id, result) => {
            page.deleting.remove(&id);
            match result {
                Ok(()) => {
                    info!("deleted template {id}");
                    page.templates.retain(|t| t.id != id);
                    show_toast("Template deleted successfully");
                }
                Err(err) => {
                    warn!("deleting template {id} failed: {err}");
                    show_error(&err.message_or("Failed to delete template"));
                }
            }
            true
        }
        Msg::Download(job) => {
            if !job.is_downloadable() || page.downloading.contains(&job.id) {
                return false;
            }
            page.downloading.insert(job.id.clone());
            let api = api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = generation::download(&api, &job.id).await;
                link.send_message(Msg::Downloaded(job.id.clone(), result));
            });
            true
        }
        Msg::Downloaded(id, result) => {
            page.downloading.remove(&id);
            let name = page
                .history
                .iter()
                .find(|job| job.id == id)
                .map(|job| job.download_name())
                .unwrap_or_else(|| "cards.pdf".to_string());
            let saved = result.and_then(|bytes| trigger_download(&bytes, &name, "application/pdf"));
            if let Err(err) = saved {
                warn!("download of job {id} failed: {err}");
                show_error("Failed to download PDF");
            }
            true
        }
    }
}
