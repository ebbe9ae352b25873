use common::model::generation::{GenerationJob, JobStatus};
use common::model::template::Template;
use common::route::Route;
use common::stats::{self, format_date};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::DashboardPage;
use crate::components::card_grid::CardGrid;
use crate::components::link::Link;
use crate::components::spinner::Spinner;
use crate::config::HISTORY_ROWS;
use crate::helpers::{current_year_month, format_count};

pub fn view(page: &DashboardPage, ctx: &Context<DashboardPage>) -> Html {
    if page.loading {
        return html! { <Spinner label="Loading dashboard..." full_page={true} /> };
    }
    let app = &ctx.props().app;
    let organization = app
        .user
        .as_ref()
        .map(|u| u.organization_name.clone())
        .unwrap_or_default();

    html! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>{ format!("Welcome back, {organization}") }</h1>
                    <p class="hint">{"Manage your ID card templates and generation history"}</p>
                </div>
            </div>
            { build_stats(page) }
            { build_templates(page, ctx) }
            { build_history(page, ctx.link()) }
        </div>
    }
}

fn build_stats(page: &DashboardPage) -> Html {
    let (year, month) = current_year_month();
    let stats = stats::compute(page.templates.len(), &page.history, year, month);
    let tiles = [
        ("description", "Total Templates", format_count(stats.total_templates as u64)),
        ("badge", "Cards Generated", format_count(stats.total_cards)),
        ("calendar_month", "This Month", format_count(stats.cards_this_month)),
    ];

    html! {
        <CardGrid columns={3}>
            { for tiles.into_iter().map(|(icon, label, value)| html! {
                <div class="card stat-card">
                    <span class="material-icons stat-icon">{ icon }</span>
                    <div>
                        <p class="stat-label">{ label }</p>
                        <p class="stat-value">{ value }</p>
                    </div>
                </div>
            }) }
        </CardGrid>
    }
}

fn build_templates(page: &DashboardPage, ctx: &Context<DashboardPage>) -> Html {
    let navigate = ctx.props().app.navigate.clone();
    let body = if page.templates.is_empty() {
        html! {
            <div class="empty-state">
                <span class="material-icons">{"image"}</span>
                <p class="empty-title">{"No templates yet"}</p>
                <p class="hint">{"Upload your first template to get started"}</p>
            </div>
        }
    } else {
        html! {
            <CardGrid columns={3}>
                { for page.templates.iter().map(|t| build_template_card(page, ctx, t)) }
            </CardGrid>
        }
    };

    html! {
        <section class="section">
            <div class="section-header">
                <h2>{"Your Templates"}</h2>
                <Link to={Route::TemplateUpload} {navigate} class="btn btn-primary">
                    <span class="material-icons">{"add"}</span>
                    {"Upload Template"}
                </Link>
            </div>
            { body }
        </section>
    }
}

fn build_template_card(
    page: &DashboardPage,
    ctx: &Context<DashboardPage>,
    template: &Template,
) -> Html {
    let id = template.id.clone();
    let deleting = page.deleting.contains(&id);
    let on_delete = ctx.link().callback(move |_: MouseEvent| Msg::Delete(id.clone()));

    html! {
        <div class="card template-card" key={template.id.clone()}>
            <img class="template-thumb" src={template.template_url.clone()} alt={template.name.clone()} />
            <div class="template-body">
                <h3>{ template.name.clone() }</h3>
                if let Some(description) = template.description.as_ref().filter(|d| !d.is_empty()) {
                    <p class="hint">{ description.clone() }</p>
                }
                if let Some(created) = &template.created_at {
                    <p class="meta">{ format!("Created {}", format_date(created)) }</p>
                }
                <div class="template-actions">
                    <Link
                        to={Route::designer(template.id.clone())}
                        navigate={ctx.props().app.navigate.clone()}
                        class="btn btn-outline"
                    >
                        <span class="material-icons">{"edit"}</span>
                        {"Design"}
                    </Link>
                    <button class="icon-btn danger" title="Delete template" disabled={deleting} onclick={on_delete}>
                        <span class="material-icons">{"delete"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

fn build_history(page: &DashboardPage, link: &Scope<DashboardPage>) -> Html {
    let body = if page.history.is_empty() {
        html! {
            <div class="empty-state">
                <span class="material-icons">{"history"}</span>
                <p class="empty-title">{"No generation history"}</p>
                <p class="hint">{"Your ID card generation history will appear here"}</p>
            </div>
        }
    } else {
        html! {
            <div class="table-wrap">
                <table class="table">
                    <thead>
                        <tr>
                            <th>{"Template"}</th>
                            <th>{"Data File"}</th>
                            <th>{"Cards"}</th>
                            <th>{"Status"}</th>
                            <th>{"Created"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for page.history.iter().take(HISTORY_ROWS).map(|job| build_history_row(page, link, job)) }
                    </tbody>
                </table>
            </div>
        }
    };

    html! {
        <section class="section card">
            <h2>{"Recent Generation History"}</h2>
            { body }
        </section>
    }
}

fn status_icon(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Completed => "check_circle",
        JobStatus::Pending | JobStatus::Processing => "schedule",
        JobStatus::Failed => "error",
    }
}

fn build_history_row(page: &DashboardPage, link: &Scope<DashboardPage>, job: &GenerationJob) -> Html {
    let status = job.status.as_str();
    let created = job.created_at.as_deref().map(format_date).unwrap_or_default();
    let action = if job.is_downloadable() {
        let downloading = page.downloading.contains(&job.id);
        let onclick = {
            let job = job.clone();
            link.callback(move |_: MouseEvent| Msg::Download(job.clone()))
        };
        html! {
            <button class="btn btn-link" disabled={downloading} {onclick}>
                <span class="material-icons">{"download"}</span>
                { if downloading { "Downloading..." } else { "Download" } }
            </button>
        }
    } else {
        html! {}
    };

    html! {
        <tr key={job.id.clone()}>
            <td>{ job.template_name.clone() }</td>
            <td>{ job.data_file_name.clone() }</td>
            <td>{ format!("{}/{}", format_count(job.generated_cards), format_count(job.total_cards)) }</td>
            <td>
                <span class={classes!("status", format!("status-{status}"))}>
                    <span class="material-icons">{ status_icon(job.status) }</span>
                    { status }
                </span>
            </td>
            <td>{ created }</td>
            <td>{ action }</td>
        </tr>
    }
}
