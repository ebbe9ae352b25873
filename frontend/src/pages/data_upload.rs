//! Data upload: pick a spreadsheet, preview it server-side, then hand it to
//! the designer through the uploaded-data store.

use common::model::cell_text;
use common::model::data::{DataPreview, StoredFile, UploadedDataFile, ValidationReport};
use common::model::template::Template;
use common::route::Route;
use common::upload::DATA_SHEET;
use log::{debug, info, warn};
use web_sys::File;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{data, templates, ApiError};
use crate::components::file_drop::FileDrop;
use crate::components::link::Link;
use crate::components::toast::{show_error, show_toast};
use crate::config::PREVIEW_ROWS;
use crate::context::AppContext;
use crate::helpers::{store_file, RequestTicket};

#[derive(Properties, PartialEq, Clone)]
pub struct DataUploadProps {
    pub app: AppContext,
    pub template_id: String,
}

pub enum Msg {
    TemplateLoaded(Result<Template, ApiError>),
    FileSelected(File),
    FileCleared,
    RequestPreview,
    /// Answers carry the selection they were requested for.
    PreviewLoaded(u64, Result<DataPreview, ApiError>),
    ValidationLoaded(u64, Result<ValidationReport, ApiError>),
    UseData,
    FileStored(Result<StoredFile, ApiError>),
}

pub struct DataUploadPage {
    /// Only used for the names of already mapped fields.
    template: Option<Template>,
    file: Option<File>,
    /// Advanced whenever the selected file changes or is cleared.
    selection: RequestTicket,
    preview: Option<DataPreview>,
    report: Option<ValidationReport>,
    previewing: bool,
    storing: bool,
}

impl DataUploadPage {
    fn mapped_fields(&self) -> Vec<String> {
        self.template
            .iter()
            .flat_map(|t| t.field_mappings.iter().map(|m| m.field_name.clone()))
            .collect()
    }

    fn designer_route(template_id: &str) -> Route {
        Route::Designer {
            template_id: template_id.to_string(),
            step: Some("mapping".to_string()),
        }
    }
}

impl Component for DataUploadPage {
    type Message = Msg;
    type Properties = DataUploadProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            template: None,
            file: None,
            selection: RequestTicket::default(),
            preview: None,
            report: None,
            previewing: false,
            storing: false,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let api = ctx.props().app.api.clone();
            let id = ctx.props().template_id.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::TemplateLoaded(templates::get(&api, &id).await));
            });
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let app = &ctx.props().app;
        match msg {
            Msg::TemplateLoaded(Ok(template)) => {
                self.template = Some(template);
                false
            }
            Msg::TemplateLoaded(Err(err)) => {
                // The page still works without it; only validation is skipped.
                debug!("template lookup failed: {err}");
                false
            }
            Msg::FileSelected(file) => {
                self.selection.advance();
                self.file = Some(file);
                self.preview = None;
                self.report = None;
                self.previewing = false;
                ctx.link().send_message(Msg::RequestPreview);
                true
            }
            Msg::FileCleared => {
                self.selection.advance();
                self.previewing = false;
                self.file = None;
                self.preview = None;
                self.report = None;
                true
            }
            Msg::RequestPreview => {
                let Some(file) = self.file.clone() else {
                    return false;
                };
                if self.previewing {
                    return false;
                }
                self.previewing = true;
                let ticket = self.selection.current();
                let api = app.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = data::preview(&api, &file).await;
                    link.send_message(Msg::PreviewLoaded(ticket, result));
                });
                true
            }
            Msg::PreviewLoaded(ticket, _) | Msg::ValidationLoaded(ticket, _)
                if !self.selection.is_current(ticket) =>
            {
                debug!("dropping answer for replaced file selection #{ticket}");
                false
            }
            Msg::PreviewLoaded(_, result) => {
                self.previewing = false;
                match result {
                    Ok(preview) => {
                        info!(
                            "previewed {} columns, {} rows",
                            preview.columns.len(),
                            preview.total_rows
                        );
                        self.preview = Some(preview);
                        show_toast("Data preview loaded successfully");
                        self.request_validation(ctx);
                    }
                    Err(err) => {
                        warn!("data preview failed: {err}");
                        show_error(&err.message_or("Failed to preview data"));
                    }
                }
                true
            }
            Msg::ValidationLoaded(_, Ok(report)) => {
                self.report = Some(report);
                true
            }
            Msg::ValidationLoaded(_, Err(err)) => {
                warn!("data validation failed: {err}");
                false
            }
            Msg::UseData => {
                let (Some(file), Some(_)) = (self.file.clone(), &self.preview) else {
                    show_error("Please select and preview a data file first");
                    return false;
                };
                if self.storing {
                    return false;
                }
                self.storing = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::FileStored(store_file(&file).await));
                });
                true
            }
            Msg::FileStored(result) => {
                self.storing = false;
                let stored = match result {
                    Ok(stored) => stored,
                    Err(err) => {
                        warn!("reading data file failed: {err}");
                        show_error("Failed to read the selected file");
                        return true;
                    }
                };
                let Some(preview) = self.preview.clone() else {
                    return true;
                };
                let record = UploadedDataFile { file: stored, preview };
                match app.uploads.publish(&record) {
                    Ok(()) => {
                        show_toast("Data uploaded successfully!");
                        app.go(Self::designer_route(&ctx.props().template_id));
                        false
                    }
                    Err(err) => {
                        warn!("storing data file failed: {err}");
                        show_error("Failed to store uploaded file");
                        true
                    }
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="page">
                <div class="page-header">
                    <Link
                        to={Route::designer(props.template_id.clone())}
                        navigate={props.app.navigate.clone()}
                        class="btn btn-ghost"
                    >
                        <span class="material-icons">{"arrow_back"}</span>
                        {"Back to Designer"}
                    </Link>
                    <h1>{"Upload Data"}</h1>
                </div>
                <div class="split-layout">
                    <div class="split-main">
                        { self.build_upload_card(ctx) }
                        if let Some(preview) = &self.preview {
                            { build_preview(preview) }
                        }
                        if let Some(report) = &self.report {
                            { build_report(report) }
                        }
                    </div>
                    <aside class="split-side">
                        { build_guidelines() }
                        if self.preview.is_some() {
                            { self.build_continue(ctx) }
                        }
                    </aside>
                </div>
            </div>
        }
    }
}

impl DataUploadPage {
    fn request_validation(&self, ctx: &Context<Self>) {
        let fields = self.mapped_fields();
        let Some(file) = self.file.clone().filter(|_| !fields.is_empty()) else {
            return;
        };
        let ticket = self.selection.current();
        let api = ctx.props().app.api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = data::validate(&api, &file, &fields).await;
            link.send_message(Msg::ValidationLoaded(ticket, result));
        });
    }

    fn build_upload_card(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let busy = self.previewing || self.storing;
        html! {
            <div class="card">
                <h3 class="card-title">{"Upload Data File"}</h3>
                <FileDrop
                    rules={DATA_SHEET}
                    disabled={busy}
                    on_select={link.callback(Msg::FileSelected)}
                    on_clear={link.callback(|_: ()| Msg::FileCleared)}
                >
                    if self.preview.is_some() {
                        <p class="success-text">{"File loaded successfully"}</p>
                    } else {
                        <button class="btn btn-outline" disabled={busy}
                            onclick={link.callback(|_| Msg::RequestPreview)}>
                            { if self.previewing { "Loading preview..." } else { "Preview Data" } }
                        </button>
                    }
                </FileDrop>
            </div>
        }
    }

    fn build_continue(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="card">
                <h3 class="card-title">{"Ready to Continue?"}</h3>
                <p class="hint">{"Your data is ready. Continue to the designer to map the columns."}</p>
                <button
                    class="btn btn-primary btn-block"
                    disabled={self.storing}
                    onclick={ctx.link().callback(|_| Msg::UseData)}
                >
                    { if self.storing { "Processing..." } else { "Use this data" } }
                </button>
            </div>
        }
    }
}

fn build_preview(preview: &DataPreview) -> Html {
    html! {
        <div class="card">
            <h3 class="card-title">{ format!("Data Preview ({} total rows)", preview.total_rows) }</h3>
            <h4>{ format!("Available Columns ({})", preview.columns.len()) }</h4>
            <div class="chip-row">
                { for preview.columns.iter().map(|c| html! { <span class="chip">{ c.clone() }</span> }) }
            </div>
            <h4>{ format!("Sample Data (First {PREVIEW_ROWS} rows)") }</h4>
            <div class="table-wrap">
                <table class="table">
                    <thead>
                        <tr>{ for preview.columns.iter().map(|c| html! { <th>{ c.clone() }</th> }) }</tr>
                    </thead>
                    <tbody>
                        { for preview.sample_data.iter().take(PREVIEW_ROWS).map(|row| html! {
                            <tr>
                                { for preview.columns.iter().map(|column| {
                                    let text = row.get(column).map(cell_text).unwrap_or_default();
                                    let text = if text.is_empty() { "-".to_string() } else { text };
                                    html! { <td>{ text }</td> }
                                }) }
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

fn build_report(report: &ValidationReport) -> Html {
    let (class, icon, text) = if report.valid {
        ("report report-ok", "check_circle", "Every mapped field has a matching column.".to_string())
    } else if report.missing_fields.is_empty() {
        ("report report-warn", "warning", "The file did not pass validation.".to_string())
    } else {
        (
            "report report-warn",
            "warning",
            format!("Missing columns for mapped fields: {}", report.missing_fields.join(", ")),
        )
    };
    html! {
        <div class={class}>
            <span class="material-icons">{ icon }</span>
            <div>
                <p>{ text }</p>
                if let Some(message) = &report.message {
                    <p class="hint">{ message.clone() }</p>
                }
            </div>
        </div>
    }
}

fn build_guidelines() -> Html {
    html! {
        <div class="card">
            <h3 class="card-title">{"Data Guidelines"}</h3>
            <ul class="guidelines">
                <li>{"The first row must contain the column headers."}</li>
                <li>{"Use one row per ID card."}</li>
                <li>{"Name columns after your template fields, e.g. name, roll_no, department."}</li>
                <li>{"A column named photo is shown as a photo placeholder in the preview."}</li>
                <li>{"CSV and Excel files up to 10MB are supported."}</li>
            </ul>
        </div>
    }
}
