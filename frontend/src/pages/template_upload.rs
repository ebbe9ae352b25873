//! Template upload: name, optional description and the card background image.
//!
//! The sidebar hosts the AI design assistant, which only returns advice and
//! never touches the template.

use common::forms::{
    validate_template_name, DesignSuggestionForm, FieldErrors, CARD_PURPOSES, ORGANIZATION_TYPES,
};
use common::model::suggestion::DesignSuggestion;
use common::model::template::Template;
use common::route::Route;
use common::upload::TEMPLATE_IMAGE;
use log::{info, warn};
use web_sys::File;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{field_error, input_value, select_options, select_value, textarea_value, PageProps};
use crate::api::{templates, ApiError};
use crate::components::file_drop::FileDrop;
use crate::components::link::Link;
use crate::components::toast::{show_error, show_toast};

/// The assistant offers the institutional organization kinds only.
const ASSISTANT_ORGANIZATIONS: usize = 5;

pub enum Msg {
    SetName(String),
    SetDescription(String),
    FileSelected(File),
    FileCleared,
    Upload,
    Uploaded(Result<Template, ApiError>),
    ToggleAssistant,
    EditAssistant(fn(&mut DesignSuggestionForm, String), String),
    RequestSuggestions,
    SuggestionsLoaded(Result<Vec<DesignSuggestion>, ApiError>),
}

pub struct TemplateUploadPage {
    name: String,
    description: String,
    name_errors: FieldErrors,
    file: Option<File>,
    uploading: bool,
    assistant_open: bool,
    assistant: DesignSuggestionForm,
    assistant_errors: FieldErrors,
    assistant_loading: bool,
    suggestions: Vec<DesignSuggestion>,
}

impl Component for TemplateUploadPage {
    type Message = Msg;
    type Properties = PageProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            name_errors: FieldErrors::default(),
            file: None,
            uploading: false,
            assistant_open: false,
            assistant: DesignSuggestionForm::default(),
            assistant_errors: FieldErrors::default(),
            assistant_loading: false,
            suggestions: Vec::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let app = &ctx.props().app;
        match msg {
            Msg::SetName(name) => {
                self.name = name;
                self.name_errors = FieldErrors::default();
                true
            }
            Msg::SetDescription(description) => {
                self.description = description;
                true
            }
            Msg::FileSelected(file) => {
                self.file = Some(file);
                true
            }
            Msg::FileCleared => {
                self.file = None;
                true
            }
            Msg::Upload => {
                let Some(file) = self.file.clone() else {
                    return false;
                };
                if self.uploading {
                    return false;
                }
                let name = match validate_template_name(&self.name) {
                    Ok(name) => name,
                    Err(errors) => {
                        if let Some(message) = errors.get("name") {
                            show_error(message);
                        }
                        self.name_errors = errors;
                        return true;
                    }
                };
                self.uploading = true;
                let description = self.description.trim().to_string();
                let api = app.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let description = Some(description.as_str()).filter(|d| !d.is_empty());
                    let result = templates::upload(&api, &file, &name, description).await;
                    link.send_message(Msg::Uploaded(result));
                });
                true
            }
            Msg::Uploaded(result) => {
                self.uploading = false;
                match result {
                    Ok(template) => {
                        info!("uploaded template {} ({})", template.name, template.id);
                        show_toast("Template uploaded successfully!");
                        app.go(Route::designer(template.id));
                        false
                    }
                    Err(err) => {
                        warn!("template upload failed: {err}");
                        show_error(&err.message_or("Failed to upload template"));
                        true
                    }
                }
            }
            Msg::ToggleAssistant => {
                self.assistant_open = !self.assistant_open;
                self.assistant_errors = FieldErrors::default();
                true
            }
            Msg::EditAssistant(set, value) => {
                set(&mut self.assistant, value);
                true
            }
            Msg::RequestSuggestions => {
                if self.assistant_loading {
                    return false;
                }
                let request = match self.assistant.validate() {
                    Ok(request) => request,
                    Err(errors) => {
                        self.assistant_errors = errors;
                        return true;
                    }
                };
                self.assistant_errors = FieldErrors::default();
                self.assistant_loading = true;
                let api = app.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = templates::design_suggestions(&api, &request).await;
                    link.send_message(Msg::SuggestionsLoaded(result));
                });
                true
            }
            Msg::SuggestionsLoaded(result) => {
                self.assistant_loading = false;
                match result {
                    Ok(suggestions) => {
                        self.suggestions = suggestions;
                        self.assistant_open = false;
                        show_toast("AI suggestions generated!");
                    }
                    Err(err) => {
                        warn!("design suggestions failed: {err}");
                        show_error(&err.message_or("Failed to get AI suggestions"));
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="page">
                <div class="page-header">
                    <Link to={Route::Dashboard} navigate={ctx.props().app.navigate.clone()} class="btn btn-ghost">
                        <span class="material-icons">{"arrow_back"}</span>
                        {"Back to Dashboard"}
                    </Link>
                    <h1>{"Upload Template"}</h1>
                </div>
                <div class="split-layout">
                    <div class="split-main">
                        { self.build_details(ctx) }
                        { self.build_image_card(ctx) }
                    </div>
                    <aside class="split-side">
                        { self.build_assistant(ctx) }
                    </aside>
                </div>
            </div>
        }
    }
}

impl TemplateUploadPage {
    fn build_details(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let name_error = self.name_errors.get("name");
        html! {
            <div class="card">
                <h3 class="card-title">{"Template Details"}</h3>
                <div class="form-field">
                    <label for="template-name">{"Template Name *"}</label>
                    <input
                        id="template-name"
                        type="text"
                        class={classes!("input", name_error.is_some().then_some("input-error"))}
                        placeholder="e.g., Student ID Card 2024"
                        value={self.name.clone()}
                        oninput={link.callback(|e| Msg::SetName(input_value(e)))}
                    />
                    { field_error(name_error) }
                </div>
                <div class="form-field">
                    <label for="template-description">{"Description (Optional)"}</label>
                    <textarea
                        id="template-description"
                        class="input"
                        rows="3"
                        placeholder="Brief description of this template"
                        value={self.description.clone()}
                        oninput={link.callback(|e| Msg::SetDescription(textarea_value(e)))}
                    />
                </div>
            </div>
        }
    }

    fn build_image_card(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="card">
                <h3 class="card-title">{"Upload Template Image"}</h3>
                <FileDrop
                    rules={TEMPLATE_IMAGE}
                    image_preview={true}
                    disabled={self.uploading}
                    on_select={link.callback(Msg::FileSelected)}
                    on_clear={link.callback(|_: ()| Msg::FileCleared)}
                >
                    <button
                        class="btn btn-primary"
                        disabled={self.uploading}
                        onclick={link.callback(|_| Msg::Upload)}
                    >
                        <span class="material-icons">{"cloud_upload"}</span>
                        { if self.uploading { "Uploading..." } else { "Upload Template" } }
                    </button>
                </FileDrop>
            </div>
        }
    }

    fn build_assistant(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="card">
                <h3 class="card-title">
                    <span class="material-icons">{"auto_awesome"}</span>
                    {"AI Design Assistant"}
                </h3>
                <p class="hint">{"Describe your card and get layout and styling advice."}</p>
                if self.assistant_open {
                    { self.build_assistant_form(ctx) }
                } else {
                    <button class="btn btn-outline btn-block" onclick={link.callback(|_| Msg::ToggleAssistant)}>
                        {"Get AI Suggestions"}
                    </button>
                }
                if !self.suggestions.is_empty() {
                    <ul class="suggestion-list">
                        { for self.suggestions.iter().map(build_suggestion) }
                    </ul>
                }
            </div>
        }
    }

    fn build_assistant_form(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let errors = &self.assistant_errors;
        let on_org = link.callback(|e: Event| {
            Msg::EditAssistant(|f, v| f.organization_type = v, select_value(e))
        });
        let on_purpose = link.callback(|e: Event| {
            Msg::EditAssistant(|f, v| f.card_purpose = v, select_value(e))
        });
        let on_description = link.callback(|e: InputEvent| {
            Msg::EditAssistant(|f, v| f.template_description = v, textarea_value(e))
        });

        html! {
            <div class="assistant-form">
                <div class="form-field">
                    <label for="ai-organization">{"Organization Type"}</label>
                    <select id="ai-organization" class="input" onchange={on_org}>
                        { select_options("Select type", &ORGANIZATION_TYPES[..ASSISTANT_ORGANIZATIONS],
                            &self.assistant.organization_type) }
                    </select>
                    { field_error(errors.get("organization_type")) }
                </div>
                <div class="form-field">
                    <label for="ai-purpose">{"Card Purpose"}</label>
                    <select id="ai-purpose" class="input" onchange={on_purpose}>
                        { select_options("Select purpose", &CARD_PURPOSES, &self.assistant.card_purpose) }
                    </select>
                    { field_error(errors.get("card_purpose")) }
                </div>
                <div class="form-field">
                    <label for="ai-description">{"Template Description"}</label>
                    <textarea
                        id="ai-description"
                        class="input"
                        rows="3"
                        placeholder="Colors, logo placement, required information..."
                        value={self.assistant.template_description.clone()}
                        oninput={on_description}
                    />
                    { field_error(errors.get("template_description")) }
                </div>
                <div class="form-actions">
                    <button class="btn btn-ghost" disabled={self.assistant_loading}
                        onclick={link.callback(|_| Msg::ToggleAssistant)}>
                        {"Cancel"}
                    </button>
                    <button class="btn btn-primary" disabled={self.assistant_loading}
                        onclick={link.callback(|_| Msg::RequestSuggestions)}>
                        { if self.assistant_loading { "Generating..." } else { "Generate" } }
                    </button>
                </div>
            </div>
        }
    }
}

fn build_suggestion(suggestion: &DesignSuggestion) -> Html {
    html! {
        <li class="suggestion">
            if !suggestion.category.is_empty() {
                <span class="badge">{ suggestion.category.clone() }</span>
            }
            <p>{ suggestion.suggestion.clone() }</p>
            if let Some(reasoning) = &suggestion.reasoning {
                <p class="hint">{ reasoning.clone() }</p>
            }
        </li>
    }
}
