//! Drop zone plus hidden file input used by both upload pages.
//!
//! A picked file is checked against the zone's [`FileRules`] before the parent
//! hears about it; rejected files only raise a toast.

use common::upload::{file_kind_label, format_file_size, FileRules};
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, HtmlInputElement, Url};
use yew::prelude::*;

use super::toast::show_error;

pub enum Msg {
    DragActive(bool),
    Picked(File),
    Clear,
}

#[derive(Properties, PartialEq)]
pub struct FileDropProps {
    pub rules: FileRules,
    pub on_select: Callback<File>,
    #[prop_or_default]
    pub on_clear: Callback<()>,
    #[prop_or_default]
    pub disabled: bool,
    /// Show a thumbnail of the picked image.
    #[prop_or_default]
    pub image_preview: bool,
    /// Actions rendered under the picked file.
    #[prop_or_default]
    pub children: Html,
}

pub struct FileDrop {
    drag_active: bool,
    selected: Option<File>,
    preview_url: Option<String>,
    input_ref: NodeRef,
}

impl FileDrop {
    fn release_preview(&mut self) {
        if let Some(url) = self.preview_url.take() {
            let _ = Url::revoke_object_url(&url);
        }
    }
}

impl Component for FileDrop {
    type Message = Msg;
    type Properties = FileDropProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            drag_active: false,
            selected: None,
            preview_url: None,
            input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::DragActive(active) => {
                let changed = self.drag_active != active;
                self.drag_active = active;
                changed
            }
            Msg::Picked(file) => {
                self.drag_active = false;
                let rules = ctx.props().rules;
                if let Err(err) = rules.check(&file.type_(), file.size() as u64) {
                    debug!("rejected {} ({}): {err}", file.name(), file.type_());
                    show_error(&err.to_string());
                    return true;
                }
                self.release_preview();
                if ctx.props().image_preview {
                    self.preview_url = Url::create_object_url_with_blob(&file).ok();
                }
                self.selected = Some(file.clone());
                ctx.props().on_select.emit(file);
                true
            }
            Msg::Clear => {
                self.release_preview();
                self.selected = None;
                if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                    input.set_value("");
                }
                ctx.props().on_clear.emit(());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.selected {
            Some(file) => self.view_selected(ctx, file),
            None => self.view_zone(ctx),
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.release_preview();
    }
}

impl FileDrop {
    fn view_zone(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();

        let ondragover = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::DragActive(true)
        });
        let ondragleave = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::DragActive(false)
        });
        let ondrop = link.batch_callback(|e: DragEvent| {
            e.prevent_default();
            e.stop_propagation();
            let file = e
                .data_transfer()
                .and_then(|t| t.files())
                .and_then(|files| files.get(0));
            match file {
                Some(file) => vec![Msg::Picked(file)],
                None => vec![Msg::DragActive(false)],
            }
        });
        let onchange = link.batch_callback(|e: Event| {
            e.target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0))
                .map(Msg::Picked)
        });

        html! {
            <div
                class={classes!("drop-zone", self.drag_active.then_some("active"))}
                ondragenter={ondragover.clone()}
                {ondragover}
                {ondragleave}
                {ondrop}
            >
                <input
                    ref={self.input_ref.clone()}
                    type="file"
                    class="drop-input"
                    accept={props.rules.accept}
                    disabled={props.disabled}
                    {onchange}
                />
                <span class="material-icons drop-icon">{"upload_file"}</span>
                <p><strong>{"Click to upload"}</strong>{" or drag and drop"}</p>
                <p class="hint">{ props.rules.hint }</p>
            </div>
        }
    }

    fn view_selected(&self, ctx: &Context<Self>, file: &File) -> Html {
        let props = ctx.props();
        let kind = if props.image_preview {
            "Image"
        } else {
            file_kind_label(&file.type_())
        };

        html! {
            <div class="file-picked">
                <button
                    class="icon-btn file-remove"
                    title="Remove file"
                    disabled={props.disabled}
                    onclick={ctx.link().callback(|_| Msg::Clear)}
                >
                    <span class="material-icons">{"close"}</span>
                </button>
                if let Some(url) = &self.preview_url {
                    <img class="file-thumb" src={url.clone()} alt="Template preview" />
                }
                <div class="file-info">
                    <p class="file-name">{ file.name() }</p>
                    <p class="hint">{ format!("{kind} • {}", format_file_size(file.size() as u64)) }</p>
                </div>
                <div class="file-actions">{ props.children.clone() }</div>
            </div>
        }
    }
}
