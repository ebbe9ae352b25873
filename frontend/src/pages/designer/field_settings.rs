//! Settings sheet for one placed field.
//!
//! Edits are applied to a draft and only reach the designer on "Apply".

use common::fields::FieldEdit;
use common::model::template::{Alignment, FieldMapping};
use yew::prelude::*;

use crate::pages::{input_value, select_value};

#[derive(Properties, PartialEq)]
pub struct FieldSettingsProps {
    /// The field being edited; `None` renders nothing.
    pub field: Option<FieldMapping>,
    pub on_save: Callback<FieldMapping>,
    pub on_close: Callback<()>,
}

pub enum Msg {
    Edit(FieldEdit),
    Apply,
}

pub struct FieldSettings {
    draft: Option<FieldMapping>,
}

fn number_edit(make: fn(f64) -> FieldEdit, raw: String) -> Option<Msg> {
    raw.trim().parse::<f64>().ok().map(|v| Msg::Edit(make(v)))
}

impl Component for FieldSettings {
    type Message = Msg;
    type Properties = FieldSettingsProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            draft: ctx.props().field.clone(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().field != old_props.field {
            self.draft = ctx.props().field.clone();
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Edit(edit) => match &mut self.draft {
                Some(draft) => {
                    edit.apply(draft);
                    true
                }
                None => false,
            },
            Msg::Apply => {
                let Some(draft) = self.draft.clone() else {
                    return false;
                };
                if draft.field_name.trim().is_empty() {
                    return false;
                }
                ctx.props().on_save.emit(FieldMapping {
                    field_name: draft.field_name.trim().to_string(),
                    ..draft
                });
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(draft) = &self.draft else {
            return html! {};
        };
        let link = ctx.link();
        let on_close = ctx.props().on_close.reform(|_: MouseEvent| ());

        html! {
            <div class="field-settings">
                <div class="sheet-header">
                    <h3>{"Field Settings"}</h3>
                    <button class="icon-btn" title="Close" onclick={on_close.clone()}>
                        <span class="material-icons">{"close"}</span>
                    </button>
                </div>
                <div class="form-grid">
                    <div class="form-field">
                        <label for="field-name">{"Field Name"}</label>
                        <input id="field-name" class="input" type="text"
                            value={draft.field_name.clone()}
                            oninput={link.callback(|e| Msg::Edit(FieldEdit::Name(input_value(e))))} />
                    </div>
                    <div class="form-field">
                        <label for="field-width">{"Width"}</label>
                        <input id="field-width" class="input" type="number" min="1"
                            value={draft.width.to_string()}
                            oninput={link.batch_callback(|e| number_edit(FieldEdit::Width, input_value(e)))} />
                    </div>
                    <div class="form-field">
                        <label for="field-height">{"Height"}</label>
                        <input id="field-height" class="input" type="number" min="1"
                            value={draft.height.to_string()}
                            oninput={link.batch_callback(|e| number_edit(FieldEdit::Height, input_value(e)))} />
                    </div>
                    <div class="form-field">
                        <label for="field-font-size">{"Font Size"}</label>
                        <input id="field-font-size" class="input" type="number" min="1"
                            value={draft.font_size.to_string()}
                            oninput={link.batch_callback(|e| number_edit(FieldEdit::FontSize, input_value(e)))} />
                    </div>
                    <div class="form-field">
                        <label for="field-color">{"Font Color"}</label>
                        <input id="field-color" class="input" type="color"
                            value={draft.font_color.clone()}
                            oninput={link.callback(|e| Msg::Edit(FieldEdit::Color(input_value(e))))} />
                    </div>
                    <div class="form-field">
                        <label for="field-alignment">{"Alignment"}</label>
                        <select id="field-alignment" class="input"
                            onchange={link.batch_callback(|e| {
                                Alignment::parse(&select_value(e)).map(|a| Msg::Edit(FieldEdit::Alignment(a)))
                            })}>
                            { for Alignment::ALL.iter().map(|a| html! {
                                <option value={a.as_str()} selected={*a == draft.alignment}>{ a.as_str() }</option>
                            }) }
                        </select>
                    </div>
                </div>
                <div class="form-actions">
                    <button class="btn btn-ghost" onclick={on_close}>{"Cancel"}</button>
                    <button class="btn btn-primary"
                        disabled={draft.field_name.trim().is_empty()}
                        onclick={link.callback(|_| Msg::Apply)}>
                        {"Apply"}
                    </button>
                </div>
            </div>
        }
    }
}
