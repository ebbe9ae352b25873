use common::fields::FieldSet;
use common::geometry::{field_box, fit_scale, PREVIEW_BOX, PREVIEW_LABEL};
use common::matching::{preview_content, PreviewContent};
use common::model::cell_text;
use common::model::data::SampleRow;
use common::model::template::Template;
use yew::prelude::*;

/// Sample entries listed under the preview.
const SAMPLE_ENTRIES: usize = 3;

#[derive(Properties, PartialEq)]
pub struct PreviewCardProps {
    pub template: Option<Template>,
    pub fields: FieldSet,
    #[prop_or_default]
    pub sample: Option<SampleRow>,
}

/// Miniature of the card filled with the first sample row.
#[function_component(PreviewCard)]
pub fn preview_card(props: &PreviewCardProps) -> Html {
    let Some(template) = &props.template else {
        return html! {
            <div class="preview-card empty">
                <p>{"No template available for preview"}</p>
            </div>
        };
    };

    let scale = fit_scale(PREVIEW_BOX, template.size());
    let size = template.size().scaled(scale);
    let sample = props.sample.as_ref();

    let fields = props.fields.iter().map(|record| {
        let field = &record.mapping;
        let rect = field_box(field, scale);
        let style = format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;font-size:{}px;color:{};text-align:{};",
            rect.left,
            rect.top,
            rect.width,
            rect.height,
            PREVIEW_LABEL.px(field.font_size, scale),
            field.font_color,
            field.alignment.as_str(),
        );
        let content = match preview_content(&field.field_name, sample) {
            PreviewContent::Photo => html! { <div class="photo-slot">{"Photo"}</div> },
            PreviewContent::Text(text) => html! { <span class="preview-text">{ text }</span> },
        };
        html! {
            <div key={record.id.to_string()} class="preview-field" {style}>{ content }</div>
        }
    });

    html! {
        <div class="card preview-card">
            <h3 class="card-title">{"Preview"}</h3>
            <div class="preview-stage">
                <div
                    class="preview-surface"
                    style={format!("width:{}px;height:{}px;", size.width, size.height)}
                >
                    <img src={template.template_url.clone()} alt="Template preview" draggable="false" />
                    { for fields }
                </div>
            </div>
            if let Some(sample) = sample.filter(|s| !s.is_empty()) {
                { sample_list(sample) }
            }
        </div>
    }
}

fn sample_list(sample: &SampleRow) -> Html {
    let hidden = sample.len().saturating_sub(SAMPLE_ENTRIES);
    html! {
        <div class="sample-list">
            <h4>{"Sample Data:"}</h4>
            { for sample.iter().take(SAMPLE_ENTRIES).map(|(key, value)| html! {
                <div class="sample-entry">
                    <span class="sample-key">{ format!("{key}:") }</span>
                    <span class="sample-value">{ cell_text(value) }</span>
                </div>
            }) }
            if hidden > 0 {
                <div class="hint">{ format!("+{hidden} more fields") }</div>
            }
        </div>
    }
}
