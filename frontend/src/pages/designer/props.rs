use yew::prelude::*;

use crate::context::AppContext;

#[derive(Properties, PartialEq, Clone)]
pub struct DesignerProps {
    pub app: AppContext,
    pub template_id: String,
    /// `mapping` when arriving from the data upload page.
    #[prop_or_default]
    pub step: Option<String>,
}
