use common::geometry::{fit_scale, Rect, Size, CANVAS_PADDING};
use gloo_events::EventListener;
use log::debug;
use web_sys::Element;
use yew::prelude::*;

use super::props::{CanvasProps, DropEvent};

pub struct FieldCanvas {
    /// Padded area the template is fitted into.
    pub container_ref: NodeRef,
    /// The rendered template; drops are resolved against its client rect.
    pub surface_ref: NodeRef,
    /// Inner container size, padding already removed.
    pub container: Size,
    pub last_drop_seq: u64,
    pub resize_listener: Option<EventListener>,
}

impl FieldCanvas {
    pub fn new() -> Self {
        Self {
            container_ref: NodeRef::default(),
            surface_ref: NodeRef::default(),
            container: Size::default(),
            last_drop_seq: 0,
            resize_listener: None,
        }
    }

    pub fn listen_resize(&mut self, on_resize: Callback<()>) {
        self.resize_listener = web_sys::window().map(|window| {
            EventListener::new(&window, "resize", move |_| on_resize.emit(()))
        });
    }

    /// Container size minus the padding allowance, if it is mounted.
    pub fn measure_container(&self) -> Option<Size> {
        let element = self.container_ref.cast::<Element>()?;
        let size = Size::new(element.client_width() as f64, element.client_height() as f64);
        Some(size.inset(CANVAS_PADDING))
    }

    pub fn scale(&self, props: &CanvasProps) -> f64 {
        match &props.template {
            Some(template) => fit_scale(self.container, template.size()),
            None => 0.0,
        }
    }

    pub fn surface_rect(&self) -> Option<Rect> {
        let rect = self.surface_ref.cast::<Element>()?.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    /// Turns a drop into a mutation for the designer. Drops with no template
    /// or outside the surface are dropped silently.
    pub fn resolve(&self, ctx: &Context<Self>, event: &DropEvent) {
        let props = ctx.props();
        let (Some(template), Some(surface)) = (&props.template, self.surface_rect()) else {
            return;
        };
        let scale = self.scale(props);
        match common::drag::resolve_drop(&event.drop, &surface, template.size(), scale) {
            Some(mutation) => {
                debug!("drop #{} resolved to {mutation:?}", event.seq);
                props.on_mutation.emit(mutation);
            }
            None => debug!("drop #{} landed outside the template", event.seq),
        }
    }
}
