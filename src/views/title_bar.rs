//! Title Bar Component
//!
//! Custom title bar with the application name and the active record source.

use gpui::{Context, SharedString, Window, prelude::*};
use gpui_component::{ActiveTheme, TitleBar, h_flex, label::Label};

use crate::app::entities::AppServices;
use crate::i18n::tr;

pub struct AppTitleBar {
    title: SharedString,
    source: SharedString,
}

impl AppTitleBar {
    pub fn new(_window: &mut Window, cx: &mut Context<Self>) -> Self {
        let services = cx.global::<AppServices>();
        let title = tr(services.config().locale(), "app.title");
        let source = services.endpoint().unwrap_or("sample data").to_string().into();
        Self { title, source }
    }
}

impl Render for AppTitleBar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        TitleBar::new().child(
            h_flex()
                .flex_1()
                .items_center()
                .gap_3()
                .pl_4()
                .child(Label::new(self.title.clone()).text_sm())
                .child(
                    Label::new(self.source.clone())
                        .text_xs()
                        .text_color(cx.theme().muted_foreground),
                ),
        )
    }
}
