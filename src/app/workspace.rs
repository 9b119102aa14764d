//! Workspace - Window Shell
//!
//! Title bar on top, the records grid below.

use gpui::{Context, Entity, IntoElement, ParentElement, Render, Styled, Window, prelude::*};
use gpui_component::{ActiveTheme, v_flex};

use crate::views::{AppTitleBar, RecordsView};

pub struct Workspace {
    title_bar: Entity<AppTitleBar>,
    records: Entity<RecordsView>,
}

impl Workspace {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let title_bar = cx.new(|cx| AppTitleBar::new(window, cx));
        let records = cx.new(|cx| RecordsView::new(window, cx));
        Self { title_bar, records }
    }
}

impl Render for Workspace {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        v_flex()
            .size_full()
            .bg(cx.theme().background)
            .text_color(cx.theme().foreground)
            .child(self.title_bar.clone())
            .child(self.records.clone())
    }
}
