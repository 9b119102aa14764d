//! Pagination Bar
//!
//! Rows-per-page options, the visible range and previous/next controls.

use std::rc::Rc;

use gpui::{App, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, prelude::*};
use gpui_component::{
    ActiveTheme, Disableable, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
};

type PageHandler = Rc<dyn Fn(usize, &mut Window, &mut App) + 'static>;

#[derive(IntoElement)]
pub struct Pagination {
    page: usize,
    page_count: usize,
    page_size: usize,
    page_size_options: &'static [usize],
    range_label: SharedString,
    rows_per_page_label: SharedString,
    prev_label: SharedString,
    next_label: SharedString,
    on_page_change: Option<PageHandler>,
    on_page_size_change: Option<PageHandler>,
}

impl Pagination {
    /// `page` is zero based
    pub fn new(page: usize, page_count: usize, page_size: usize) -> Self {
        Self {
            page,
            page_count: page_count.max(1),
            page_size,
            page_size_options: &[],
            range_label: SharedString::default(),
            rows_per_page_label: SharedString::default(),
            prev_label: SharedString::default(),
            next_label: SharedString::default(),
            on_page_change: None,
            on_page_size_change: None,
        }
    }

    pub fn page_size_options(mut self, options: &'static [usize]) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn range_label(mut self, label: impl Into<SharedString>) -> Self {
        self.range_label = label.into();
        self
    }

    pub fn labels(
        mut self,
        rows_per_page: impl Into<SharedString>,
        prev: impl Into<SharedString>,
        next: impl Into<SharedString>,
    ) -> Self {
        self.rows_per_page_label = rows_per_page.into();
        self.prev_label = prev.into();
        self.next_label = next.into();
        self
    }

    pub fn on_page_change(mut self, handler: impl Fn(usize, &mut Window, &mut App) + 'static) -> Self {
        self.on_page_change = Some(Rc::new(handler));
        self
    }

    pub fn on_page_size_change(
        mut self,
        handler: impl Fn(usize, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_page_size_change = Some(Rc::new(handler));
        self
    }
}

impl RenderOnce for Pagination {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let page = self.page;
        let can_prev = page > 0;
        let can_next = page + 1 < self.page_count;

        let size_buttons = self.page_size_options.iter().map(|&size| {
            let handler = self.on_page_size_change.clone();
            let button = Button::new(("page-size", size))
                .label(size.to_string())
                .xsmall();
            let button = if size == self.page_size {
                button.primary()
            } else {
                button.ghost()
            };
            button.when_some(handler, |button, handler| {
                button.on_click(move |_, window, cx| handler(size, window, cx))
            })
        });

        let prev_handler = self.on_page_change.clone();
        let next_handler = self.on_page_change;

        h_flex()
            .w_full()
            .px_4()
            .py_2()
            .gap_4()
            .items_center()
            .justify_end()
            .border_t_1()
            .border_color(cx.theme().border)
            .child(
                h_flex()
                    .gap_1()
                    .items_center()
                    .child(
                        Label::new(self.rows_per_page_label)
                            .text_sm()
                            .text_color(cx.theme().muted_foreground),
                    )
                    .children(size_buttons),
            )
            .child(Label::new(self.range_label).text_sm())
            .child(
                h_flex()
                    .gap_1()
                    .child(
                        Button::new("prev-page")
                            .icon(IconName::ChevronLeft)
                            .tooltip(self.prev_label)
                            .small()
                            .ghost()
                            .disabled(!can_prev)
                            .when_some(prev_handler.filter(|_| can_prev), |button, handler| {
                                button.on_click(move |_, window, cx| handler(page - 1, window, cx))
                            }),
                    )
                    .child(
                        Button::new("next-page")
                            .icon(IconName::ChevronRight)
                            .tooltip(self.next_label)
                            .small()
                            .ghost()
                            .disabled(!can_next)
                            .when_some(next_handler.filter(|_| can_next), |button, handler| {
                                button.on_click(move |_, window, cx| handler(page + 1, window, cx))
                            }),
                    ),
            )
    }
}
