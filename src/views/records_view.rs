//! Records Grid View
//!
//! Renders [`GridState`] and turns pointer, click and key events into grid
//! intents:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ error banner (retry)                                      │
//! ├──────────┬──────────────┬───────────┬────────────────────┤
//! │ ID      ┃│ Provider    ┃│ Status   ┃│ ...      ← header  │
//! ├──────────┴──────────────┴───────────┴────────────────────┤
//! │ skeleton rows / records / empty row                       │
//! ├──────────────────────────────────────────────────────────┤
//! │ rows per page  1-20 / 137  ‹ ›                pagination  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Pointer moves and releases are tracked on the root element so a drag keeps
//! working when the pointer leaves the thin resize handle.

use std::sync::Arc;

use chrono::Utc;
use gpui::{
    App, Context, FocusHandle, Focusable, MouseButton, MouseDownEvent, MouseMoveEvent,
    MouseUpEvent, SharedString, Window, div, prelude::*, px,
};
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    tooltip::Tooltip,
    v_flex,
};
use tracing::debug;

use crate::app::entities::AppServices;
use crate::constants::{ERROR_MESSAGE_PREVIEW_CHARS, HEADER_HEIGHT, RESIZE_HANDLE_WIDTH, ROW_HEIGHT};
use crate::domain::{ColumnDefinition, Record, default_columns};
use crate::helpers::{GRID_CONTEXT, GridAction, humanize_keystroke};
use crate::i18n::{column_label, tr};
use crate::services::{RecordFetcher, run_in_tokio};
use crate::states::{FetchTicket, GridBody, GridState};
use crate::utils::format::{
    EMPTY_CELL, Severity, provider_display_name, timestamp_cell, truncate,
};
use crate::views::{ColumnSettingsDialog, ColumnSettingsLabels, Pagination};

/// Embeddable records grid
pub struct RecordsView {
    grid: GridState,
    fetcher: Arc<dyn RecordFetcher>,
    locale: String,
    focus_handle: FocusHandle,
}

impl RecordsView {
    /// Create the view and attach the grid: restore layout, fetch page 0
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let services = cx.global::<AppServices>().clone();
        let config = services.config();
        let focus_handle = cx.focus_handle();
        focus_handle.focus(window);

        let mut view = Self {
            grid: GridState::new(default_columns(), services.layout_store(), config.page_size()),
            fetcher: services.fetcher(),
            locale: config.locale().to_string(),
            focus_handle,
        };
        if let Some(ticket) = view.grid.attach() {
            view.spawn_fetch(ticket, cx);
        }
        view
    }

    fn t(&self, key: &str) -> SharedString {
        tr(&self.locale, key)
    }

    // ==================== Data ====================

    /// Run the fetch for `ticket` off the UI thread and report back
    fn spawn_fetch(&mut self, ticket: FetchTicket, cx: &mut Context<Self>) {
        let fetcher = self.fetcher.clone();
        cx.spawn(async move |this, cx| {
            let result = run_in_tokio(fetcher.fetch(ticket.request())).await;
            let _ = this.update(cx, |this, cx| {
                if this.grid.resolve(ticket, result) {
                    cx.notify();
                }
            });
        })
        .detach();
        cx.notify();
    }

    fn fetch_if_issued(&mut self, ticket: Option<FetchTicket>, cx: &mut Context<Self>) {
        if let Some(ticket) = ticket {
            self.spawn_fetch(ticket, cx);
        }
    }

    fn reload(&mut self, cx: &mut Context<Self>) {
        let ticket = self.grid.reload();
        self.spawn_fetch(ticket, cx);
    }

    fn go_to_page(&mut self, page: usize, cx: &mut Context<Self>) {
        let ticket = self.grid.set_page(page);
        self.fetch_if_issued(ticket, cx);
    }

    fn change_page_size(&mut self, page_size: usize, cx: &mut Context<Self>) {
        let ticket = self.grid.set_page_size(page_size);
        self.fetch_if_issued(ticket, cx);
    }

    fn on_grid_action(&mut self, action: &GridAction, _window: &mut Window, cx: &mut Context<Self>) {
        debug!(?action, "Grid action");
        match action {
            GridAction::Reload => self.reload(cx),
            GridAction::NextPage => {
                let ticket = self.grid.next_page();
                self.fetch_if_issued(ticket, cx);
            }
            GridAction::PrevPage => {
                let ticket = self.grid.prev_page();
                self.fetch_if_issued(ticket, cx);
            }
            GridAction::OpenSettings => {
                self.grid.open_settings();
                cx.notify();
            }
            GridAction::CloseSettings => {
                self.grid.close_settings();
                cx.notify();
            }
            GridAction::ResetLayout => {
                self.grid.reset_layout();
                cx.notify();
            }
        }
    }

    // ==================== Pointer ====================

    fn on_pointer_move(&mut self, event: &MouseMoveEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let x = f32::from(event.position.x);
        let left_down = event.pressed_button == Some(MouseButton::Left);

        if self.grid.resizing_column().is_some() {
            // Button released where no listener saw it: treat as a cancel
            if !left_down {
                self.grid.cancel_resize();
            } else {
                self.grid.drag_resize(x);
            }
            cx.notify();
        }

        if self.grid.settings().is_slider_dragging() {
            if !left_down {
                self.grid.end_slider_drag();
            } else {
                self.grid.slider_drag_to(x);
            }
            cx.notify();
        }
    }

    fn on_pointer_up(&mut self, _event: &MouseUpEvent, _window: &mut Window, cx: &mut Context<Self>) {
        if self.grid.end_resize().is_some() {
            cx.notify();
        }
        if self.grid.settings().is_slider_dragging() {
            self.grid.end_slider_drag();
            cx.notify();
        }
    }

    // ==================== Rendering ====================

    fn render_toolbar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let shortcut = |action: GridAction| humanize_keystroke(action.keystroke());

        h_flex()
            .w_full()
            .px_4()
            .py_2()
            .gap_2()
            .justify_end()
            .child(
                Button::new("reload")
                    .icon(IconName::Redo)
                    .tooltip(format!("{} ({})", self.t("grid.reload"), shortcut(GridAction::Reload)))
                    .small()
                    .ghost()
                    .loading(self.grid.is_loading())
                    .on_click(cx.listener(|this, _, _, cx| this.reload(cx))),
            )
            .child(
                Button::new("reset-layout")
                    .icon(IconName::Undo)
                    .tooltip(self.t("grid.reset_layout"))
                    .small()
                    .ghost()
                    .on_click(cx.listener(|this, _, _, cx| {
                        this.grid.reset_layout();
                        cx.notify();
                    })),
            )
            .child(
                Button::new("column-settings")
                    .icon(IconName::Settings2)
                    .tooltip(format!(
                        "{} ({})",
                        self.t("grid.settings"),
                        shortcut(GridAction::OpenSettings)
                    ))
                    .small()
                    .ghost()
                    .on_click(cx.listener(|this, _, _, cx| {
                        this.grid.open_settings();
                        cx.notify();
                    })),
            )
    }

    fn render_error_banner(&self, message: &str, cx: &mut Context<Self>) -> impl IntoElement {
        h_flex()
            .mx_4()
            .mb_2()
            .px_3()
            .py_2()
            .gap_3()
            .items_center()
            .rounded_md()
            .border_1()
            .border_color(cx.theme().danger)
            .bg(cx.theme().danger.opacity(0.1))
            .child(
                v_flex()
                    .flex_1()
                    .child(
                        Label::new(self.t("grid.load_failed"))
                            .text_sm()
                            .text_color(cx.theme().danger),
                    )
                    .child(
                        Label::new(message.to_string())
                            .text_xs()
                            .text_color(cx.theme().muted_foreground),
                    ),
            )
            .child(
                Button::new("retry")
                    .label(self.t("grid.retry"))
                    .small()
                    .danger()
                    .on_click(cx.listener(|this, _, _, cx| this.reload(cx))),
            )
    }

    fn render_header(&self, columns: &[ColumnDefinition], cx: &mut Context<Self>) -> impl IntoElement {
        let resizing = self.grid.resizing_column().map(str::to_string);

        let cells = columns.iter().enumerate().map(|(index, column)| {
            let id = column.id.clone();
            let active = resizing.as_deref() == Some(column.id.as_str());
            let handle_color = if active {
                cx.theme().primary
            } else {
                cx.theme().border
            };

            div()
                .relative()
                .flex_shrink_0()
                .w(px(column.width as f32))
                .h_full()
                .px_3()
                .flex()
                .items_center()
                .child(
                    Label::new(column_label(&self.locale, column))
                        .text_sm()
                        .text_color(cx.theme().foreground)
                        .text_ellipsis(),
                )
                .child(
                    div()
                        .id(("resize-handle", index))
                        .absolute()
                        .top_0()
                        .right_0()
                        .h_full()
                        .w(px(RESIZE_HANDLE_WIDTH))
                        .cursor_col_resize()
                        .flex()
                        .justify_center()
                        .child(div().w(px(1.0)).h_full().bg(handle_color))
                        .hover(|s| s.bg(cx.theme().primary.opacity(0.3)))
                        .on_mouse_down(
                            MouseButton::Left,
                            cx.listener(move |this, event: &MouseDownEvent, _, cx| {
                                cx.stop_propagation();
                                if this.grid.begin_resize(&id, f32::from(event.position.x)) {
                                    cx.notify();
                                }
                            }),
                        ),
                )
        });

        h_flex()
            .h(px(HEADER_HEIGHT))
            .bg(cx.theme().table_head)
            .border_b_1()
            .border_color(cx.theme().border)
            .children(cells)
    }

    fn render_cell(&self, column: &ColumnDefinition, record: &Record, row: usize, cx: &App) -> impl IntoElement {
        let cell = div()
            .id(SharedString::from(format!("cell-{row}-{}", column.id)))
            .flex_shrink_0()
            .w(px(column.width as f32))
            .px_3()
            .overflow_hidden()
            .text_sm()
            .text_color(cx.theme().foreground);

        let value = record.field(&column.id);
        match column.id.as_str() {
            "provider" => cell.child(
                value
                    .map(|p| provider_display_name(&p))
                    .unwrap_or_else(|| EMPTY_CELL.to_string()),
            ),
            "status" => match value {
                Some(status) => {
                    let color = match Severity::from_status(&status) {
                        Severity::Success => cx.theme().success,
                        Severity::Error => cx.theme().danger,
                        Severity::Default => cx.theme().muted_foreground,
                    };
                    cell.child(
                        div()
                            .px_2()
                            .py_px()
                            .rounded_sm()
                            .bg(color.opacity(0.15))
                            .text_color(color)
                            .text_xs()
                            .child(status),
                    )
                }
                None => cell.child(EMPTY_CELL),
            },
            "error_message" => match value {
                Some(message) => {
                    let short = truncate(&message, ERROR_MESSAGE_PREVIEW_CHARS);
                    let full = SharedString::from(message);
                    cell.text_color(cx.theme().danger)
                        .child(short)
                        .tooltip(move |window, cx| Tooltip::new(full.clone()).build(window, cx))
                }
                None => cell.child(EMPTY_CELL),
            },
            "requested_at" | "completed_at" | "updated_at" => {
                let formatted = timestamp_cell(value.as_deref(), &Utc::now(), &self.locale);
                let cell = cell.child(formatted.text);
                match formatted.tooltip {
                    Some(absolute) => {
                        let absolute = SharedString::from(absolute);
                        cell.tooltip(move |window, cx| Tooltip::new(absolute.clone()).build(window, cx))
                    }
                    None => cell,
                }
            }
            _ => cell.child(value.unwrap_or_else(|| EMPTY_CELL.to_string())),
        }
    }

    fn render_rows(&self, columns: &[ColumnDefinition], records: &[Record], cx: &App) -> Vec<gpui::AnyElement> {
        records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let bg = if row % 2 == 0 {
                    cx.theme().table
                } else {
                    cx.theme().table_even
                };
                h_flex()
                    .id(SharedString::from(record.row_key(row)))
                    .h(px(ROW_HEIGHT))
                    .bg(bg)
                    .hover(|s| s.bg(cx.theme().table_hover))
                    .border_b_1()
                    .border_color(cx.theme().table_row_border)
                    .children(columns.iter().map(|column| self.render_cell(column, record, row, cx)))
                    .into_any_element()
            })
            .collect()
    }

    fn render_skeleton(&self, columns: &[ColumnDefinition], rows: usize, cx: &App) -> Vec<gpui::AnyElement> {
        (0..rows)
            .map(|row| {
                h_flex()
                    .id(("skeleton-row", row))
                    .h(px(ROW_HEIGHT))
                    .border_b_1()
                    .border_color(cx.theme().table_row_border)
                    .children(columns.iter().map(|column| {
                        div()
                            .flex_shrink_0()
                            .w(px(column.width as f32))
                            .px_3()
                            .child(div().h(px(12.0)).w_full().rounded_sm().bg(cx.theme().skeleton))
                    }))
                    .into_any_element()
            })
            .collect()
    }

    fn render_empty(&self, columns: &[ColumnDefinition], cx: &App) -> gpui::AnyElement {
        let width: u32 = columns.iter().map(|c| c.width).sum();
        div()
            .w(px(width as f32))
            .h(px(ROW_HEIGHT * 2.0))
            .flex()
            .items_center()
            .justify_center()
            .text_sm()
            .text_color(cx.theme().muted_foreground)
            .child(self.t("grid.empty"))
            .into_any_element()
    }

    fn render_body(&self, columns: &[ColumnDefinition], cx: &App) -> Vec<gpui::AnyElement> {
        match self.grid.body() {
            GridBody::Skeleton { rows } => self.render_skeleton(columns, rows, cx),
            GridBody::Rows(records) => self.render_rows(columns, records, cx),
            GridBody::Empty => vec![self.render_empty(columns, cx)],
            GridBody::Nothing => Vec::new(),
        }
    }

    fn render_pagination(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let on_page = cx.entity().downgrade();
        let on_size = on_page.clone();

        Pagination::new(self.grid.page(), self.grid.page_count(), self.grid.page_size())
            .page_size_options(self.grid.page_size_options())
            .range_label(self.grid.range_label())
            .labels(
                self.t("grid.rows_per_page"),
                self.t("grid.prev_page"),
                self.t("grid.next_page"),
            )
            .on_page_change(move |page, _, cx| {
                let _ = on_page.update(cx, |this, cx| this.go_to_page(page, cx));
            })
            .on_page_size_change(move |size, _, cx| {
                let _ = on_size.update(cx, |this, cx| this.change_page_size(size, cx));
            })
    }

    fn render_settings(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let rows = self
            .grid
            .columns()
            .iter()
            .zip(self.grid.width_controls())
            .map(|(column, control)| (column_label(&self.locale, column), control))
            .collect();
        let labels = ColumnSettingsLabels {
            title: self.t("settings.title"),
            reset: self.t("settings.reset"),
            close: self.t("settings.close"),
            narrower: self.t("settings.narrower"),
            wider: self.t("settings.wider"),
        };

        let entity = cx.entity().downgrade();
        let on_step = entity.clone();
        let on_drag = entity.clone();
        let on_reset = entity.clone();
        let on_close = entity;

        ColumnSettingsDialog::new(rows, labels)
            .on_step(move |id, steps, _, cx| {
                let _ = on_step.update(cx, |this, cx| {
                    if this.grid.step_column_width(id, steps).is_some() {
                        cx.notify();
                    }
                });
            })
            .on_drag_start(move |id, x, _, cx| {
                let _ = on_drag.update(cx, |this, cx| {
                    if this.grid.begin_slider_drag(id, x) {
                        cx.notify();
                    }
                });
            })
            .on_reset(move |_, cx| {
                let _ = on_reset.update(cx, |this, cx| {
                    this.grid.reset_layout();
                    cx.notify();
                });
            })
            .on_close(move |_, cx| {
                let _ = on_close.update(cx, |this, cx| {
                    this.grid.close_settings();
                    cx.notify();
                });
            })
    }
}

impl Focusable for RecordsView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for RecordsView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let columns = self.grid.display_columns();
        let error = self.grid.error_banner().map(str::to_string);
        let body = self.render_body(&columns, cx);

        v_flex()
            .id("records-grid")
            .key_context(GRID_CONTEXT)
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::on_grid_action))
            .relative()
            .size_full()
            .bg(cx.theme().background)
            .on_mouse_move(cx.listener(Self::on_pointer_move))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::on_pointer_up))
            .on_mouse_up_out(MouseButton::Left, cx.listener(Self::on_pointer_up))
            .child(self.render_toolbar(cx))
            .when_some(error, |el, message| el.child(self.render_error_banner(&message, cx)))
            .child(
                div()
                    .id("records-table")
                    .flex_1()
                    .mx_4()
                    .border_1()
                    .border_color(cx.theme().border)
                    .rounded_md()
                    .overflow_x_scroll()
                    .child(
                        v_flex()
                            .child(self.render_header(&columns, cx))
                            .child(
                                v_flex()
                                    .id("records-rows")
                                    .flex_1()
                                    .overflow_y_scroll()
                                    .children(body),
                            ),
                    ),
            )
            .child(self.render_pagination(cx))
            .when(self.grid.settings_open(), |el| el.child(self.render_settings(cx)))
    }
}

impl Drop for RecordsView {
    fn drop(&mut self) {
        self.grid.detach();
    }
}
