//! Column Settings Dialog
//!
//! Modal overlay with one width slider per column. The dialog only reports
//! intents; the owning view applies them to the grid state.

use std::rc::Rc;

use gpui::{
    App, ClickEvent, IntoElement, MouseButton, MouseDownEvent, ParentElement, RenderOnce,
    SharedString, Styled, Window, div, prelude::*, px,
};
use gpui_component::{
    ActiveTheme, Disableable, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};

use crate::constants::WIDTH_SLIDER_TRACK;
use crate::states::WidthControl;

const THUMB_SIZE: f32 = 14.0;

type StepHandler = Rc<dyn Fn(&str, i32, &mut Window, &mut App) + 'static>;
type DragHandler = Rc<dyn Fn(&str, f32, &mut Window, &mut App) + 'static>;
type ActionHandler = Rc<dyn Fn(&mut Window, &mut App) + 'static>;

/// Texts shown by the dialog
#[derive(Clone, Default)]
pub struct ColumnSettingsLabels {
    pub title: SharedString,
    pub reset: SharedString,
    pub close: SharedString,
    pub narrower: SharedString,
    pub wider: SharedString,
}

#[derive(IntoElement)]
pub struct ColumnSettingsDialog {
    /// `(display label, control)` per column
    rows: Vec<(SharedString, WidthControl)>,
    labels: ColumnSettingsLabels,
    on_step: Option<StepHandler>,
    on_drag_start: Option<DragHandler>,
    on_reset: Option<ActionHandler>,
    on_close: Option<ActionHandler>,
}

impl ColumnSettingsDialog {
    pub fn new(rows: Vec<(SharedString, WidthControl)>, labels: ColumnSettingsLabels) -> Self {
        Self {
            rows,
            labels,
            on_step: None,
            on_drag_start: None,
            on_reset: None,
            on_close: None,
        }
    }

    /// −/+ buttons, called with the column id and a step count
    pub fn on_step(mut self, handler: impl Fn(&str, i32, &mut Window, &mut App) + 'static) -> Self {
        self.on_step = Some(Rc::new(handler));
        self
    }

    /// Pointer pressed on a slider, called with the column id and window x
    pub fn on_drag_start(
        mut self,
        handler: impl Fn(&str, f32, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_drag_start = Some(Rc::new(handler));
        self
    }

    pub fn on_reset(mut self, handler: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_reset = Some(Rc::new(handler));
        self
    }

    pub fn on_close(mut self, handler: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_close = Some(Rc::new(handler));
        self
    }

    fn render_slider(
        control: &WidthControl,
        on_drag_start: Option<DragHandler>,
        cx: &App,
    ) -> impl IntoElement {
        let id = control.id.clone();
        let filled = control.fraction() * WIDTH_SLIDER_TRACK;

        div()
            .id(SharedString::from(format!("width-slider-{}", control.id)))
            .relative()
            .w(px(WIDTH_SLIDER_TRACK))
            .h(px(THUMB_SIZE))
            .cursor_pointer()
            .child(
                div()
                    .absolute()
                    .top(px(THUMB_SIZE / 2.0 - 2.0))
                    .left_0()
                    .w(px(WIDTH_SLIDER_TRACK))
                    .h(px(4.0))
                    .rounded_full()
                    .bg(cx.theme().slider_bar.opacity(0.2)),
            )
            .child(
                div()
                    .absolute()
                    .top(px(THUMB_SIZE / 2.0 - 2.0))
                    .left_0()
                    .w(px(filled))
                    .h(px(4.0))
                    .rounded_full()
                    .bg(cx.theme().slider_bar),
            )
            .child(
                div()
                    .absolute()
                    .top_0()
                    .left(px(filled - THUMB_SIZE / 2.0))
                    .size(px(THUMB_SIZE))
                    .rounded_full()
                    .border_2()
                    .border_color(cx.theme().slider_bar)
                    .bg(cx.theme().slider_thumb),
            )
            .when_some(on_drag_start, |el, handler| {
                el.on_mouse_down(MouseButton::Left, move |event: &MouseDownEvent, window, cx| {
                    cx.stop_propagation();
                    handler(&id, f32::from(event.position.x), window, cx);
                })
            })
    }

    fn render_row(
        label: SharedString,
        control: WidthControl,
        labels: &ColumnSettingsLabels,
        on_step: Option<StepHandler>,
        on_drag_start: Option<DragHandler>,
        cx: &App,
    ) -> impl IntoElement {
        let step_button = |direction: i32, icon: IconName, tooltip: SharedString| {
            let id = control.id.clone();
            let handler = on_step.clone();
            let at_bound = if direction < 0 {
                control.value <= control.min
            } else {
                control.value >= control.max
            };
            Button::new(SharedString::from(format!("width-step-{}-{direction}", control.id)))
                .icon(icon)
                .tooltip(tooltip)
                .xsmall()
                .ghost()
                .disabled(at_bound)
                .when_some(handler, |button, handler| {
                    button.on_click(move |_: &ClickEvent, window, cx| {
                        handler(&id, direction, window, cx)
                    })
                })
        };

        h_flex()
            .w_full()
            .gap_3()
            .items_center()
            .child(Label::new(label).text_sm().w(px(140.0)))
            .child(step_button(-1, IconName::Minus, labels.narrower.clone()))
            .child(Self::render_slider(&control, on_drag_start, cx))
            .child(step_button(1, IconName::Plus, labels.wider.clone()))
            .child(
                Label::new(control.value_label())
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .w(px(56.0)),
            )
    }
}

impl RenderOnce for ColumnSettingsDialog {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let on_close = self.on_close;
        let on_reset = self.on_reset;
        let labels = self.labels;
        let rows: Vec<_> = self
            .rows
            .into_iter()
            .map(|(label, control)| {
                Self::render_row(
                    label,
                    control,
                    &labels,
                    self.on_step.clone(),
                    self.on_drag_start.clone(),
                    cx,
                )
            })
            .collect();

        // Backdrop
        div()
            .id("column-settings-backdrop")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000088))
            .flex()
            .items_center()
            .justify_center()
            .when_some(on_close.clone(), |el, handler| {
                el.on_click(move |_: &ClickEvent, window, cx| handler(window, cx))
            })
            .child(
                v_flex()
                    .id("column-settings")
                    .bg(cx.theme().background)
                    .rounded_lg()
                    .shadow_lg()
                    .min_w(px(560.0))
                    .border_1()
                    .border_color(cx.theme().border)
                    // Clicks inside the dialog must not reach the backdrop
                    .on_click(|_, _, cx| cx.stop_propagation())
                    .child(
                        h_flex()
                            .px_6()
                            .py_4()
                            .border_b_1()
                            .border_color(cx.theme().border)
                            .justify_between()
                            .items_center()
                            .child(Label::new(labels.title.clone()).text_base())
                            .when_some(on_close.clone(), |el, handler| {
                                el.child(
                                    Button::new("column-settings-x")
                                        .icon(IconName::Close)
                                        .small()
                                        .ghost()
                                        .on_click(move |_, window, cx| handler(window, cx)),
                                )
                            }),
                    )
                    .child(v_flex().px_6().py_4().gap_3().children(rows))
                    .child(
                        h_flex()
                            .px_6()
                            .py_3()
                            .gap_2()
                            .justify_end()
                            .border_t_1()
                            .border_color(cx.theme().border)
                            .when_some(on_reset, |el, handler| {
                                el.child(
                                    Button::new("column-settings-reset")
                                        .label(labels.reset.clone())
                                        .small()
                                        .ghost()
                                        .on_click(move |_, window, cx| handler(window, cx)),
                                )
                            })
                            .when_some(on_close, |el, handler| {
                                el.child(
                                    Button::new("column-settings-close")
                                        .label(labels.close.clone())
                                        .small()
                                        .primary()
                                        .on_click(move |_, window, cx| handler(window, cx)),
                                )
                            }),
                    ),
            )
    }
}
