//! Application - App Initialization and Window Management
//!
//! Main entry point for the GPUI application.

use gpui::{
    App, AppContext, Application, Bounds, SharedString, TitlebarOptions, WindowBounds,
    WindowOptions, px,
};
use gpui_component::{Root, Theme, ThemeMode};
use tracing::{error, info};

use crate::app::entities::AppServices;
use crate::app::workspace::Workspace;
use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::helpers::{MenuAction, new_key_bindings};
use crate::i18n::tr;
use crate::states::{AppConfig, ThemePreference};

/// Run the records grid application
pub fn run_app(config: AppConfig) {
    Application::new()
        .with_assets(gpui_component_assets::Assets)
        .run(move |cx: &mut App| {
            gpui_component::init(cx);
            cx.bind_keys(new_key_bindings());
            cx.on_action(|action: &MenuAction, cx: &mut App| match action {
                MenuAction::Quit => cx.quit(),
            });

            // Quit the app when all windows are closed
            cx.on_window_closed(|cx| {
                if cx.windows().is_empty() {
                    cx.quit();
                }
            })
            .detach();

            match config.theme() {
                Some(ThemePreference::Light) => Theme::change(ThemeMode::Light, None, cx),
                Some(ThemePreference::Dark) => Theme::change(ThemeMode::Dark, None, cx),
                None => Theme::sync_system_appearance(None, cx),
            }

            let title = tr(config.locale(), "app.title");
            let services = AppServices::from_config(config.clone());
            cx.set_global(services);

            let bounds = Bounds::centered(
                None,
                gpui::size(px(DEFAULT_WINDOW_WIDTH), px(DEFAULT_WINDOW_HEIGHT)),
                cx,
            );
            let window_options = WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some(SharedString::from(title)),
                    appears_transparent: true,
                    traffic_light_position: Some(gpui::point(px(9.0), px(9.0))),
                }),
                ..Default::default()
            };

            let opened = cx.open_window(window_options, |window, cx| {
                let workspace = cx.new(|cx| Workspace::new(window, cx));
                cx.new(|cx| Root::new(workspace, window, cx))
            });
            match opened {
                Ok(_) => info!("Main window opened"),
                Err(e) => {
                    error!(error = %e, "Failed to open main window");
                    cx.quit();
                }
            }

            cx.activate(true);
        });
}
