// src/gui/components/tabs.rs

use eframe::egui;

use crate::config::state::Tab;
use crate::gui::{actions, app::App};

fn trigger_value(tab: Tab) -> &'static str {
    match tab {
        Tab::Table => "table",
        Tab::Analysis => "analysis",
        Tab::Settings => "settings",
    }
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ui_ctx = ui.ctx().clone();
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        for tab in Tab::ALL {
            let selected = tab == app.state.current_tab;
            if ui.selectable_label(selected, tab.title()).clicked() && !selected {
                actions::fire(app, &ui_ctx, "tab", Some(trigger_value(tab)));
            }
        }
    });
}
