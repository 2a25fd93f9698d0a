// src/gui/actions.rs
//
// Every button and header click ends up here: trigger name -> registry -> dispatch.

use eframe::egui;

use crate::{commands::Outcome, gui::app::App};

pub fn fire(app: &mut App, ui_ctx: &egui::Context, trigger: &str, payload: Option<&str>) {
    let cmd = match app.registry.resolve(trigger, payload) {
        Ok(c) => c,
        Err(e) => {
            loge!("UI: {}", e);
            app.status(e.user_message());
            return;
        }
    };

    match app.ctx.dispatch(cmd) {
        Ok(outcome) => {
            let msg = outcome.message();
            match outcome {
                Outcome::Copied(text) => ui_ctx.copy_text(text),
                Outcome::TabSwitched(tab) => {
                    logf!("UI: Tab switch {:?} → {:?}", app.state.current_tab, tab);
                    app.state.current_tab = tab;
                }
                Outcome::Loaded { .. } => app.state.source_dirty = false,
                Outcome::AnalysisStarted => ui_ctx.request_repaint(),
                _ => {}
            }
            app.status(msg);
        }
        Err(e) => {
            logd!("UI: {} failed: {}", trigger, e);
            app.status(e.user_message());
        }
    }
}

/// Apply the typed output directory before an export.
pub fn sync_out_dir(app: &mut App) {
    if app.state.out_dir_dirty {
        app.ctx.options.export.set_out_dir(&app.state.out_dir_text);
        app.state.out_dir_dirty = false;
        logf!("UI: out_dir → {}", app.ctx.options.export.out_dir().display());
    }
}
