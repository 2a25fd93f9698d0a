// src/gui/components/action_bar.rs
//
// Source field + load, output dir + export/copy.

use eframe::egui;

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ui_ctx = ui.ctx().clone();

    ui.horizontal(|ui| {
        ui.label("Página:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.source_text)
                .hint_text("arquivo .html ou URL")
                .desired_width(420.0),
        );
        if resp.changed() {
            app.state.source_dirty = true;
        }
        let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.button("Carregar").clicked() || (enter && app.state.source_dirty) {
            let src = app.state.source_text.clone();
            actions::fire(app, &ui_ctx, "load-table", Some(src.as_str()));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Pasta de saída:");
        let resp = ui.add(egui::TextEdit::singleline(&mut app.state.out_dir_text).desired_width(240.0));
        if resp.changed() {
            app.state.out_dir_dirty = true;
        }

        let has_rows = app.ctx.table.nrows() > 0;
        if ui.add_enabled(has_rows, egui::Button::new("Exportar CSV")).clicked() {
            actions::sync_out_dir(app);
            actions::fire(app, &ui_ctx, "export-csv-btn", None);
        }
        if ui.add_enabled(has_rows, egui::Button::new("Copiar CSV")).clicked() {
            actions::fire(app, &ui_ctx, "copy-csv-btn", None);
        }

        ui.label(format!("Formato: {:?}", app.ctx.schema));
    });
}
