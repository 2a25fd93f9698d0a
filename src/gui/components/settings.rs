// src/gui/components/settings.rs

use eframe::egui;

use crate::context::Readiness;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ui_ctx = ui.ctx().clone();

    ui.heading("Chave da API do Gemini");
    let ready = app.ctx.readiness() == Readiness::Ready;
    ui.label(if ready { "Status: configurada" } else { "Status: não configurada" });

    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut app.state.api_key_input)
                .password(true)
                .hint_text("cole a chave aqui")
                .desired_width(320.0),
        );
        if ui.button("Salvar").clicked() {
            let key = std::mem::take(&mut app.state.api_key_input);
            actions::fire(app, &ui_ctx, "save-api-key", Some(key.as_str()));
        }
        if ui.add_enabled(ready, egui::Button::new("Remover")).clicked() {
            actions::fire(app, &ui_ctx, "clear-api-key", None);
        }
    });

    ui.add_space(8.0);
    ui.label(
        egui::RichText::new("A variável de ambiente GEMINI_API_KEY, quando definida, tem prioridade.")
            .small()
            .weak(),
    );
}
