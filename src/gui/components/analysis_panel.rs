// src/gui/components/analysis_panel.rs

use eframe::egui::{self, widgets::Spinner};

use crate::analysis::AnalysisState;
use crate::context::Readiness;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ui_ctx = ui.ctx().clone();
    let snapshot = app.ctx.analysis.snapshot();
    let pending = snapshot.is_pending();

    ui.horizontal(|ui| {
        // Disabled while a request is in flight; re-enabled on every outcome
        if ui.add_enabled(!pending, egui::Button::new("Gerar Análise")).clicked() {
            actions::fire(app, &ui_ctx, "generate-ai-btn", None);
        }
        if pending {
            ui.add(Spinner::new());
        }
        if app.ctx.readiness() == Readiness::NotReady {
            ui.label(egui::RichText::new("Chave da API não configurada").weak());
        }
        ui.label(format!("Meta de hoje: {} decks", app.ctx.goal()));
    });

    let counts: Vec<String> = app
        .ctx
        .status_counts()
        .into_iter()
        .map(|(st, n)| format!("{}: {}", st.label(), n))
        .collect();
    ui.label(egui::RichText::new(counts.join("   ")).small());

    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| match &snapshot {
            AnalysisState::Idle => {
                ui.label(egui::RichText::new("Clique em \"Gerar Análise\" para resumir a guerra de hoje.").weak());
            }
            AnalysisState::Failed(msg) => {
                ui.colored_label(ui.visuals().error_fg_color, msg.as_str());
            }
            other => {
                ui.label(other.display_text());
            }
        });
}
