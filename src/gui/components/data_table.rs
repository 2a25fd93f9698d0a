// src/gui/components/data_table.rs
//
// Live table view. Header labels with a data-column key are sort triggers;
// the arrow shows the header's current sort marker.

use eframe::egui::{self, Color32, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::goals::Status;
use crate::gui::{actions, app::App};

fn status_color(label: &str) -> Option<Color32> {
    match label.trim() {
        l if l == Status::Critical.label() => Some(Color32::from_rgb(0xd9, 0x3b, 0x3b)),
        l if l == Status::Warning.label() => Some(Color32::from_rgb(0xe0, 0x9b, 0x1f)),
        l if l == Status::Ok.label() => Some(Color32::from_rgb(0x3c, 0xa5, 0x5c)),
        _ => None,
    }
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ui_ctx = ui.ctx().clone();
    let table = &app.ctx.table;

    let cols = table
        .ncols()
        .max(table.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0));
    if cols == 0 {
        ui.label("Nenhuma tabela carregada.");
        return;
    }

    let mut clicked: Option<String> = None;

    let avail_h = ui.available_height();
    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(avail_h);
    for ci in 0..cols {
        let col = if ci == 0 { Column::initial(200.0) } else { Column::initial(110.0) };
        builder = builder.column(col.resizable(true).clip(true).at_least(40.0));
    }

    builder
        .header(24.0, |mut header| {
            for ci in 0..cols {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    let Some(h) = table.headers.get(ci) else {
                        ui.label(RichText::new(format!("Col {}", ci + 1)).strong());
                        return;
                    };
                    let arrow = h.sort.map(|d| d.arrow()).unwrap_or("");
                    let text = RichText::new(format!("{} {}", h.label, arrow)).strong();
                    match &h.key {
                        Some(key) => {
                            let resp = ui.add(egui::Button::new(text).frame(false));
                            if resp.on_hover_text("Clique para ordenar").clicked() {
                                clicked = Some(key.clone());
                            }
                        }
                        None => {
                            ui.label(text);
                        }
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, table.nrows(), |mut row| {
                let Some(r) = table.rows.get(row.index()) else { return };
                if r.is_placeholder() {
                    row.col(|ui| {
                        ui.label(RichText::new(r.cell_text(0)).italics().weak());
                    });
                    for _ in 1..cols {
                        row.col(|_| {});
                    }
                    return;
                }
                for ci in 0..cols {
                    row.col(|ui| {
                        let Some(cell) = r.cells.get(ci) else { return };
                        match cell.status.as_deref() {
                            Some(st) => {
                                let mut t = RichText::new(st.trim()).strong();
                                if let Some(c) = status_color(st) {
                                    t = t.color(c);
                                }
                                ui.label(t);
                            }
                            None => {
                                ui.label(cell.text.trim());
                            }
                        }
                    });
                }
            });
        });

    if let Some(key) = clicked {
        logd!("UI: header click {:?}", key);
        actions::fire(app, &ui_ctx, "header-click", Some(key.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_colors_follow_labels() {
        assert!(status_color("Crítico").is_some());
        assert!(status_color(" OK ").is_some());
        assert_eq!(status_color("?"), None);
    }
}
