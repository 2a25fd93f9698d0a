// src/gui/app.rs
use std::{error::Error, time::Duration};

use eframe::egui;

use crate::{
    commands::CommandRegistry,
    config::{options::AppOptions, state::{GuiState, Tab}},
    context::AppContext,
    credentials::{self, KeyringStore},
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Relatório de Guerra",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(GuiState::default())))),
    )?;
    Ok(())
}

pub struct App {
    pub state: GuiState,

    // single owner of table, sort, credentials and analysis (UI thread only)
    pub ctx: AppContext,
    pub registry: CommandRegistry,

    // status line under the tabs
    pub status: String,
}

impl App {
    pub fn new(state: GuiState) -> Self {
        let mut ctx = AppContext::new(Box::new(KeyringStore::default()), AppOptions::default())
            .with_env_key(credentials::env_override());
        let readiness = ctx.init();
        logf!("Init: GUI started, analysis {:?}", readiness);

        Self {
            state,
            ctx,
            registry: CommandRegistry::default(),
            status: s!("Carregue uma página de guerra para começar."),
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&mut self, msg: T) {
        self.status = msg.into();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::tabs::draw(ui, self);

            ui.separator();

            match self.state.current_tab {
                Tab::Table => {
                    crate::gui::components::action_bar::draw(ui, self);
                    ui.separator();
                    crate::gui::components::data_table::draw(ui, self);
                }
                Tab::Analysis => {
                    crate::gui::components::analysis_panel::draw(ui, self);
                }
                Tab::Settings => {
                    crate::gui::components::settings::draw(ui, self);
                }
            }
        });

        // Worker writes into the shared state; poll until it lands
        if self.ctx.analysis.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
