// src/config/state.rs

/// Top-level tabs of the desktop window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Table,
    Analysis,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Table, Tab::Analysis, Tab::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Table => "Tabela",
            Tab::Analysis => "Análise IA",
            Tab::Settings => "Configurações",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GuiState {
    pub current_tab: Tab,

    pub window_w: u32,
    pub window_h: u32,

    /// Path or URL typed into the source field
    pub source_text: String,
    pub source_dirty: bool,

    /// Output directory as typed (mapped onto ExportOptions on export)
    pub out_dir_text: String,
    pub out_dir_dirty: bool,

    /// Settings tab key input; cleared after every save
    pub api_key_input: String,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            current_tab: Tab::Table,
            window_w: 960,
            window_h: 640,
            source_text: s!(),
            source_dirty: false,
            out_dir_text: s!(super::consts::DEFAULT_OUT_DIR),
            out_dir_dirty: false,
            api_key_input: s!(),
        }
    }
}
