// src/gui/components/mod.rs
pub mod action_bar;
pub mod analysis_panel;
pub mod data_table;
pub mod settings;
pub mod tabs;
