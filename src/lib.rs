// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;

pub mod table;
pub mod extract;
pub mod collate;
pub mod sort;
pub mod csv;
pub mod file;
pub mod goals;

pub mod credentials;
pub mod analysis;
pub mod context;
pub mod commands;

pub mod cli;
pub mod gui;
