//! Congrega Fiel: painel local de igrejas e membros.
//!
//! As páginas são servidas pelo `axum` em loopback e todo o estado vive num
//! armazenamento chave → texto JSON, no papel do `localStorage` do navegador.

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod views;
