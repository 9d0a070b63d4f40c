/*
 * Responsibility
 * - モジュール構成の公開 (binary と tests/ から共通で使う)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
