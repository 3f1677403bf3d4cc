use crate::services::gemini::GeminiClient;

pub mod client;
pub mod config;
pub mod modules;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub gemini: GeminiClient,
}
