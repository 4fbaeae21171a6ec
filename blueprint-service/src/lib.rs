//! blueprint-service: floor plan analysis backed by a multimodal model.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
