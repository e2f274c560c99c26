//! # Photo Sticker Bot
//!
//! A Telegram bot that cuts the background out of user photos and collects
//! the results in a per-user sticker pack, for subscribers of a channel only.

pub mod bot;
pub mod config;
pub mod context;
pub mod cutout;
pub mod errors;
pub mod lifecycle;
pub mod localization;
pub mod naming;
pub mod platform;
pub mod sticker;
pub mod subscription;
pub mod telegram;
pub mod telemetry;
