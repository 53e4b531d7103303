//! waterbuddy-core - 給水リマインダーの表示コア
//!
//! Core building blocks for the WaterBuddy reminder station.
//!
//! # モジュール構成
//! - **domain**: value types (ids, tasks, lanes, colors, station records, errors)
//! - **ports**: traits at the hardware and storage seams (DisplayDevice,
//!   AnimationFactory, StationStore)
//! - **app**: the display sequencer (builder, lanes, status)
//! - **impls**: recording/console devices, frame animations, in-memory store
//! - **config**: JSON configuration

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
