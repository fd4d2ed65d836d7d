// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod db;
pub mod events;
pub mod models;
pub mod notify;
pub mod storage;
pub mod summary;
pub mod utils;
pub mod views;
