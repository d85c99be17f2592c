// ABOUTME: Command modules for the gut-tracker CLI
// ABOUTME: Analysis, AI operations, export and provider settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod ai;
pub mod analysis;
pub mod export;
pub mod settings;
