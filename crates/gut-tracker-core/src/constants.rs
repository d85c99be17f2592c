// ABOUTME: Constants organized by domain for the GutTracker platform
// ABOUTME: Correlation window, analysis thresholds, AI provider endpoints and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by domain rather than kept in a single flat list.

/// Correlation analysis thresholds
pub mod analysis {
    /// Maximum delay between a meal and a symptom for the pair to be correlated
    pub const CORRELATION_WINDOW_HOURS: i64 = 6;
    /// Distinct journal days required before analysis is offered
    pub const MIN_DAYS_FOR_ANALYSIS: usize = 7;
    /// History forwarded to the narrative analysis
    pub const PAYLOAD_LOOKBACK_DAYS: i64 = 30;
    /// Milliseconds per hour, used for delay rounding
    pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;
}

/// Journal thresholds
pub mod journal {
    /// A food name is "frequent" once it appears in this many entries
    pub const FREQUENT_FOOD_MIN_ENTRIES: usize = 3;
    /// Highest accepted symptom severity
    pub const SEVERITY_MAX: u8 = 10;
    /// Lowest accepted symptom severity
    pub const SEVERITY_MIN: u8 = 1;
    /// Severity assumed when a dictated symptom omits one
    pub const SEVERITY_DEFAULT: u8 = 5;
    /// Highest Bristol stool scale value
    pub const BRISTOL_MAX: u8 = 7;
    /// Highest FODMAP score
    pub const FODMAP_SCORE_MAX: u8 = 10;
}

/// AI provider defaults
pub mod ai {
    /// Output token cap sent to every cloud provider
    pub const MAX_OUTPUT_TOKENS: u32 = 1000;
    /// Attempts for cloud adapters (one retry on transport failure)
    pub const CLOUD_MAX_ATTEMPTS: u32 = 2;
    /// Attempts for the local adapter (no retry)
    pub const LOCAL_MAX_ATTEMPTS: u32 = 1;

    /// `OpenAI` chat completions base URL
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default `OpenAI` model
    pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";

    /// Anthropic messages API base URL
    pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
    /// Anthropic API version header value
    pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
    /// Default Anthropic model
    pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-opus-4-6";

    /// Gemini generateContent base URL
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Default Gemini model
    pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-pro";

    /// Default Ollama server
    pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";
    /// Default Ollama model (vision capable)
    pub const OLLAMA_DEFAULT_MODEL: &str = "llava";
}

/// HTTP client defaults
pub mod http {
    /// Request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
    /// Connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}
