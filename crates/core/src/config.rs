use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub extraction: ExtractionConfig,
    pub generator: GeneratorConfig,
    pub summary: SummaryConfig,
    pub llm: LlmConfig,
    pub ollama: OllamaConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `STUDYKIT_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("STUDYKIT_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            extraction: ExtractionConfig::from_env_profiled(p),
            generator: GeneratorConfig::from_env_profiled(p),
            summary: SummaryConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  extraction:  min_chars={}", self.extraction.min_chars);
        tracing::info!(
            "  generator:   max_input_chars={}, quiz={}..{}, flashcards={}..{}",
            self.generator.max_input_chars,
            self.generator.quiz_min_items,
            self.generator.quiz_max_items,
            self.generator.flashcard_min,
            self.generator.flashcard_max
        );
        tracing::info!("  summary:     chunk_tokens={}", self.summary.chunk_tokens);
        tracing::info!("  llm:         provider={}", self.llm.provider);
        tracing::info!("  ollama:      url={}", self.ollama.url);
    }

    /// Return a redacted view safe for display (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "extraction": { "min_chars": self.extraction.min_chars },
            "generator": {
                "max_input_chars": self.generator.max_input_chars,
                "quiz_max_items": self.generator.quiz_max_items,
                "quiz_min_items": self.generator.quiz_min_items,
                "flashcard_max": self.generator.flashcard_max,
                "flashcard_min": self.generator.flashcard_min,
                "budget_secs": self.generator.budget_secs,
            },
            "summary": {
                "chunk_tokens": self.summary.chunk_tokens,
                "fallback_sentences": self.summary.fallback_sentences,
                "min_chars": self.summary.min_chars,
            },
            "llm": {
                "provider": self.llm.provider,
                "configured": self.llm.is_configured(),
            },
            "ollama": { "url": self.ollama.url, "model": self.ollama.model },
        })
    }
}

// ── Extraction ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Sanitized text shorter than this is treated as a failed extraction.
    pub min_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { min_chars: 20 }
    }
}

impl ExtractionConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            min_chars: profiled_env_usize(p, "EXTRACT_MIN_CHARS", d.min_chars),
        }
    }
}

// ── Generator ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Input is truncated to this many characters before analysis.
    pub max_input_chars: usize,
    pub quiz_max_items: usize,
    /// Below this count the sentence-sampling fallback kicks in.
    pub quiz_min_items: usize,
    pub flashcard_max: usize,
    /// Below this count the definitional-sentence fallback kicks in.
    pub flashcard_min: usize,
    /// Optional wall-clock budget for a whole generation request.
    pub budget_secs: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 60_000,
            quiz_max_items: 20,
            quiz_min_items: 5,
            flashcard_max: 15,
            flashcard_min: 10,
            budget_secs: None,
        }
    }
}

impl GeneratorConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            max_input_chars: profiled_env_usize(p, "MAX_INPUT_CHARS", d.max_input_chars),
            quiz_max_items: profiled_env_usize(p, "QUIZ_MAX_ITEMS", d.quiz_max_items),
            quiz_min_items: profiled_env_usize(p, "QUIZ_MIN_ITEMS", d.quiz_min_items),
            flashcard_max: profiled_env_usize(p, "FLASHCARD_MAX", d.flashcard_max),
            flashcard_min: profiled_env_usize(p, "FLASHCARD_MIN", d.flashcard_min),
            budget_secs: profiled_env_opt(p, "GENERATION_BUDGET_SECS").and_then(|v| v.parse().ok()),
        }
    }
}

// ── Summary ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Target chunk size in whitespace tokens for one compression pass.
    pub chunk_tokens: usize,
    /// Sentences kept by the whole-document extractive fallback.
    pub fallback_sentences: usize,
    /// Combined summaries shorter than this are considered degenerate.
    pub min_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            chunk_tokens: 600,
            fallback_sentences: 5,
            min_chars: 50,
        }
    }
}

impl SummaryConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            chunk_tokens: profiled_env_usize(p, "SUMMARY_CHUNK_TOKENS", d.chunk_tokens),
            fallback_sentences: profiled_env_usize(p, "SUMMARY_FALLBACK_SENTENCES", d.fallback_sentences),
            min_chars: profiled_env_usize(p, "SUMMARY_MIN_CHARS", d.min_chars),
        }
    }
}

// ── LLM (abstractive compression) ─────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "none", "ollama", "openai"
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "none".to_string(),
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: None,
            temperature: 0.2,
            max_tokens: 512,
        }
    }
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", &d.provider),
            openai_api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            openai_model: profiled_env_or(p, "OPENAI_MODEL", &d.openai_model),
            openai_base_url: profiled_env_opt(p, "OPENAI_BASE_URL"),
            temperature: profiled_env_opt(p, "LLM_TEMPERATURE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.temperature),
            max_tokens: profiled_env_u32(p, "LLM_MAX_TOKENS", d.max_tokens),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "openai" => self.openai_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
        }
    }
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", &d.url),
            model: profiled_env_or(p, "OLLAMA_MODEL", &d.model),
        }
    }
}
