mod gemini;
mod prompt;
mod provider;

pub use gemini::{GeminiConfig, GeminiSynthesizer};
pub use prompt::{MAX_CONTEXT_RECORDS, NO_RESULTS_SENTINEL, PREAMBLE, build_prompt};
#[cfg(test)]
pub use provider::MockAnswerSynthesizer;
pub use provider::AnswerSynthesizer;
