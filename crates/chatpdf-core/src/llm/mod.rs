mod answer;
mod gemini;
pub mod prompts;

pub use answer::AnswerGenerator;
pub use gemini::GeminiClient;
pub use prompts::REFUSAL;
