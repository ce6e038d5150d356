mod gemini;

pub use gemini::GeminiEmbedder;
