#![allow(dead_code)]

use chatpdf_config::{Config, StorageConfig};
use chatpdf_core::{ChatPdfError, Embedder, LlmClient, PdfDocument, Result, Service};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const DIMENSION: usize = 64;

/// Hashed bag-of-words embedder that counts its calls
pub struct BagOfWordsEmbedder {
    model: String,
    pub calls: AtomicUsize,
}

impl BagOfWordsEmbedder {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vectorize(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; DIMENSION];
        for word in words(text) {
            let bucket = word.bytes().fold(7usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize));
            vector[bucket % DIMENSION] += 1.0;
        }
        vector
    }
}

impl Embedder for BagOfWordsEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::vectorize(text))
    }

    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }
}

/// Embedder whose service is always down
pub struct UnreachableEmbedder;

impl Embedder for UnreachableEmbedder {
    fn model_name(&self) -> &str {
        "mock-embedding"
    }

    fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(unreachable_service())
    }

    fn embed_many(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(unreachable_service())
    }
}

fn unreachable_service() -> ChatPdfError {
    ChatPdfError::ServiceUnavailable {
        service: Service::Embedding,
        message: "connection refused".to_string(),
    }
}

/// Generation client whose service is always down
pub struct UnavailableLlm;

impl LlmClient for UnavailableLlm {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(ChatPdfError::ServiceUnavailable {
            service: Service::Generation,
            message: "503 Service Unavailable".to_string(),
        })
    }
}

/// Answers with the context when every content word of the question occurs in it
pub struct KeywordLlm;

const STOP_WORDS: &[&str] = &["what", "which", "where", "when", "does", "with", "from"];

impl LlmClient for KeywordLlm {
    fn generate(&self, prompt: &str) -> Result<String> {
        let context = between(prompt, "Context:\n", "\n\nQuestion:\n").to_lowercase();
        let question = between(prompt, "Question:\n", "\n\nAnswer:");

        let context_words: Vec<String> = words(&context).collect();
        let answerable = words(question)
            .filter(|w| w.len() >= 4 && !STOP_WORDS.contains(&w.as_str()))
            .all(|w| context_words.contains(&w));

        if answerable {
            Ok(context.trim().trim_end_matches('?').to_string())
        } else {
            Ok("Answer is not available in the context.".to_string())
        }
    }
}

fn between<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
    let from = text.find(start).map(|i| i + start.len()).unwrap_or(0);
    let to = text[from..].find(end).map(|i| from + i).unwrap_or(text.len());
    &text[from..to]
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

pub fn config_in(dir: &Path) -> Config {
    Config {
        storage: StorageConfig {
            index_dir: dir.join("faiss_index"),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Single-document PDF with one page per entry
pub fn pdf(name: &str, pages: &[&str]) -> PdfDocument {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    PdfDocument::new(name, bytes)
}
