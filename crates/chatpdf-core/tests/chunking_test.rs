use chatpdf_config::{ChunkSizer, ChunkingConfig};
use chatpdf_core::chunking::TextChunker;
use chatpdf_core::Chunk;
use pretty_assertions::assert_eq;

fn sample_text() -> String {
    let mut text = String::new();
    for paragraph in 0..12 {
        for sentence in 0..6 {
            text.push_str(&format!(
                "Paragraph {} sentence {} talks about rivers, mountains and old cities. ",
                paragraph, sentence
            ));
        }
        text.push_str("\n\n");
    }
    text
}

/// Running words with no sentence or paragraph breaks
fn word_text(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Characters shared by two adjacent chunks
fn shared_chars(text: &str, prev: &Chunk, next: &Chunk) -> usize {
    let prev_end = prev.offset + prev.text.len();
    if next.offset < prev_end {
        text[next.offset..prev_end].chars().count()
    } else {
        0
    }
}

fn chunker(size: usize, overlap: usize, sizer: ChunkSizer) -> TextChunker {
    TextChunker::new(&ChunkingConfig {
        chunk_size: size,
        chunk_overlap: overlap,
        sizer,
    })
    .unwrap()
}

/// Stitch chunks by offset, skipping the overlapping prefix of each
fn reconstruct(text: &str, chunks: &[Chunk]) -> String {
    let mut out = String::new();
    let mut end = 0;
    for chunk in chunks {
        let chunk_end = chunk.offset + chunk.text.len();
        let start = chunk.offset.max(end);
        if chunk_end > start {
            out.push_str(&text[start..chunk_end]);
        }
        end = end.max(chunk_end);
    }
    out
}

fn without_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn test_chunks_respect_maximum_size() {
    let text = sample_text();
    let chunker = chunker(300, 60, ChunkSizer::Characters);
    let chunks = chunker.chunk(&text).unwrap();

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        let size = chunker.measure(&chunk.text).unwrap();
        assert!(size <= 300, "chunk too long: {}", size);
    }
}

#[test]
fn test_offsets_point_into_source() {
    let text = sample_text();
    let chunks = chunker(300, 60, ChunkSizer::Characters).chunk(&text).unwrap();

    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
        assert_eq!(&text[chunk.offset..chunk.offset + chunk.text.len()], chunk.text);
    }
    for pair in chunks.windows(2) {
        assert!(pair[0].offset < pair[1].offset);
    }
}

#[test]
fn test_overlap_bounded() {
    let text = sample_text();
    let chunks = chunker(300, 60, ChunkSizer::Characters).chunk(&text).unwrap();

    for pair in chunks.windows(2) {
        let shared = shared_chars(&text, &pair[0], &pair[1]);
        assert!(shared <= 60, "overlap of {} exceeds 60", shared);
    }
}

#[test]
fn test_word_level_chunks_overlap() {
    let text = word_text(300);
    let chunker = chunker(300, 60, ChunkSizer::Characters);
    let chunks = chunker.chunk(&text).unwrap();
    assert!(chunks.len() > 2);

    let overlaps: Vec<usize> = chunks
        .windows(2)
        .map(|pair| shared_chars(&text, &pair[0], &pair[1]))
        .collect();
    assert!(overlaps.iter().all(|&shared| shared <= 60), "{:?}", overlaps);
    assert!(overlaps.iter().any(|&shared| shared > 0), "{:?}", overlaps);

    for chunk in &chunks {
        assert!(chunker.measure(&chunk.text).unwrap() <= 300);
    }
    assert_eq!(
        without_whitespace(&reconstruct(&text, &chunks)),
        without_whitespace(&text)
    );
}

#[test]
fn test_reconstruction_modulo_whitespace() {
    let text = sample_text();
    let chunks = chunker(300, 60, ChunkSizer::Characters).chunk(&text).unwrap();

    assert_eq!(
        without_whitespace(&reconstruct(&text, &chunks)),
        without_whitespace(&text)
    );
}

#[test]
fn test_short_text_is_one_trimmed_chunk() {
    let chunks = TextChunker::new(&ChunkingConfig::default())
        .unwrap()
        .chunk("\n  The capital of France is Paris.  \n")
        .unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "The capital of France is Paris.");
}

#[test]
fn test_token_sizer_bounds() {
    let text = sample_text();
    let chunker = chunker(64, 8, ChunkSizer::Tokens);
    let chunks = chunker.chunk(&text).unwrap();

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        let tokens = chunker.measure(&chunk.text).unwrap();
        assert!(tokens <= 64, "chunk has {} tokens", tokens);
        assert!(tokens < chunk.text.chars().count());
    }
}
