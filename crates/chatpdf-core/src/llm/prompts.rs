/// Fixed reply when the retrieved context does not contain the answer
pub const REFUSAL: &str = "answer is not available in the context";

pub const QA_TEMPLATE: &str = r#"Answer the question as detailed as possible from the provided context, make sure to provide all the details, if the answer is not in
provided context just say, "answer is not available in the context", don't provide the wrong answer


Context:
 {context}?

Question:
{question}

Answer:
"#;

/// Fill the question-answering template, stuffing every context chunk in order
pub fn render_qa_prompt(context: &[String], question: &str) -> String {
    QA_TEMPLATE
        .replace("{context}", &context.join("\n\n"))
        .replace("{question}", question)
}

/// Whether a model reply is a statement of the refusal phrase
///
/// Case, punctuation and surrounding filler such as "The" or "Sorry," are
/// ignored; a longer reply that merely quotes the phrase is not a refusal.
pub fn is_refusal(reply: &str) -> bool {
    let normalized = normalize(reply);
    match normalized.find(REFUSAL) {
        Some(_) => normalized.len() <= REFUSAL.len() + 24,
        None => false,
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
