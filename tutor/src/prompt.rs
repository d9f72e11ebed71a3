/// Builds the text handed to the model.
///
/// A blank context yields the question verbatim; otherwise the context and
/// question are wrapped in the teaching-assistant template.
pub fn build_prompt(question: &str, context: &str) -> String {
    if context.trim().is_empty() {
        return question.to_string();
    }

    format!(
        r#"You are a helpful teaching assistant. Answer the following question based on the provided text, but feel free to use your own general knowledge to provide a more complete and helpful answer. Prioritize the provided text as the main source of truth.
---
Provided Text: "{context}"
---
Question: "{question}""#
    )
}
