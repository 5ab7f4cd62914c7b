//! Prompt definitions shipped with docseek.

use crate::types::PromptDefinition;

/// Prompt that turns a question into a JSON array of search keywords.
pub const KEYWORDS_EXTRACT: &str = "keywords.extract";

/// Prompt that answers a question strictly from supplied documents.
pub const QA_ANSWER: &str = "qa.answer";

/// Every built-in prompt id.
pub const BUILTIN_IDS: [&str; 2] = [KEYWORDS_EXTRACT, QA_ANSWER];

const KEYWORDS_TEMPLATE: &str = "From the query below please extract search keywords. \
The search keywords must be part of the query string. \
Avoid words general to this domain such as: candidates, resume, contact, and details. \
Output a json formatted list of keyword strings. \
Each item in the output json should be a string.\
\n\nQuery:\n```{{query}}\n```";

const ANSWER_TEMPLATE: &str = "Use only the following context to answer the question at the end.\
\nDo not use anything other than the context below to answer the question.\
\nI'll repeat it is extremely important that you only use the provided context below to answer the question.\
\nIf the context below is not sufficient to answer, just say that you don't know, don't try to make up an answer.\
\n\nContext:\n\n{{context}}\n\nQuestion: {{question}}";

/// Built-in keyword extraction prompt.
pub fn keywords_prompt() -> PromptDefinition {
    definition(KEYWORDS_EXTRACT, "Search keyword extraction", KEYWORDS_TEMPLATE)
}

/// Built-in grounded answer prompt.
pub fn answer_prompt() -> PromptDefinition {
    definition(QA_ANSWER, "Context-grounded answer", ANSWER_TEMPLATE)
}

/// Look up a built-in prompt by id.
pub fn builtin_prompt(id: &str) -> Option<PromptDefinition> {
    match id {
        KEYWORDS_EXTRACT => Some(keywords_prompt()),
        QA_ANSWER => Some(answer_prompt()),
        _ => None,
    }
}

fn definition(id: &str, title: &str, template: &str) -> PromptDefinition {
    PromptDefinition {
        id: id.to_string(),
        title: title.to_string(),
        api_version: "1.0".to_string(),
        template: template.to_string(),
        temperature: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_resolve() {
        for id in BUILTIN_IDS {
            let def = builtin_prompt(id).unwrap();
            assert_eq!(def.id, id);
            assert!(!def.template.is_empty());
        }
        assert!(builtin_prompt("nope").is_none());
    }

    #[test]
    fn test_keyword_template_lists_stop_terms() {
        let def = builtin_prompt(KEYWORDS_EXTRACT).unwrap();
        assert!(def.template.contains("must be part of the query string"));
        assert!(def.template.contains("candidates, resume, contact, and details"));
        assert!(def.template.contains("{{query}}"));
    }

    #[test]
    fn test_answer_template_orders_context_before_question() {
        let def = builtin_prompt(QA_ANSWER).unwrap();
        let context_at = def.template.find("{{context}}").unwrap();
        let question_at = def.template.find("{{question}}").unwrap();
        assert!(def.template.starts_with("Use only the following context"));
        assert!(context_at < question_at);
    }
}
