//! Prompt assembly for the review model.
//!
//! The prompt lists, per file, the valid comment anchors (diff positions
//! of added lines) and the new file content, plus the reference document
//! when one is configured. The model is told to answer with the JSON
//! shape `parse_model_output` expects and to use only listed anchors.

use crate::model::ReviewRequest;
use std::fmt::Write;

pub fn build_prompt(request: &ReviewRequest) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are reviewing translation changes in the pull request \"{}\".",
        request.pr_title
    );
    prompt.push_str(
        "Check the added locale lines below for linguistic problems: \
         wrong or inconsistent terminology, grammar, placeholder mismatches, \
         encoding artifacts.\n\n",
    );

    if let Some(reference) = &request.reference {
        prompt.push_str("Reference document:\n");
        prompt.push_str(reference);
        prompt.push_str("\n\n");
    }

    for file in &request.files {
        let _ = writeln!(prompt, "=== File: {} ===", file.filename);

        prompt.push_str("Added lines (anchor -> content):\n");
        for line in &file.added {
            let _ = writeln!(prompt, "  {} -> {}", line.diff_position, line.text);
        }

        if let Some(content) = &file.content {
            prompt.push_str("Full file content:\n");
            prompt.push_str(content);
            if !content.ends_with('\n') {
                prompt.push('\n');
            }
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "Respond with a single JSON object, no prose: \
         {\"comments\": [{\"filename\": string, \"diff_position\": number, \
         \"message\": string}], \"overall_comment\": string or null}. \
         Use only the anchor numbers listed above; comments on other \
         positions are discarded.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileForReview;
    use i18n_diff::AddedLine;

    fn sample_request() -> ReviewRequest {
        ReviewRequest {
            pr_title: "Add German translations".to_string(),
            reference: Some("Glossary: 'cart' -> 'Warenkorb'".to_string()),
            files: vec![FileForReview {
                filename: "locales/de.json".to_string(),
                content: Some("{\n  \"cart\": \"Einkaufswagen\"\n}".to_string()),
                added: vec![AddedLine {
                    filename: "locales/de.json".to_string(),
                    diff_position: 2,
                    new_line: 2,
                    text: "  \"cart\": \"Einkaufswagen\"".to_string(),
                }],
            }],
        }
    }

    #[test]
    fn test_prompt_lists_anchors_and_content() {
        let prompt = build_prompt(&sample_request());

        assert!(prompt.contains("Add German translations"));
        assert!(prompt.contains("=== File: locales/de.json ==="));
        assert!(prompt.contains("2 ->   \"cart\": \"Einkaufswagen\""));
        assert!(prompt.contains("Warenkorb"));
        assert!(prompt.contains("\"comments\""));
    }

    #[test]
    fn test_prompt_without_reference() {
        let mut request = sample_request();
        request.reference = None;
        let prompt = build_prompt(&request);
        assert!(!prompt.contains("Reference document:"));
    }
}
