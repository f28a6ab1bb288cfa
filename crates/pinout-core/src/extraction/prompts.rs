//! Prompt assembly for the extraction stages.

use crate::types::{is_empty_like, ExtractionStage};

/// Render the web extraction prompt for one attribute.
pub fn render_web_prompt(attribute_key: &str, instructions: &str, cleaned_web_data: &str) -> String {
    format!(
        r#"
You are an expert data extractor. Your goal is to answer a specific piece of information by applying the logic described in the 'Extraction Instructions' to the 'Cleaned Scraped Website Data' provided below. Use ONLY the provided website data as your context.

--- Cleaned Scraped Website Data ---
{cleaned_web_data}
--- End Cleaned Scraped Website Data ---

Extraction Instructions:
{extraction_instructions}

---
IMPORTANT: For the attribute key "{attribute_key}", do the following:
1. Independently answer the extraction task THREE times, as if reasoning from scratch each time, using only the provided Cleaned Scraped Website Data and Extraction Instructions.
2. Internally compare your three answers and select the one that is most consistent or most frequent among them. If all three answers are different, choose the one you believe is most justified by the context and instructions.
3. Respond with ONLY a single, valid JSON object containing exactly one key-value pair:
   - The key MUST be the string: "{attribute_key}"
   - The value MUST be the final answer you selected (as a JSON string).
   - If the information cannot be determined from the Cleaned Scraped Website Data based on the instructions, the value MUST be "NOT FOUND".
4. Do NOT include any explanations, intermediate answers, reasoning, or any text outside the JSON object.

Example Output Format:
{{"{attribute_key}": "extracted_value_based_on_instructions"}}

Output:
"#,
        cleaned_web_data = cleaned_web_data,
        extraction_instructions = instructions,
        attribute_key = attribute_key,
    )
}

/// Render the document (RAG) extraction prompt for one attribute.
pub fn render_document_prompt(
    attribute_key: &str,
    instructions: &str,
    available_values: &str,
    context: &str,
    part_number: Option<&str>,
) -> String {
    let part_number = part_number.unwrap_or("Not Provided");
    format!(
        r#"
You are an expert data extractor. Your goal is to extract a specific piece of information based on the Extraction Instructions provided below, using ONLY the Document Context from PDFs.

Part Number Information (if provided by user):
{part_number}

--- Document Context (from PDFs) ---
{context}
--- End Document Context ---

Extraction Instructions:
{extraction_instructions}

Available Dictionary Values for "{attribute_key}":
{available_values}

---
IMPORTANT: For the attribute key "{attribute_key}", do the following:
1. Look for information in the Document Context that matches the Extraction Instructions
2. Find the BEST MATCH from the Available Dictionary Values above
3. If no match is found in the dictionary, use "NOT FOUND" or appropriate default value
4. Respond with ONLY a single, valid JSON object containing exactly one key-value pair:
   - The key MUST be the string: "{attribute_key}"
   - The value MUST be one of the available dictionary values or "NOT FOUND"
5. Do NOT include any explanations, intermediate answers, reasoning, or any text outside of the single JSON object in your response.

Example Output Format:
{{"{attribute_key}": "best_match_from_dictionary"}}

Output:
"#,
        part_number = part_number,
        context = context,
        extraction_instructions = instructions,
        attribute_key = attribute_key,
        available_values = available_values,
    )
}

/// Strengthen the document instructions for a recheck pass.
///
/// When the prior answer was a "none"-like value the instructions call
/// it out explicitly and ask for an exhaustive search; otherwise they
/// ask for a more thorough second read. Stages without a recheck
/// variant return the instructions unchanged.
pub fn augment_for_recheck(
    instructions: &str,
    previous_value: &str,
    stage: ExtractionStage,
) -> String {
    match stage {
        ExtractionStage::FinalFallback => {
            if is_empty_like(previous_value) {
                format!(
                    "{instructions}\n\nCRITICAL: Previous extraction returned '{previous_value}'. This may be incorrect. Please be extremely thorough and look for ANY mention of this attribute, even if it's not explicitly labeled. Consider technical specifications, material properties, dimensions, or any related information that might indicate this attribute's value."
                )
            } else {
                format!(
                    "{instructions}\n\nIMPORTANT: This is a final recheck. Be more thorough and consider alternative interpretations. If the information is not explicitly stated, try to infer from related context or technical specifications."
                )
            }
        }
        ExtractionStage::ManualRecheck => {
            if is_empty_like(previous_value) {
                format!(
                    "{instructions}\n\nMANUAL RECHECK - CRITICAL: Previous extraction returned '{previous_value}'. This may be incorrect. Please be extremely thorough and look for ANY mention of this attribute, even if it's not explicitly labeled. Consider technical specifications, material properties, dimensions, or any related information that might indicate this attribute's value. This is a manual recheck request - be exhaustive in your search."
                )
            } else {
                format!(
                    "{instructions}\n\nMANUAL RECHECK: This is a manual recheck request. Please be extremely thorough and consider all possible interpretations. Look for any mention, even indirect, of this attribute in the document context."
                )
            }
        }
        ExtractionStage::Web | ExtractionStage::PdfFallback => instructions.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_prompt_interpolates_all_slots() {
        let prompt = render_web_prompt("Gender", "Male or Female", "scraped text here");
        assert!(prompt.contains("--- Cleaned Scraped Website Data ---\nscraped text here\n"));
        assert!(prompt.contains("Extraction Instructions:\nMale or Female\n"));
        assert!(prompt.contains("the attribute key \"Gender\""));
        assert!(prompt.contains("{\"Gender\": \"extracted_value_based_on_instructions\"}"));
        assert!(prompt.ends_with("Output:\n"));
    }

    #[test]
    fn test_document_prompt_defaults_part_number() {
        let prompt = render_document_prompt("Gender", "instructions", "[\"female\", \"male\"]", "ctx", None);
        assert!(prompt.contains("Part Number Information (if provided by user):\nNot Provided\n"));
        assert!(prompt.contains("Available Dictionary Values for \"Gender\":\n[\"female\", \"male\"]\n"));
        assert!(prompt.contains("{\"Gender\": \"best_match_from_dictionary\"}"));
    }

    #[test]
    fn test_document_prompt_with_part_number() {
        let prompt = render_document_prompt("Gender", "i", "[]", "ctx", Some("1-967616-1"));
        assert!(prompt.contains("Part Number Information (if provided by user):\n1-967616-1\n"));
    }

    #[test]
    fn test_final_recheck_flags_empty_like_answers() {
        let augmented = augment_for_recheck("base", "none", ExtractionStage::FinalFallback);
        assert!(augmented.starts_with("base\n\nCRITICAL: Previous extraction returned 'none'."));

        let augmented = augment_for_recheck("base", "male", ExtractionStage::FinalFallback);
        assert!(augmented.starts_with("base\n\nIMPORTANT: This is a final recheck."));
    }

    #[test]
    fn test_manual_recheck_variants() {
        let augmented = augment_for_recheck("base", "N/A", ExtractionStage::ManualRecheck);
        assert!(augmented.contains("MANUAL RECHECK - CRITICAL: Previous extraction returned 'N/A'."));
        assert!(augmented.ends_with("be exhaustive in your search."));

        let augmented = augment_for_recheck("base", "male", ExtractionStage::ManualRecheck);
        assert!(augmented.starts_with("base\n\nMANUAL RECHECK: This is a manual recheck request."));
    }

    #[test]
    fn test_web_stage_leaves_instructions_alone() {
        assert_eq!(augment_for_recheck("base", "x", ExtractionStage::Web), "base");
    }
}
