//! Prompt templates for the two model calls

use super::ComparisonRequest;
use crate::core::llm::ChatMessage;

/// System + user messages asking the model to propose objects and parameters
pub fn expansion_prompt(request: &ComparisonRequest, format_instructions: &str) -> Vec<ChatMessage> {
    let system = format!(
        "Given a task in {framework}, provide a list of relevant objects/tools and comparison parameters.\n\
         If a list of objects/tools and parameters is provided, append additional relevant ones \
         to ensure there are at least {min} objects and parameters each.\n\n\
         {format_instructions}",
        framework = request.framework,
        min = super::MIN_SUGGESTIONS,
        format_instructions = format_instructions,
    );

    let user = format!(
        "Task: {}\nObjects: {}\nComparison Parameters: {}",
        request.task,
        request.objects.join(", "),
        request.parameters.join(", ")
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// System + user messages for the tool-using comparison agent
pub fn comparison_prompt(request: &ComparisonRequest) -> Vec<ChatMessage> {
    let system = format!(
        "For a task in {}, using the list of objects and comparison parameters provided, \
         compare these objects based on qualitative and quantitative data.\n\
         Use the web scraping tool to gather accurate data for quantitative comparisons.\n\
         Give output in JSON format.",
        request.framework
    );

    let user = format!(
        "Objects: {}\nComparison Parameters: {}",
        request.objects.join(", "),
        request.parameters.join(", ")
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(messages: &[ChatMessage]) -> String {
        messages.iter().map(|m| m.text()).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_expansion_prompt_embeds_inputs_verbatim() {
        let request = ComparisonRequest::new("Web Scraping", "Python")
            .with_objects(["Scrapy", "Beautiful Soup"])
            .with_parameters(["Speed"]);

        let messages = expansion_prompt(&request, "FORMAT HERE");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[0].text().contains("Given a task in Python"));
        assert!(messages[0].text().ends_with("FORMAT HERE"));
        assert_eq!(
            messages[1].text(),
            "Task: Web Scraping\nObjects: Scrapy, Beautiful Soup\nComparison Parameters: Speed"
        );
    }

    #[test]
    fn test_expansion_prompt_with_empty_seeds() {
        let request = ComparisonRequest::new("Parsing {json}", "Rust & C++");

        let messages = expansion_prompt(&request, "");
        let text = joined(&messages);

        assert!(text.contains("Parsing {json}"));
        assert!(text.contains("Rust & C++"));
        assert!(messages[1].text().ends_with("Objects: \nComparison Parameters: "));
    }

    #[test]
    fn test_comparison_prompt_lists_expanded_sets() {
        let request = ComparisonRequest::new("Web Scraping", "Python")
            .with_objects(["Scrapy", "Selenium"])
            .with_parameters(["Speed", "Community"]);

        let messages = comparison_prompt(&request);

        assert!(messages[0].text().starts_with("For a task in Python"));
        assert!(messages[0].text().contains("JSON format"));
        assert_eq!(
            messages[1].text(),
            "Objects: Scrapy, Selenium\nComparison Parameters: Speed, Community"
        );
    }
}
