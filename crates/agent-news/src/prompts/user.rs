//! User message for news requests

/// Build the request sent to the agent for `companies`
///
/// ```
/// use agent_news::prompts::news_request;
///
/// let companies = vec!["Apple".to_string(), "Microsoft".to_string()];
/// assert_eq!(
///     news_request(&companies),
///     "What are the latest news stories about Apple and Microsoft"
/// );
/// ```
pub fn news_request(companies: &[String]) -> String {
    format!(
        "What are the latest news stories about {}",
        companies.join(" and ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_company() {
        assert_eq!(
            news_request(&["Nvidia".to_string()]),
            "What are the latest news stories about Nvidia"
        );
    }

    #[test]
    fn test_keeps_order() {
        let companies: Vec<String> = ["Tesla", "Amazon", "Meta"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            news_request(&companies),
            "What are the latest news stories about Tesla and Amazon and Meta"
        );
    }
}
