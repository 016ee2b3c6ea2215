//! Exploration brief handed to the autonomous browsing agent.

/// Example response embedded in the brief so the agent has a concrete shape
/// to imitate.
const EXAMPLE_RESPONSE: &str = r#"{
  "actions": [
    {
      "name": "search_issues",
      "description": "Search issues by keyword and read the result list",
      "parameters": [
        {
          "name": "query",
          "type": "string",
          "description": "Keywords to search for",
          "required": true
        }
      ],
      "steps": [
        "Click the search icon in the top navigation",
        "Type {query} into the search input and press Enter"
      ],
      "extractionSchema": {
        "title": "The title of each result",
        "url": "The link of each result"
      }
    }
  ]
}"#;

/// Build the fixed exploration brief for one target domain.
pub fn exploration_brief(domain: &str) -> String {
    format!(
        "You are exploring {domain} to find useful actions that can be automated for a user \
         of this site.\n\
         \n\
         Explore the site broadly AND deeply:\n\
         - Visit multiple navigation levels, not just the landing page.\n\
         - Open menus, settings pages, and anything hidden behind dropdowns or icons.\n\
         - Walk through multi-step workflows (creating, editing, searching, filtering) far \
         enough to record their steps.\n\
         \n\
         For every useful action, record:\n\
         - name: a short snake_case identifier\n\
         - description: one sentence on what the action does\n\
         - parameters: inputs the action needs, each with name, type (string, number, or \
         boolean), description, and whether it is required\n\
         - steps: the ordered browser instructions to perform it, embedding parameter values \
         as {{parameterName}} placeholders\n\
         - extractionSchema: when the action reads data off the page, the fields to extract \
         and what each one means\n\
         \n\
         Every placeholder used in steps must be declared in parameters.\n\
         \n\
         Respond with ONLY a JSON object in exactly this shape - no prose, no markdown \
         fences, nothing before or after the object:\n\
         \n\
         {example}",
        domain = domain,
        example = EXAMPLE_RESPONSE,
    )
}
