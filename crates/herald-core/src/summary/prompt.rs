//! Prompt template for release-note generation.

/// Topics the model is told to leave out of the notes.
pub const EXCLUDED_KEYWORDS: &[&str] = &[
    "dev dependencies",
    "tools updates",
    "non-user facing changes",
    "biome",
    "linting",
    "eslint",
    "npm",
    "formatting",
    "typescript",
    "prettier",
    "husky",
];

const PREAMBLE: &str = "Generate clear and user-friendly release notes from these commit logs in markdown format with no special characters:";

const INSTRUCTIONS: &str = r#"The release notes should focus only on **user-facing changes**. Ignore any internal updates or dev tools changes that do not impact the user experience.

- **Key Focus**: Only include **new features**, **bug fixes**, **enhancements**, or **important user-facing changes**.
- **Exclude**: Any updates related to development dependencies, tools, linting, formatting, or internal configurations. Specifically, exclude changes related to the following keywords:
{keywords}
- **Objective**: Provide users with concise, clear, and engaging descriptions of what has changed in the release.

#### **Steps:**

1. **Review** the commit messages to identify the **user-facing** changes (features, bug fixes, or other improvements).
2. **Exclude** any changes related to the tools or technologies mentioned in the **Keywords to Avoid** section above. If a commit message or code change refers to these excluded topics, do **not include it** in the final release note.
3. **Summarize** the relevant changes into simple and professional language that a user would care about.
4. **Organize** the changes into the following sections:
    - **New Features**: List any new features or functionality that have been introduced.
    - **Bug Fixes**: List any issues that have been fixed, improving user experience or performance.
    - **Extra Notes**: Any additional important information or recommendations for users.
5. **Do not include** internal dev dependencies or non-user-facing updates.
6. **Focus on** the key changes that would directly impact users' experience.

#### **Format for Output:**

# What's New

## New Features
• [Brief description of the new feature]
• [Brief description of another new feature]

## Bug Fixes
• [Brief description of the bug fix]
• [Brief description of another bug fix]

## Extra Notes
• [Any additional notes for the users]
"#;

/// Build the release-notes prompt around raw commit-log text.
///
/// The content is embedded verbatim inside a fenced block.
pub fn build_release_notes_prompt(content: &str) -> String {
    let keywords = EXCLUDED_KEYWORDS
        .iter()
        .map(|k| format!("  - {k}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{PREAMBLE}\n```\n{content}\n```\n{}",
        INSTRUCTIONS.replace("{keywords}", &keywords)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_content_in_fence() {
        let prompt = build_release_notes_prompt("fix: crash on startup");
        assert!(prompt.contains("```\nfix: crash on startup\n```"));
        assert!(prompt.starts_with(PREAMBLE));
    }

    #[test]
    fn test_prompt_lists_every_excluded_keyword() {
        let prompt = build_release_notes_prompt("");
        for keyword in EXCLUDED_KEYWORDS {
            assert!(prompt.contains(&format!("  - {keyword}\n")), "missing {keyword}");
        }
        assert!(!prompt.contains("{keywords}"));
    }

    #[test]
    fn test_prompt_names_all_sections() {
        let prompt = build_release_notes_prompt("feat: dark mode");
        assert!(prompt.contains("# What's New"));
        for section in ["New Features", "Bug Fixes", "Extra Notes"] {
            assert!(prompt.contains(&format!("## {section}")));
        }
    }
}
