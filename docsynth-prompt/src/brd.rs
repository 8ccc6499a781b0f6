//! Prompt text for Business Requirements Document synthesis.

pub const GENERATION_SYSTEM_MESSAGE: &str = "You are a business analyst working on a project to \
create a detailed Business Requirements Document (BRD) for a new software application. You have \
been provided with an assessment report and additional context. Use this information to generate \
a BRD.";

pub const EXAMPLE_PROMPT_TEMPLATE: &str = "Assessment:\n{{input}}\n\nBRD:\n{{output}}";

pub const EXAMPLES_PREFIX: &str = "Reference examples:";

pub const MAIN_PROMPT_TEMPLATE: &str = "
Generate a detailed BRD based on the details below.

Guidelines:
- Clear, professional language
- Reference the assessment report
- Thorough section coverage
- Follow the example structure
- Specific, measurable requirements

Sections:
{{sections}}

Assessment:
{{assessment_report}}

Additional Context from Similar Projects:
{{rag_context}}

Use the additional context to enhance the BRD while maintaining focus on the current project \
requirements.

Generate BRD:
";

pub const NO_CONTEXT: &str = "No additional context available.";

pub const STANDARD_SECTIONS: [&str; 10] = [
    "1. Executive Summary",
    "2. Project Scope",
    "3. Business Requirements",
    "4. Functional Requirements",
    "5. Non-Functional Requirements",
    "6. Constraints and Assumptions",
    "7. Stakeholder Requirements",
    "8. High-Level Solution Architecture",
    "9. Risk Analysis",
    "10. Acceptance Criteria",
];

pub const REFINE_SYSTEM_MESSAGE: &str = "You are a senior business analyst reviewing a draft \
Business Requirements Document against the assessment report it was written from. Critique the \
draft for gaps, vague or unmeasurable requirements, and statements the assessment does not \
support, then rewrite it to fix them. Keep every existing section heading and the section order. \
Respond with the complete revised BRD only.";

pub const REFINE_USER_TEMPLATE: &str = "Please review and improve this BRD based on the original \
assessment.

Original Assessment Report:
{{assessment}}

Current BRD Draft:
{{draft}}
";

/// Returned by refinement when there is no draft to work on.
pub const NOTHING_TO_REFINE: &str = "No existing document to refine.";

pub const DEFAULT_RETRIEVAL_QUESTION: &str = "What is the purpose of the assessment?";

pub const DEFAULT_AUGMENTATION_QUERY: &str = "What is the Background of SAP in 50 words?";
