// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Job extraction prompt template. Replace `{page_data}` before sending.
pub const JOB_EXTRACT_PROMPT_TEMPLATE: &str = r#"### SCRAPED TEXT FROM WEBSITE:
{page_data}

### INSTRUCTION:
The scraped text is from the careers page of a website.
Extract every job posting it contains, with the keys `role`, `experience`, `skills` and `description`.
If some information is missing, provide an empty value for that key
(e.g. "experience": "", "skills": [], "description": "").
Return a JSON ARRAY with this EXACT shape, even when only one job is found:
[
  {
    "role": "Job Title",
    "experience": "Experience",
    "skills": ["skill1", "skill2"],
    "description": "Job description"
  }
]
Return only valid JSON (no extra text)."#;

/// System prompt for cold email generation.
pub const EMAIL_SYSTEM: &str = "You write short, specific, professional cold emails \
    to hiring managers. You never invent projects, links or credentials that are not \
    given to you.";

/// Substitutes `{key}` placeholders in one left-to-right pass.
/// Inserted values are never rescanned, so braces inside job text or a persona survive as written.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let hit = vars.iter().find(|(key, _)| {
            tail[1..]
                .strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Cold email prompt template.
/// Replace: {job_description}, {persona}, {link_list}, {no_preamble}
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"### JOB DESCRIPTION:
{job_description}

### INSTRUCTION:
{persona}

Write a cold email to the hiring manager for the job described above, explaining how
your skills and projects fit its requirements.

Portfolio links to reference (use the most relevant; do not invent others):
{link_list}

{no_preamble}

### EMAIL (NO PREAMBLE):
"#;

/// Shown in place of the link list when the portfolio had no match.
pub const NO_LINKS_NOTE: &str =
    "(no matching portfolio links; do not mention or invent any links)";

/// Persona used when no `PERSONA_FILE` is configured.
pub const DEFAULT_PERSONA: &str = "You are Nemil Panchal, a final-year B.E. Information \
Technology student at Government Engineering College, Modasa (2022-2026). \
You have strong interests and skills in AI/ML, web development and game development. \
Your projects include an AI-driven mathematics learning platform, an image-based crop \
disease detection web app, a blockchain-enabled natural farming marketplace, a cricket \
match predictor built on a random forest model, a voice-based math solver and a \
retro-style FPS game in Python.
Your technical stack includes Python, C/C++, Java, JavaScript, React, React Native, \
Django, Node.js, MongoDB, MySQL, Redis, Git/GitHub, CI/CD, and blockchain tools such \
as Solidity, Truffle, MetaMask and IPFS.";
