//! Prompt templates for report sections.

use serde_json::Value;

use super::normalize::{safe_string, ReportContext};
use super::section::Section;

/// System prompt sent ahead of every section prompt.
pub const SYSTEM_PROMPT: &str = r#"
You are an expert forensic engineer generating professional report sections.
Guidelines:
1. Use formal, technical language
2. Include specific context details
3. Maintain logical flow
4. Support conclusions with evidence
5. Reference documentation appropriately
6. Use unique phrasing
7. Ensure completeness
8. Incorporate custom instructions while maintaining standards
9. Do NOT invent or use placeholders like [Client Name]. Use actual context values or 'N/A'.
10. For the Table of Contents, use a clean, minimal layout in Markdown. Avoid bullet points or asterisks.
11. Do not call "Table of Contents" by its name at the top, because it is appearing twice. Similarly, for "Introduction".
11. Make it so that each section is as long and detailed as possible. But don't ever end a section in midsentence. If you have to do that, just make it shorter to complete the last thought.
"#;

/// Build the user prompt for a section.
///
/// `section_name` is the raw caller value; unknown names get a generic prompt
/// that mentions the name verbatim. `weather_data` is embedded as pretty JSON
/// in the meteorologist section only.
pub fn build_section_prompt(
    section_name: Option<&str>,
    context: &ReportContext,
    weather_data: &Value,
    custom_instructions: Option<&Value>,
) -> String {
    let base = match section_name.and_then(Section::from_name) {
        Some(section) => section_template(section, context, weather_data),
        None => fallback_template(section_name.unwrap_or_default()),
    };

    let custom = safe_string(custom_instructions, "");
    if custom.is_empty() {
        base
    } else {
        format!("{}\n\nAdditional Instructions: {}", base, custom)
    }
}

fn fallback_template(section_name: &str) -> String {
    format!(
        "Write a professional engineering section about \"{}\".\n\
         Do not use placeholders like [Client Name]. Use actual context or 'N/A'.",
        section_name
    )
}

fn section_template(section: Section, ctx: &ReportContext, weather_data: &Value) -> String {
    match section {
        Section::Introduction => format!(
            r#"
You are writing the "Introduction" section for a forensic engineering report.
DO NOT invent placeholder text like [Client Name or Entity]. Use "{client}" or "N/A" if missing.

Emphasize the reason for this inspection, the property type,
the date(s) involved ({investigation}, {loss}),
and mention that further details follow in subsequent sections.
Use professional engineering language.
"#,
            client = ctx.client_name,
            investigation = ctx.investigation_date,
            loss = ctx.date_of_loss,
        ),
        Section::Authorization => format!(
            r#"
You are writing the "Authorization and Scope of Investigation" section for a forensic engineering report.
DO NOT invent placeholder text like [Client Name or Entity].
Use "{client}" or "N/A" if missing.

Include a concise background:
- Investigation Date: {investigation}
- Property Name (Project): {client}
- Claim Type(s): {claims}

Required Points:
1) Who authorized the investigation
2) The scope of work
3) Outline major tasks (site visit, photos, etc.)
4) Mention attachments if any
"#,
            client = ctx.client_name,
            investigation = ctx.investigation_date,
            claims = ctx.claim_types,
        ),
        Section::Background => format!(
            r#"
You are writing the "Background Information" section for a forensic engineering report.
DO NOT invent placeholder text. Use "{client}" or "N/A" if missing.

Property details:
- Property Type: {property_type}
- Property Age: {age} years
- Construction Type: {construction}
- Current Use: {current_use}
- Square Footage: {square_footage}
"#,
            client = ctx.client_name,
            property_type = ctx.property_type,
            age = ctx.property_age,
            construction = ctx.construction_type,
            current_use = ctx.current_use,
            square_footage = ctx.square_footage,
        ),
        Section::Observations => format!(
            r#"
You are writing the "Site Observations and Analysis" section.
DO NOT invent placeholders. Use actual context.

Affected Areas: {areas}

Required Points:
1) Summarize observations
2) Briefly analyze correlation with claimed cause(s): {claims}
3) Reference photos or tests if needed
"#,
            areas = ctx.affected_areas,
            claims = ctx.claim_types,
        ),
        Section::Moisture => r#"
You are writing the "Survey" (Moisture) section for a forensic engineering report.
Discuss any moisture surveys or mention none if not applicable.
Use professional engineering language.
"#
        .to_string(),
        Section::Meteorologist => format!(
            r#"
You are writing the "Meteorologist Report" section.
DO NOT use placeholders.

Weather Data: {weather}

Focus on wind speeds, hail possibility, precipitation, etc.,
and how they correlate to the claimed damages.
"#,
            weather = pretty_weather(weather_data),
        ),
        Section::Conclusions => r#"
You are writing the "Conclusions and Recommendations" section.
DO NOT use placeholders.

1) Summarize main findings
2) Tie back to the cause(s) of loss
3) Outline recommended next steps or repairs
"#
        .to_string(),
        Section::Rebuttal => r#"
You are writing the "Rebuttal" section.
DO NOT use placeholders.

Address any third-party reports or conflicting opinions with professional analysis.
"#
        .to_string(),
        Section::Limitations => r#"
You are writing the "Limitations" section.
DO NOT use placeholders.

Include typical disclaimers about scope, data reliance, and so on.
"#
        .to_string(),
        Section::TableOfContents => {
            let entries: Vec<String> = Section::ALL
                .iter()
                .filter(|s| **s != Section::TableOfContents)
                .enumerate()
                .map(|(i, s)| format!("{}. {}", i + 1, s.title()))
                .collect();
            format!(
                r#"
You are generating a "Table of Contents" in markdown for a forensic engineering report.
DO NOT use placeholders.

It should include:
{}
"#,
                entries.join("\n")
            )
        }
        Section::OpeningLetter => format!(
            r#"
You are writing an "Opening Letter" for the final forensic engineering report.
It should appear before the Table of Contents.

DO NOT invent placeholders. Use actual data or 'N/A' if missing.

For example:
---
Date of Loss: {loss}
Cause(s): {claims}
Property: {client}
Location: {location}

Dear [Somebody],

North Star Forensics, LLC (NSF) is pleased to submit this report
for the above-referenced file. By signature below, this report was authorized
and prepared under the direct supervision of the undersigned professional.

Please contact us if you have any questions regarding this report.

Signed,
{engineer}
License No. {license}
Email: {email}
Phone: {phone}
---
"#,
            loss = ctx.date_of_loss,
            claims = ctx.claim_types,
            client = ctx.client_name,
            location = ctx.location,
            engineer = ctx.engineer_name,
            license = ctx.engineer_license,
            email = ctx.engineer_email,
            phone = ctx.engineer_phone,
        ),
    }
}

fn pretty_weather(weather_data: &Value) -> String {
    serde_json::to_string_pretty(weather_data).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_prompt_guidelines() {
        assert!(SYSTEM_PROMPT.contains("You are an expert forensic engineer"));
        // Both closing guidelines carry the number 11
        assert_eq!(SYSTEM_PROMPT.matches("\n11. ").count(), 2);
        assert!(!SYSTEM_PROMPT.contains("\n12. "));
    }

    fn sample_context() -> ReportContext {
        ReportContext::from_value(Some(&json!({
            "clientName": "440 Plaza Shopping Center",
            "investigationDate": "2014-10-02",
            "dateOfLoss": "2014-03-28",
            "claimType": ["Wind", "Hail"],
            "location": "Killeen, TX",
            "engineerName": "Jane Doe",
            "affectedAreas": ["Building 1 roof", "Building 3 roof"]
        })))
    }

    #[test]
    fn test_introduction_template() {
        let prompt = build_section_prompt(Some("introduction"), &sample_context(), &json!({}), None);
        assert!(prompt.contains(r#"the "Introduction" section"#));
        assert!(prompt.contains(r#"Use "440 Plaza Shopping Center""#));
        assert!(prompt.contains("(2014-10-02, 2014-03-28)"));
        assert!(!prompt.contains("Additional Instructions"));
    }

    #[test]
    fn test_section_lookup_is_case_insensitive() {
        let ctx = sample_context();
        let a = build_section_prompt(Some("openingLetter"), &ctx, &json!({}), None);
        let b = build_section_prompt(Some(" openingletter "), &ctx, &json!({}), None);
        assert_eq!(a, b);
        assert!(a.contains("Signed,\nJane Doe\nLicense No. Engineer License Number"));
        assert!(a.contains("Location: Killeen, TX"));
        assert!(a.contains("Cause(s): Wind, Hail"));
    }

    #[test]
    fn test_unknown_section_uses_fallback() {
        let prompt = build_section_prompt(Some("Executive Summary"), &sample_context(), &json!({}), None);
        assert!(prompt.starts_with(r#"Write a professional engineering section about "Executive Summary"."#));
        assert!(prompt.contains("Use actual context or 'N/A'."));
    }

    #[test]
    fn test_missing_section_uses_fallback() {
        let prompt = build_section_prompt(None, &sample_context(), &json!({}), None);
        assert!(prompt.starts_with(r#"Write a professional engineering section about ""."#));
    }

    #[test]
    fn test_custom_instructions_appended() {
        let ctx = sample_context();
        let prompt = build_section_prompt(
            Some("rebuttal"),
            &ctx,
            &json!({}),
            Some(&json!("Reference the Nelson Forensics report.")),
        );
        assert!(prompt.ends_with("\n\nAdditional Instructions: Reference the Nelson Forensics report."));

        let blank = build_section_prompt(Some("rebuttal"), &ctx, &json!({}), Some(&json!("   ")));
        assert!(!blank.contains("Additional Instructions"));

        let wrong_type = build_section_prompt(Some("rebuttal"), &ctx, &json!({}), Some(&json!(7)));
        assert!(!wrong_type.contains("Additional Instructions"));
    }

    #[test]
    fn test_meteorologist_embeds_weather() {
        let weather = json!({ "maxWindGust": "66.7 mph", "hailPossible": "Yes" });
        let prompt = build_section_prompt(Some("meteorologist"), &sample_context(), &weather, None);
        assert!(prompt.contains("Weather Data: {\n  \"maxWindGust\": \"66.7 mph\",\n  \"hailPossible\": \"Yes\"\n}"));

        let empty = build_section_prompt(Some("meteorologist"), &sample_context(), &json!({}), None);
        assert!(empty.contains("Weather Data: {}"));
    }

    #[test]
    fn test_observations_fallbacks() {
        let ctx = ReportContext::from_value(None);
        let prompt = build_section_prompt(Some("observations"), &ctx, &json!({}), None);
        assert!(prompt.contains("Affected Areas: None"));
        assert!(prompt.contains("claimed cause(s): N/A"));
    }

    #[test]
    fn test_table_of_contents_lists_sections() {
        let prompt = build_section_prompt(Some("tableofcontents"), &sample_context(), &json!({}), None);
        assert!(prompt.contains("1. Opening Letter\n2. Introduction\n3. Authorization and Scope of Investigation"));
        assert!(prompt.contains("6. Survey\n7. Meteorologist Report"));
        assert!(prompt.contains("10. Limitations\n"));
    }

    #[test]
    fn test_every_section_has_a_template() {
        let ctx = sample_context();
        for section in Section::ALL {
            let prompt = build_section_prompt(Some(section.key()), &ctx, &json!({}), None);
            assert!(!prompt.starts_with("Write a professional engineering section about"));
        }
    }
}
