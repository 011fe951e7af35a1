//! Marketing plan prompt renderer.
//!
//! Assembles the prompt sent to the generation provider from a form
//! submission. The skeleton is fixed: every numbered section is emitted even
//! when the form is empty, so the model always receives the same structure.
//!
//! Layout:
//! ```text
//! <persona preamble + primary goal>
//! ---
//! ### 1. Executive Summary
//! ---
//! ### 2. Foundational Business Identity
//! ---
//! ### 3. Target Audience Deep Dive      (one block per ICP index)
//! ---
//! ### 4. Core Messaging & Brand Voice
//! ---
//! ### 5. Offerings to Promote           (one block per offering index)
//! ---
//! ### 6. Actionable Channel & Content Strategy
//! ---
//! ### 7. KPIs & Measuring Success
//! ---
//! <closing instruction>
//! ```

use std::fmt::Write as _;

use marketplan_types::form::{fields, FormSubmission};
use marketplan_types::plan::MarketingPlanPrompt;

const SECTION_RULE: &str = "\n\n---\n\n";

const PREAMBLE: &str = "You are an expert marketing strategist for a company called gibLink Ai. \
Your task is to generate a comprehensive, actionable AI Marketing Plan based ONLY on the \
following information provided by the user. The plan should be structured in Markdown format \
with clear headings and be encouraging and empowering in tone.";

const CLOSING: &str = "Now, generate the full marketing plan based on this structure.";

/// Section headings in render order.
pub const SECTION_HEADINGS: [&str; 7] = [
    "### 1. Executive Summary",
    "### 2. Foundational Business Identity",
    "### 3. Target Audience Deep Dive",
    "### 4. Core Messaging & Brand Voice",
    "### 5. Offerings to Promote",
    "### 6. Actionable Channel & Content Strategy",
    "### 7. KPIs & Measuring Success",
];

/// Render a submission into the marketing plan prompt.
///
/// Pure and deterministic: identical input always yields identical output.
pub fn render(form: &FormSubmission) -> MarketingPlanPrompt {
    let goal = form.get(fields::PRIMARY_MARKETING_GOAL);

    let sections = [
        format!("{PREAMBLE}\n\n**User's Primary Goal:**\n{goal}"),
        format!(
            "{}\n*A brief, high-level overview of the marketing plan, tailored to the user's primary goal.*",
            SECTION_HEADINGS[0]
        ),
        business_identity(form),
        target_audience(form),
        brand_voice(form),
        offerings(form),
        format!(
            "{}\n*A step-by-step plan for reaching the target audience, based on their goal and watering holes.*",
            SECTION_HEADINGS[5]
        ),
        format!(
            "{}\n*How we will track our progress toward the primary goal of \"{goal}\".*",
            SECTION_HEADINGS[6]
        ),
        CLOSING.to_string(),
    ];

    let mut text = sections.join(SECTION_RULE);
    text.push('\n');
    MarketingPlanPrompt::new(text)
}

fn business_identity(form: &FormSubmission) -> String {
    format!(
        "{}\n\
        *A summary of the core business details that will inform the marketing strategy.*\n\
        - **Business Name:** {}\n\
        - **Vision Statement:** {}\n\
        - **Mission Statement:** {}\n\
        - **Core Values:** {}\n\
        - **Unique Value Proposition:** Our company is better than our primary competitor, {}, because {}.",
        SECTION_HEADINGS[1],
        form.get(fields::BUSINESS_NAME),
        form.get(fields::VISION_STATEMENT),
        form.get(fields::MISSION_STATEMENT),
        form.get(fields::CORE_VALUES),
        form.get(fields::PRIMARY_COMPETITOR),
        form.get(fields::UVP_DIFFERENTIATOR),
    )
}

fn target_audience(form: &FormSubmission) -> String {
    let mut section = format!(
        "{}\n*A detailed look at the customer segments this plan will target.*",
        SECTION_HEADINGS[2]
    );

    // Parallel sequences: pain points and watering holes pair with the segment by index.
    for (index, segment) in form
        .sequence(fields::ICP_SEGMENT_NAME)
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        let _ = write!(
            section,
            "\n\n**Ideal Customer Profile {}: {segment}**\n\
            - **Pain Points to Solve:** {}\n\
            - **Where to Find Them (Watering Holes):** {}",
            index + 1,
            form.entry(fields::ICP_PAIN_POINTS, index),
            form.entry(fields::ICP_WATERING_HOLES, index),
        );
    }

    section
}

fn brand_voice(form: &FormSubmission) -> String {
    format!(
        "{}\n\
        *How we will communicate. This defines the personality of our marketing.*\n\
        - **Brand Voice:** We are {} but not {}. We are also {} but not {}.\n\
        - **Core Content Pillars:** Our marketing content will revolve around these themes: {}.",
        SECTION_HEADINGS[3],
        form.get(fields::BRAND_VOICE_POSITIVE_1),
        form.get(fields::BRAND_VOICE_NEGATIVE_1),
        form.get(fields::BRAND_VOICE_POSITIVE_2),
        form.get(fields::BRAND_VOICE_NEGATIVE_2),
        form.get(fields::CONTENT_PILLARS),
    )
}

fn offerings(form: &FormSubmission) -> String {
    let mut section = format!(
        "{}\n*The specific products or services at the center of this marketing plan.*",
        SECTION_HEADINGS[4]
    );

    for (index, offering) in form
        .sequence(fields::OFFERING_NAME)
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        let _ = write!(
            section,
            "\n\n- **Offering:** {offering}\n- **Key Benefit:** {}",
            form.entry(fields::KEY_BENEFIT, index),
        );
    }

    section
}
