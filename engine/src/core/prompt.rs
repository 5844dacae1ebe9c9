//! Prompt assembly for content generation and topic suggestion
//!
//! Both builders are pure: identical input yields an identical prompt, so
//! a batch retry reproduces the exact prompts of the original round.

use shared::{BatchContext, ContentItem};

/// A named built-in writing style
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub value: &'static str,
    pub label: &'static str,
    pub instruction: &'static str,
}

/// Built-in style templates; the first entry is the fallback
pub const PROMPT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        value: "default",
        label: "Default (SEO-Optimized)",
        instruction: "Write in a professional but approachable tone",
    },
    PromptTemplate {
        value: "conversational",
        label: "Conversational",
        instruction: "Write in a warm, conversational tone as if speaking directly to the reader. Use short sentences, rhetorical questions, and relatable examples",
    },
    PromptTemplate {
        value: "technical",
        label: "Technical / In-Depth",
        instruction: "Write in an authoritative, technical tone. Include detailed explanations, data points, and expert-level insights. Prioritize depth over brevity",
    },
    PromptTemplate {
        value: "listicle",
        label: "Listicle",
        instruction: "Structure the content as a numbered list with a brief intro and conclusion. Each list item should have a bold heading and 2-3 sentences of explanation",
    },
    PromptTemplate {
        value: "local-seo",
        label: "Local SEO",
        instruction: "Emphasize local relevance throughout. Reference the geographic area, local landmarks, community aspects, and location-specific details. Optimize heavily for local search",
    },
];

fn template_for(value: Option<&str>) -> &'static PromptTemplate {
    value
        .and_then(|v| PROMPT_TEMPLATES.iter().find(|t| t.value == v))
        .unwrap_or(&PROMPT_TEMPLATES[0])
}

/// Build the generation prompt for one item
///
/// Optional inputs each contribute a line only when present. Exactly one
/// style source applies, in priority order: example content, then custom
/// instruction, then the named template (falling back to the default
/// template).
pub fn build_content_prompt(item: &ContentItem, context: &BatchContext) -> String {
    let type_label = item.content_type.label();

    let mut parts: Vec<String> = vec![format!(
        "Write a professional, SEO-optimized {type_label} with the title: \"{}\".",
        item.title
    )];

    if let Some(name) = &context.business.name {
        parts.push(format!("The business name is \"{name}\"."));
    }

    if let Some(service_area) = &item.service_area {
        parts.push(format!("The primary service area is: {service_area}."));
    }

    if let Some(audience) = &item.target_audience {
        parts.push(format!("The target audience is: {audience}."));
    }

    if let Some(geolocation) = &item.geolocation {
        parts.push(format!(
            "This content targets the geographic area: {geolocation}. Include local references where appropriate."
        ));
    }

    if let Some(keywords) = &item.target_keywords {
        parts.push(format!("Naturally incorporate these keywords: {keywords}."));
    }

    if !context.internal_links.is_empty() {
        parts.push(format!(
            "Where it fits naturally, link to these pages on the same site: {}.",
            context.internal_links.join(", ")
        ));
    }

    let target_words = context.word_count.unwrap_or(800);

    parts.push(String::new());
    parts.push("Requirements:".to_string());

    if let Some(example) = &context.style.example_content {
        parts.push("- Match the writing style, tone, and structure of the following example content:".to_string());
        parts.push(String::new());
        parts.push("--- EXAMPLE START ---".to_string());
        parts.push(example.clone());
        parts.push("--- EXAMPLE END ---".to_string());
        parts.push(String::new());
    } else if let Some(instruction) = &context.style.custom_instruction {
        parts.push(format!("- {instruction}"));
    } else {
        let template = template_for(context.style.template.as_deref());
        parts.push(format!("- {}", template.instruction));
    }

    parts.push("- Use proper heading hierarchy (H1, H2, H3)".to_string());
    parts.push("- Include an engaging introduction and conclusion".to_string());
    parts.push("- Optimize for search engines while keeping content reader-friendly".to_string());
    parts.push(format!("- Content should be approximately {target_words} words"));

    if item.include_cta {
        let mut cta = String::from(
            "- Include a compelling call-to-action section at the end, wrapped in its own paragraph tags with clear separation from surrounding content",
        );
        if let Some(phone) = &context.business.phone {
            cta.push_str(&format!(". Mention the phone number {phone}"));
        }
        if let Some(contact_url) = &context.business.contact_url {
            cta.push_str(&format!(". Link the call to action to {contact_url}"));
        }
        parts.push(cta);
    }

    parts.push(
        "- After all article content (including the CTA if present), add a horizontal rule (<hr>) followed by the meta description (150-160 characters) that leads with the primary keyword. Format it as: <hr><p><strong>Meta Description:</strong> [description text]</p>"
            .to_string(),
    );

    parts.push(String::new());
    parts.push(
        "Format the output as clean HTML with semantic tags (h1, h2, h3, p, ul, li, strong, em). Do not include <html>, <head>, or <body> tags — only the content body."
            .to_string(),
    );

    parts.join("\n")
}

/// Inputs for a topic suggestion round
#[derive(Debug, Clone)]
pub struct TopicRequest {
    pub count: u32,
    pub business_name: String,
    pub company_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub topic_direction: Option<String>,
    /// Titles the model must not overlap with (existing table rows plus
    /// anything the caller already knows about)
    pub existing_titles: Vec<String>,
}

/// Build the topic suggestion prompt
///
/// The dedup section listing existing titles appears only when there is
/// at least one title to avoid.
pub fn build_topic_prompt(request: &TopicRequest) -> String {
    let mut parts: Vec<String> = vec![format!(
        "Generate exactly {} unique blog post topic ideas for \"{}\".",
        request.count, request.business_name
    )];

    if let Some(company_type) = &request.company_type {
        parts.push(format!("This is a {company_type} business."));
    }
    match (&request.city, &request.state) {
        (Some(city), Some(state)) => parts.push(format!("Located in {city}, {state}.")),
        (Some(city), None) => parts.push(format!("Located in {city}.")),
        _ => {}
    }

    if let Some(direction) = &request.topic_direction {
        parts.push(format!("Focus the topics on these subjects: {direction}."));
    }

    parts.push(String::new());
    parts.push("Requirements:".to_string());
    parts.push("- Each topic should be specific, SEO-friendly, and relevant to the business".to_string());
    parts.push("- Topics should target different search intents (informational, commercial, local)".to_string());
    parts.push("- Include a mix of evergreen and timely topics".to_string());
    parts.push("- Each topic title should be compelling and click-worthy".to_string());

    if !request.existing_titles.is_empty() {
        parts.push(String::new());
        parts.push("IMPORTANT: Do NOT suggest topics that overlap with these existing topics:".to_string());
        for title in &request.existing_titles {
            parts.push(format!("- {title}"));
        }
    }

    parts.push(String::new());
    parts.push("Respond with a JSON array of objects. Each object must have these fields:".to_string());
    parts.push("- \"title\": string (the blog post title)".to_string());
    parts.push("- \"targetKeywords\": string (2-3 comma-separated SEO keywords)".to_string());
    parts.push("- \"targetAudience\": string (who this post is for)".to_string());
    parts.push(String::new());
    parts.push("Respond ONLY with the JSON array, no other text.".to_string());

    parts.join("\n")
}
