//! The FAQ page.
//!
//! Questions are grouped by category (categories in first-seen order,
//! questions in input order) and rendered as `<details>` items, so they
//! expand without script. The structured data lists every question in input
//! order.

use crate::emit;
use crate::naming::{collapse_newlines, count_label, path_slug, truncate_chars};
use crate::templates::{self, Layout, PageHead};
use crate::types::Faq;
use maud::{Markup, html};
use serde_json::{Value, json};

const SHORT_ANSWER_MAX: usize = 500;
const SCHEMA_ANSWER_MAX: usize = 1000;
const DEFAULT_CATEGORY: &str = "General";

const CHEVRON_ICON: &str = "M19 9l-7 7-7-7";

/// Categories in first-seen order, each with its questions.
pub fn group_by_category(faqs: &[Faq]) -> Vec<(&str, Vec<&Faq>)> {
    let mut groups: Vec<(&str, Vec<&Faq>)> = Vec::new();
    for faq in faqs {
        let category = if faq.category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            faq.category.as_str()
        };
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, items)) => items.push(faq),
            None => groups.push((category, vec![faq])),
        }
    }
    groups
}

/// Answer as shown in the collapsed list: at most 500 characters, one line.
pub fn short_answer(answer: &str) -> String {
    collapse_newlines(&truncate_chars(answer, SHORT_ANSWER_MAX))
}

fn structured_data(faqs: &[Faq]) -> Value {
    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            let text: String = faq.answer.chars().take(SCHEMA_ANSWER_MAX).collect();
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": { "@type": "Answer", "text": text },
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": questions,
    })
}

pub fn render(layout: &Layout, faqs: &[Faq]) -> Markup {
    let count = faqs.len();
    let reviewer = &layout.config.reviewer.name;
    let head = PageHead {
        title: format!("Sleep Apnea Surgery FAQ | {count} Common Questions Answered"),
        description: format!(
            "Get answers to {count} common questions about sleep apnea surgery, including costs, success rates, \
             insurance coverage, and recovery times. Medically reviewed by {reviewer}."
        ),
        path: emit::url_for(&emit::faq_page()),
        keywords: None,
        json_ld: vec![structured_data(faqs)],
    };
    let groups = group_by_category(faqs);

    let content = html! {
        (super::hero(
            &[("Home", "/")],
            "FAQ",
            "Sleep Apnea Surgery FAQ",
            &format!(
                "{} about costs, success rates, insurance and recovery",
                count_label(count, "question", "questions")
            ),
        ))
        div class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-12" {
            @if !groups.is_empty() {
                div class="category-list flex flex-wrap gap-2 mb-10" {
                    @for (category, items) in &groups {
                        a href={ "#" (path_slug(category)) }
                            class="bg-white border border-slate-200 text-slate-700 px-3 py-1 rounded-full text-sm hover:border-brand-600 hover:text-brand-600 transition" {
                            (category) " (" (items.len()) ")"
                        }
                    }
                }
            }
            @for (category, items) in &groups {
                section id=(path_slug(category)) class="mb-10" {
                    h2 class="text-2xl font-bold text-slate-900 mb-4" { (category) }
                    div class="space-y-4" {
                        @for faq in items {
                            details class="faq-item bg-white rounded-xl shadow-sm overflow-hidden" {
                                summary class="w-full px-6 py-4 text-left flex justify-between items-center hover:bg-slate-50 transition-colors" {
                                    span class="font-semibold text-slate-800 pr-4" { (faq.question) }
                                    (templates::icon("faq-chevron w-5 h-5 text-slate-400 flex-shrink-0 transition-transform", CHEVRON_ICON))
                                }
                                div class="px-6 pb-4" {
                                    p class="text-slate-600 leading-relaxed" { (short_answer(&faq.answer)) }
                                    span class="inline-block mt-2 text-xs bg-brand-50 text-brand-700 px-2 py-1 rounded" { (category) }
                                }
                            }
                        }
                    }
                }
            }
            div class="mt-12" { (layout.reviewer_card("Medically Reviewed")) }
        }
    };

    layout.page(&head, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn faq(id: &str, question: &str, category: &str, answer: &str) -> Faq {
        Faq {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    fn render_faqs(faqs: &[Faq]) -> String {
        let config = SiteConfig::default();
        let layout = Layout::new(&config, &[]);
        render(&layout, faqs).into_string()
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let faqs = vec![
            faq("faq-001", "Q1", "Cost", "a"),
            faq("faq-002", "Q2", "Recovery", "b"),
            faq("faq-003", "Q3", "Cost", "c"),
            faq("faq-004", "Q4", "", "d"),
        ];
        let groups = group_by_category(&faqs);
        let names: Vec<&str> = groups.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["Cost", "Recovery", "General"]);
        let cost: Vec<&str> = groups[0].1.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(cost, vec!["faq-001", "faq-003"]);
    }

    #[test]
    fn short_answer_truncates_then_flattens() {
        assert_eq!(short_answer("One.\n\nTwo."), "One. Two.");
        let long = "a".repeat(600);
        assert_eq!(short_answer(&long), format!("{}...", "a".repeat(500)));
    }

    #[test]
    fn every_question_rendered_once() {
        let faqs = vec![
            faq("faq-001", "How much does UPPP cost?", "Cost", "Around $10,000."),
            faq("faq-002", "How long is recovery?", "Recovery", "Two weeks."),
        ];
        let html = render_faqs(&faqs);
        assert_eq!(html.matches("<details").count(), 2);
        assert!(html.contains(r##"href="#cost""##));
        assert!(html.contains(r#"id="recovery""#));
    }

    #[test]
    fn structured_data_truncates_to_1000_chars() {
        let answer = "b".repeat(1500);
        let faqs = vec![faq("faq-001", "Q", "Cost", &answer)];
        let data = structured_data(&faqs);
        let text = data["mainEntity"][0]["acceptedAnswer"]["text"].as_str().unwrap();
        assert_eq!(text.chars().count(), 1000);
        assert_eq!(data["@type"], "FAQPage");
    }

    #[test]
    fn title_counts_questions() {
        let faqs = vec![faq("faq-001", "Q", "Cost", "A")];
        let html = render_faqs(&faqs);
        assert!(html.contains(
            "<title>Sleep Apnea Surgery FAQ | 1 Common Questions Answered | SleepApneaMatch.com</title>"
        ));
    }

    #[test]
    fn question_markup_escaped() {
        let faqs = vec![faq("faq-001", "Is <b>this</b> safe?", "Safety", "Yes & no.")];
        let html = render_faqs(&faqs);
        assert!(html.contains("Is &lt;b&gt;this&lt;/b&gt; safe?"));
        assert!(html.contains("Yes &amp; no."));
    }

    #[test]
    fn empty_list_renders_page() {
        let html = render_faqs(&[]);
        assert!(!html.contains("<details"));
        assert!(!html.contains("category-list"));
    }
}
