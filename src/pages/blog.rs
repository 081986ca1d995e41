//! Blog index and posts.
//!
//! Each post in the bundled catalog is an article built around one FAQ
//! answer. The answer is rendered through pulldown-cmark, so blank-line
//! separated paragraphs and simple markdown lists come out as HTML. Raw HTML
//! in answers is shown as text.

use crate::emit;
use crate::naming::split_list;
use crate::templates::{self, Layout, PageHead};
use crate::types::{BlogPost, Faq};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, html as md_html};
use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s\)]+").expect("URL pattern is valid"));

const MAX_RELATED_PROCEDURES: usize = 6;
const DEFAULT_KEYWORDS: &str = "sleep apnea surgery, sleep apnea treatment";
const DEFAULT_CATEGORY: &str = "General";

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// A post paired with the FAQ it is built from.
pub type Entry<'a> = (&'a BlogPost, &'a Faq);

/// `"2026-01-10"` → `"January 2026"`. Unparseable dates are shown as given.
pub fn month_year(iso_date: &str) -> String {
    let mut parts = iso_date.splitn(3, '-');
    let year = parts.next().unwrap_or_default();
    let month = parts
        .next()
        .and_then(|m| m.parse::<usize>().ok())
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| MONTHS.get(i));
    match month {
        Some(name) if year.len() == 4 => format!("{name} {year}"),
        _ => iso_date.to_string(),
    }
}

/// Answer text as HTML paragraphs.
pub fn answer_html(answer: &str) -> String {
    let events = Parser::new(answer).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    md_html::push_html(&mut out, events);
    out
}

/// URLs cited in a sources field.
///
/// Citations are split on `", "` when present, otherwise on newlines; each
/// citation contributes its first URL. Citations without a URL are dropped.
pub fn source_urls(sources: &str) -> Vec<&str> {
    let citations: Vec<&str> = if sources.contains(", ") {
        sources.split(", ").collect()
    } else {
        sources.lines().collect()
    };
    citations
        .into_iter()
        .filter_map(|c| URL_PATTERN.find(c).map(|m| m.as_str()))
        .collect()
}

fn category(faq: &Faq) -> &str {
    if faq.category.is_empty() {
        DEFAULT_CATEGORY
    } else {
        &faq.category
    }
}

fn post_structured_data(layout: &Layout, post: &BlogPost, url: &str) -> Value {
    let config = layout.config;
    json!({
        "@context": "https://schema.org",
        "@type": "MedicalWebPage",
        "headline": post.title,
        "description": post.excerpt,
        "url": url,
        "datePublished": config.site.published,
        "dateModified": config.site.published,
        "author": { "@type": "Organization", "name": config.site.domain },
        "publisher": { "@type": "Organization", "name": config.site.domain },
        "reviewedBy": {
            "@type": "Person",
            "name": config.reviewer.name,
            "jobTitle": config.reviewer.title,
        },
        "about": { "@type": "MedicalCondition", "name": "Obstructive Sleep Apnea" },
    })
}

pub fn render_post(layout: &Layout, post: &BlogPost, faq: &Faq) -> Markup {
    let path = emit::url_for(&emit::blog_post_page(&post.slug));
    let keywords = if faq.seo_keywords.is_empty() {
        DEFAULT_KEYWORDS.to_string()
    } else {
        faq.seo_keywords.clone()
    };
    let head = PageHead {
        title: post.title.clone(),
        description: post.excerpt.clone(),
        keywords: Some(keywords),
        json_ld: vec![post_structured_data(layout, post, &layout.config.canonical_url(&path))],
        path,
    };
    let related: Vec<&str> = split_list(&faq.related_procedures)
        .into_iter()
        .take(MAX_RELATED_PROCEDURES)
        .collect();
    let urls = source_urls(&faq.sources);
    let blog_url = emit::url_for(&emit::blog_index());

    let content = html! {
        (templates::breadcrumb(&[("Home", "/"), ("Blog", blog_url.as_str())], &post.title))

        article class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-12" {
            header class="mb-8" {
                div class="flex items-center gap-2 text-sm text-slate-500 mb-4" {
                    span class="bg-brand-50 text-brand-700 px-2 py-1 rounded" { (category(faq)) }
                    span { (month_year(&layout.config.site.published)) }
                }
                h1 class="text-3xl md:text-4xl font-bold text-slate-900 mb-4" { (post.title) }
                p class="text-xl text-slate-600" { (post.excerpt) }
            }

            div class="mb-8" { (layout.reviewer_card("Medically Reviewed")) }

            div class="bg-white rounded-2xl p-8 shadow-sm" {
                h2 class="text-2xl font-bold text-slate-900 mb-6" { (faq.question) }
                div class="article-body" { (PreEscaped(answer_html(&faq.answer))) }

                @if !related.is_empty() {
                    div class="related-procedures mt-12 pt-8 border-t" {
                        h3 class="font-bold text-lg mb-4" { "Related Procedures" }
                        div class="flex flex-wrap gap-2" {
                            @for procedure in &related {
                                span class="bg-brand-50 text-brand-700 px-3 py-1 rounded-full text-sm" { (procedure) }
                            }
                        }
                    }
                }

                @if !urls.is_empty() {
                    div class="sources mt-8 pt-8 border-t" {
                        h3 class="font-bold text-lg mb-4" { "Sources & References" }
                        ul class="list-disc list-inside space-y-1" {
                            @for url in &urls {
                                li {
                                    a href=(url) target="_blank" rel="noopener" class="text-brand-600 hover:underline break-all" { (url) }
                                }
                            }
                        }
                    }
                }
            }

            div class="mt-12 bg-brand-50 rounded-2xl p-8 text-center" {
                h3 class="text-2xl font-bold text-slate-900 mb-4" { "Ready to Explore Your Options?" }
                p class="text-slate-600 mb-6" { "Find verified sleep apnea surgeons near you and compare procedures." }
                a href=(emit::url_for(&emit::locations_index()))
                    class="inline-block bg-brand-600 text-white px-6 py-3 rounded-lg font-semibold hover:bg-brand-700 transition" {
                    "Find a Provider"
                }
            }
        }
    };

    layout.page(&head, content)
}

pub fn render_index(layout: &Layout, entries: &[Entry]) -> Markup {
    let config = layout.config;
    let path = emit::url_for(&emit::blog_index());
    let structured = json!({
        "@context": "https://schema.org",
        "@type": "Blog",
        "name": format!("{} Blog", config.site.name),
        "url": config.canonical_url(&path),
        "publisher": { "@type": "Organization", "name": config.site.domain },
    });
    let head = PageHead {
        title: "Sleep Apnea Surgery Blog | Expert Insights & Research".to_string(),
        description: format!(
            "Expert articles on sleep apnea surgery, treatment options, success rates, and recovery. \
             Medically reviewed by {}.",
            config.reviewer.name
        ),
        path,
        keywords: None,
        json_ld: vec![structured],
    };
    let date = month_year(&config.site.published);

    let content = html! {
        (super::hero(
            &[("Home", "/")],
            "Blog",
            "Sleep Apnea Surgery Blog",
            "Expert insights on procedures, costs, and recovery, medically reviewed.",
        ))
        div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-12" {
            div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6" {
                @for (post, faq) in entries {
                    article class="post-card bg-white rounded-xl shadow-sm overflow-hidden hover:shadow-lg transition-shadow" {
                        a href=(emit::url_for(&emit::blog_post_page(&post.slug))) class="block p-6" {
                            div class="flex items-center gap-2 text-sm text-slate-500 mb-2" {
                                span class="bg-brand-50 text-brand-700 px-2 py-1 rounded text-xs" { (category(faq)) }
                                span { (date) }
                            }
                            h2 class="text-xl font-bold text-slate-900 mb-2" { (post.title) }
                            p class="text-slate-600 mb-4" { (post.excerpt) }
                            span class="text-brand-600 font-medium" { "Read more →" }
                        }
                    }
                }
            }
        }
    };

    layout.page(&head, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn post() -> BlogPost {
        BlogPost {
            faq_id: "faq-001".into(),
            title: "Is Sleep Apnea Surgery Covered by Insurance?".into(),
            slug: "sleep-apnea-surgery-insurance-coverage".into(),
            excerpt: "Learn about insurance requirements.".into(),
        }
    }

    fn faq() -> Faq {
        Faq {
            id: "faq-001".into(),
            question: "Does insurance cover sleep apnea surgery?".into(),
            answer: "Usually, yes.\n\nMost plans require a CPAP trial first.".into(),
            category: "Insurance".into(),
            related_procedures: "UPPP, Inspire, MMA, Septoplasty, Tonsillectomy, TORS, GA, Hyoid"
                .into(),
            sources: "AASM guideline https://aasm.org/guide, \
                      Inspire site (https://inspiresleep.com), Book chapter"
                .into(),
            seo_keywords: String::new(),
        }
    }

    fn render(post: &BlogPost, faq: &Faq) -> String {
        let config = SiteConfig::default();
        let layout = Layout::new(&config, &[]);
        render_post(&layout, post, faq).into_string()
    }

    #[test]
    fn month_year_formats_iso_dates() {
        assert_eq!(month_year("2026-01-10"), "January 2026");
        assert_eq!(month_year("2025-12-01"), "December 2025");
        assert_eq!(month_year("soon"), "soon");
        assert_eq!(month_year("2026-13-01"), "2026-13-01");
    }

    #[test]
    fn answer_paragraphs_rendered() {
        let html = answer_html("First.\n\nSecond.");
        assert_eq!(html, "<p>First.</p>\n<p>Second.</p>\n");
    }

    #[test]
    fn answer_raw_html_is_escaped() {
        let html = answer_html("Hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn sources_split_on_comma_space() {
        let f = faq();
        assert_eq!(
            source_urls(&f.sources),
            vec!["https://aasm.org/guide", "https://inspiresleep.com"]
        );
    }

    #[test]
    fn sources_split_on_newlines_without_comma_space() {
        let urls = source_urls("One http://a.example/x\nTwo (https://b.example/y)\nThree");
        assert_eq!(urls, vec!["http://a.example/x", "https://b.example/y"]);
    }

    #[test]
    fn related_procedures_capped_at_six() {
        let html = render(&post(), &faq());
        let related = html.split("related-procedures").nth(1).unwrap();
        assert!(related.contains("TORS"));
        assert!(!related.contains("Hyoid"));
        assert!(!related.contains(">GA<"));
    }

    #[test]
    fn keywords_fall_back_to_default() {
        let html = render(&post(), &faq());
        assert!(html.contains(&format!(r#"<meta name="keywords" content="{DEFAULT_KEYWORDS}">"#)));

        let mut custom = faq();
        custom.seo_keywords = "inspire cost".into();
        let html = render(&post(), &custom);
        assert!(html.contains(r#"<meta name="keywords" content="inspire cost">"#));
    }

    #[test]
    fn post_has_question_category_and_json_ld() {
        let html = render(&post(), &faq());
        assert!(html.contains("Does insurance cover sleep apnea surgery?"));
        assert!(html.contains(">Insurance</span>"));
        assert!(html.contains("January 2026"));
        assert!(html.contains(r#""@type": "MedicalWebPage""#));
        assert!(html.contains(r#""name": "Dr. Igor I. Bussel, MD""#));
    }

    #[test]
    fn no_sources_section_without_urls() {
        let mut f = faq();
        f.sources = "A textbook, another textbook".into();
        let html = render(&post(), &f);
        assert!(!html.contains(r#"class="sources"#));
    }

    #[test]
    fn index_lists_each_entry() {
        let config = SiteConfig::default();
        let layout = Layout::new(&config, &[]);
        let (p, f) = (post(), faq());
        let mut other = post();
        other.slug = "second".into();
        let mut uncategorized = faq();
        uncategorized.category.clear();
        let html = render_index(&layout, &[(&p, &f), (&other, &uncategorized)]).into_string();
        assert_eq!(html.matches("post-card").count(), 2);
        assert!(html.contains(r#"href="/blog/second/""#));
        assert!(html.contains(">General</span>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render(&post(), &faq()), render(&post(), &faq()));
    }
}
