//! Procedure cost guides.
//!
//! One page per catalog procedure: cost summary, success/cure/AHI ranges,
//! recovery facts, considerations and a canned FAQ block. A sidebar compares
//! every procedure in the catalog with the current one highlighted.

use crate::emit;
use crate::naming::format_usd;
use crate::templates::{self, Layout, PageHead};
use crate::types::{PriceRange, Procedure};
use maud::{Markup, html};
use serde_json::{Value, json};

const CHECK_ICON: &str = "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z";

/// `"$5,000 - $15,000"`
pub fn price_span(range: &PriceRange) -> String {
    format!("{} - {}", format_usd(range.low), format_usd(range.high))
}

fn structured_data(layout: &Layout, procedure: &Procedure, url: &str) -> Value {
    let config = layout.config;
    json!({
        "@context": "https://schema.org",
        "@type": "MedicalWebPage",
        "name": format!("{} Cost Guide", procedure.name),
        "description": procedure.meta_description,
        "url": url,
        "datePublished": config.site.published,
        "dateModified": config.site.published,
        "author": { "@type": "Organization", "name": config.site.domain },
        "reviewedBy": {
            "@type": "Person",
            "name": config.reviewer.name,
            "jobTitle": config.reviewer.title,
        },
        "about": {
            "@type": "MedicalProcedure",
            "name": procedure.name,
            "procedureType": "Surgical",
            "description": procedure.description,
        },
    })
}

pub fn render(layout: &Layout, procedure: &Procedure) -> Markup {
    let p = procedure;
    let path = emit::url_for(&emit::cost_guide_page(&p.slug));
    let short = p.short_name.as_str();
    let price = &p.price_range;
    let head = PageHead {
        title: format!("{short} Cost Guide 2026 | {} Prices", p.name),
        description: p.meta_description.clone(),
        keywords: Some(format!(
            "{short} cost, {short} price, {short} surgery cost, sleep apnea surgery cost, {short} insurance"
        )),
        json_ld: vec![structured_data(layout, p, &layout.config.canonical_url(&path))],
        path,
    };
    let coverage = if p.insurance_covered {
        "Typically Covered"
    } else {
        "Varies"
    };

    let content = html! {
        (templates::breadcrumb(&[("Home", "/")], &format!("{short} Cost Guide")))

        section class="bg-gradient-to-br from-brand-700 to-brand-900 text-white py-16" {
            div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 grid lg:grid-cols-2 gap-12 items-center" {
                div {
                    h1 class="text-4xl md:text-5xl font-bold mb-4" { (p.name) " Cost Guide" }
                    p class="text-xl text-brand-100 mb-6" { (p.description) }
                }
                div class="glass-panel rounded-2xl p-6 text-slate-900" {
                    h2 class="text-lg font-semibold mb-4" { "2026 " (short) " Cost Summary" }
                    dl class="space-y-3" {
                        (fact_row("Price Range", &price_span(price)))
                        (fact_row("Average Cost", &format_usd(price.median)))
                        (fact_row("Success Rate", &p.success_rate.display()))
                        (fact_row("Insurance", coverage))
                        (fact_row("Recovery", &p.recovery_time))
                    }
                }
            }
        }

        section class="py-16" {
            div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 grid lg:grid-cols-3 gap-12" {
                div class="lg:col-span-2" {
                    h2 class="text-3xl font-bold mb-6" { "What is " (p.name) "?" }
                    p class="text-lg text-slate-600 mb-8" { (p.long_description) }

                    h3 class="text-2xl font-bold mb-4" { "How Much Does " (short) " Cost in 2026?" }
                    p class="text-slate-600 mb-8" {
                        "The cost of " (short) " surgery ranges from "
                        strong { (format_usd(price.low)) " to " (format_usd(price.high)) }
                        ", with an average cost of approximately "
                        strong { (format_usd(price.median)) }
                        ". Costs vary with the provider, the region and the complexity of the case."
                    }

                    h3 class="text-2xl font-bold mb-4" { (short) " Success Rates" }
                    div class="grid md:grid-cols-3 gap-4 mb-8" {
                        (rate_tile("Success Rate", &p.success_rate.display()))
                        (rate_tile("Cure Rate", &p.cure_rate.display()))
                        (rate_tile("AHI Reduction", &p.ahi_reduction.display()))
                    }

                    h3 class="text-2xl font-bold mb-4" { "Who is a Good Candidate?" }
                    p class="text-slate-600 mb-6" { strong { "Best for:" } " " (p.best_for) }

                    h3 class="text-2xl font-bold mb-4" { "Important Considerations" }
                    ul class="considerations space-y-3 mb-8" {
                        @for consideration in &p.considerations {
                            li class="flex items-start gap-3" {
                                (templates::icon("w-5 h-5 text-brand-600 mt-0.5 flex-shrink-0", CHECK_ICON))
                                span class="text-slate-600" { (consideration) }
                            }
                        }
                    }

                    h3 class="text-2xl font-bold mb-4" { "Recovery & Downtime" }
                    div class="grid md:grid-cols-3 gap-4 mb-8" {
                        (recovery_tile("Full Recovery", &p.recovery_time))
                        (recovery_tile("Hospital Stay", &p.hospital_stay))
                        (recovery_tile("Return to Work", &p.work_return))
                    }

                    h3 class="text-2xl font-bold mb-4" { "Insurance Coverage" }
                    p class="text-slate-600 mb-4" {
                        @if p.insurance_covered {
                            (short) " is typically covered by insurance when medically necessary. "
                            "Most major insurance companies, including Medicare, cover this procedure when patients meet specific criteria."
                        } @else {
                            "Coverage for " (short) " varies by insurance plan."
                        }
                    }
                    @if !p.cpt_codes.is_empty() {
                        p class="text-sm text-slate-500" { strong { "CPT Code(s):" } " " (p.cpt_codes.join(", ")) }
                    }
                }

                aside class="space-y-6" {
                    div class="bg-white rounded-2xl p-6 shadow-sm" {
                        h3 class="font-bold text-lg mb-4" { "Quick Facts" }
                        dl class="space-y-3 text-sm" {
                            (fact_row("Anesthesia", &p.anesthesia))
                            (fact_row("Hospital Stay", &p.hospital_stay))
                            @if let Some(code) = p.cpt_codes.first() {
                                (fact_row("CPT Code", code))
                            }
                        }
                    }
                    div class="bg-brand-50 rounded-2xl p-6" {
                        h3 class="font-bold text-lg mb-2" { "Find " (short) " Providers" }
                        a href=(emit::url_for(&emit::locations_index()))
                            class="inline-block mt-2 bg-brand-600 text-white px-4 py-2 rounded-lg font-semibold hover:bg-brand-700 transition" {
                            "Browse Locations"
                        }
                    }
                    (compare_sidebar(layout.procedures, &p.id))
                    (layout.reviewer_card("Medically Reviewed"))
                }
            }
        }

        section class="py-16 bg-white" {
            div class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8" {
                h2 class="text-3xl font-bold mb-8 text-center" { "Frequently Asked Questions" }
                div class="space-y-6" {
                    (faq_entry(
                        &format!("How much does {short} cost without insurance?"),
                        &format!(
                            "Without insurance, {short} typically costs between {} and {}, depending on the provider, \
                             location, and complexity of the case. Many providers offer payment plans or financing options.",
                            format_usd(price.low), format_usd(price.high)
                        ),
                    ))
                    (faq_entry(
                        &format!("Is {short} covered by insurance?"),
                        &if p.insurance_covered {
                            format!(
                                "Yes, {short} is typically covered by insurance when deemed medically necessary for \
                                 obstructive sleep apnea. Most patients need to have tried CPAP therapy first."
                            )
                        } else {
                            "Coverage varies by insurance plan. Contact your provider for specific details.".to_string()
                        },
                    ))
                    (faq_entry(
                        &format!("What is the success rate of {short}?"),
                        &format!(
                            "{short} has a success rate of {} in reducing sleep apnea severity. The procedure can reduce \
                             AHI (apnea-hypopnea index) by {} on average.",
                            p.success_rate.display(), p.ahi_reduction.display()
                        ),
                    ))
                    (faq_entry(
                        &format!("How long is recovery after {short}?"),
                        &format!(
                            "Full recovery from {short} typically takes {}. Most patients can return to work in {}. \
                             Hospital stay is usually {}.",
                            p.recovery_time, p.work_return, p.hospital_stay.to_lowercase()
                        ),
                    ))
                }
            }
        }
    };

    layout.page(&head, content)
}

/// Every catalog procedure with its price span; `current` is highlighted.
fn compare_sidebar(procedures: &[Procedure], current: &str) -> Markup {
    html! {
        div class="bg-white rounded-2xl p-6 shadow-sm" {
            h3 class="font-bold text-lg mb-4" { "Compare Procedures" }
            div class="space-y-1" {
                @for other in procedures {
                    @let active = other.id == current;
                    @let class = if active {
                        "compare-link block p-3 rounded-lg hover:bg-slate-50 transition-colors bg-brand-50 current"
                    } else {
                        "compare-link block p-3 rounded-lg hover:bg-slate-50 transition-colors"
                    };
                    a href=(emit::url_for(&emit::cost_guide_page(&other.slug)))
                        class=(class)
                        aria-current=[active.then_some("page")] {
                        div class="font-medium text-slate-800" { (other.short_name) }
                        div class="text-sm text-slate-500" { (price_span(&other.price_range)) }
                    }
                }
            }
        }
    }
}

fn fact_row(label: &str, value: &str) -> Markup {
    html! {
        div class="flex justify-between gap-4" {
            dt class="text-slate-500" { (label) }
            dd class="font-medium text-right" { (value) }
        }
    }
}

fn rate_tile(label: &str, value: &str) -> Markup {
    html! {
        div class="bg-green-50 rounded-xl p-4 text-center" {
            div class="text-3xl font-bold text-green-600" { (value) }
            div class="text-sm text-slate-600" { (label) }
        }
    }
}

fn recovery_tile(label: &str, value: &str) -> Markup {
    html! {
        div class="bg-slate-100 rounded-xl p-4" {
            div class="text-sm text-slate-500" { (label) }
            div class="text-lg font-bold text-slate-800" { (value) }
        }
    }
}

fn faq_entry(question: &str, answer: &str) -> Markup {
    html! {
        div class="bg-slate-50 rounded-xl p-6" {
            h3 class="font-bold text-lg mb-2" { (question) }
            p class="text-slate-600" { (answer) }
        }
    }
}
