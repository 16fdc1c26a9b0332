//! 料金プラン

use bid_writer_common::site::{PricingTier, Route, PRICING_TIERS};
use leptos::prelude::*;

use crate::components::header::Header;

fn tier_card(tier: PricingTier) -> impl IntoView {
    let class = if tier.featured { "tier-card tier-featured" } else { "tier-card" };
    view! {
        <div class=class id=tier.id>
            <h3 class="tier-name">{tier.name}</h3>
            <p class="tier-price">
                <span class="tier-amount">{tier.price_monthly}</span>
                <span class="tier-period">"/月"</span>
            </p>
            <p class="tier-description">{tier.description}</p>
            <a href=Route::SignUp.path() class="tier-cta" aria-describedby=tier.id>"立即开始"</a>
            <ul role="list" class="tier-features">
                {tier
                    .features
                    .iter()
                    .map(|feature| view! { <li>"✓ " {*feature}</li> })
                    .collect_view()}
            </ul>
        </div>
    }
}

#[component]
pub fn Pricing() -> impl IntoView {
    view! {
        <Header />
        <div class="pricing-page">
            <div class="page-heading">
                <h2>"价格方案"</h2>
                <p>"选择最适合您的方案"</p>
            </div>
            <div class="tier-grid">
                {PRICING_TIERS.iter().map(|tier| tier_card(*tier)).collect_view()}
            </div>
        </div>
    }
}
