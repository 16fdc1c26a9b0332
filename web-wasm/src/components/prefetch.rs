//! 主要ページを <link rel="prefetch"> で先読み

use bid_writer_common::site::{prefetch_targets, Route};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlLinkElement;

#[component]
pub fn PrefetchLinks(current: Route) -> impl IntoView {
    Effect::new(move |_| {
        let document = gloo::utils::document();
        let Some(head) = document.head() else {
            return;
        };
        for href in prefetch_targets(current) {
            let link = document
                .create_element("link")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlLinkElement>().ok());
            if let Some(link) = link {
                link.set_rel("prefetch");
                link.set_href(href);
                if let Err(e) = head.append_child(&link) {
                    log::warn!("failed to prefetch {}: {:?}", href, e);
                }
            }
        }
    });
}
