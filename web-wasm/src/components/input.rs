//! フローティングラベル付き入力欄

use leptos::prelude::*;

#[component]
pub fn InputFloatingLabel<F>(
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: F,
) -> impl IntoView
where
    F: Fn(String) + 'static,
{
    let id = format!("input-{}", label);

    view! {
        <div class="floating-input">
            <input
                type=input_type
                id=id.clone()
                placeholder=" "
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
            <label for=id>{label}</label>
        </div>
    }
}
