//! トップページの背景アニメーション

use std::cell::RefCell;
use std::rc::Rc;

use bid_writer_common::background::{BackgroundAnimation, NoAnimation, FLUID_COLORS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/background.js")]
extern "C" {
    #[wasm_bindgen(js_name = "createFluidBackground")]
    async fn create_fluid_background(dom_id: &str, colors: JsValue) -> JsValue;

    #[wasm_bindgen(js_name = "destroyBackground")]
    fn destroy_background(handle: &JsValue);
}

const BACKGROUND_DOM_ID: &str = "box";

#[derive(Default)]
struct FluidState {
    handle: Option<JsValue>,
    stopped: bool,
}

/// JSライブラリのアニメーション。読み込みは非同期
#[derive(Default)]
struct FluidBackground {
    state: Rc<RefCell<FluidState>>,
}

impl BackgroundAnimation for FluidBackground {
    fn start(&mut self) {
        self.state.borrow_mut().stopped = false;
        let state = Rc::clone(&self.state);
        spawn_local(async move {
            let colors = serde_wasm_bindgen::to_value(&FLUID_COLORS).unwrap_or(JsValue::NULL);
            let handle = create_fluid_background(BACKGROUND_DOM_ID, colors).await;
            if handle.is_null() || handle.is_undefined() {
                log::warn!("background library unavailable");
                return;
            }
            let mut state = state.borrow_mut();
            if state.stopped {
                // 読み込み中に停止された
                destroy_background(&handle);
            } else {
                state.handle = Some(handle);
            }
        });
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.stopped = true;
        if let Some(handle) = state.handle.take() {
            destroy_background(&handle);
        }
    }
}

#[component]
pub fn Background(#[prop(optional)] disabled: bool) -> impl IntoView {
    let animation: Box<dyn BackgroundAnimation> = if disabled {
        Box::new(NoAnimation)
    } else {
        Box::new(FluidBackground::default())
    };
    let animation = StoredValue::new_local(animation);

    Effect::new(move |_| animation.update_value(|a| a.start()));
    on_cleanup(move || {
        animation.try_update_value(|a| a.stop());
    });

    view! { <div id=BACKGROUND_DOM_ID class="background fade-in"></div> }
}
