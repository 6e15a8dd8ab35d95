use wasm_bindgen::JsCast;

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// One-shot browser timer. Returns the timer handle (0 if the window is
/// unavailable, e.g. during teardown).
pub(crate) fn set_timeout(ms: i32, f: impl FnOnce() + 'static) -> i32 {
    let Some(win) = web_sys::window() else {
        return 0;
    };

    let cb = wasm_bindgen::closure::Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)
        .unwrap_or(0)
}

pub(crate) fn clear_timeout(handle: i32) {
    if handle == 0 {
        return;
    }
    if let Some(win) = web_sys::window() {
        win.clear_timeout_with_handle(handle);
    }
}
