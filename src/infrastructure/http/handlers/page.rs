//! Page Handler
//!
//! 渲染上传表单页面

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../../../web/index.html");

/// HTML 转义
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn render_index(default_prompt: &str, has_default_key: bool) -> String {
    let key_hint = if has_default_key {
        "已从环境变量加载默认密钥，留空即可使用"
    } else {
        ""
    };

    INDEX_TEMPLATE
        .replace("{{DEFAULT_PROMPT}}", &escape_html(default_prompt))
        .replace("{{API_KEY_HINT}}", key_hint)
}

/// 首页表单
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_index(
        &state.settings.default_prompt,
        state.settings.default_api_key.is_some(),
    ))
}
