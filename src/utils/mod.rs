pub mod session;

pub use session::{get_current_user_id, get_current_username, is_logged_in, set_user_session};

use axum::response::Html;
use tera::{Tera, Context};

pub fn render_template(tera: &Tera, template_name: &str, context: Context) -> Html<String> {
    Html(
        tera.render(template_name, &context)
            .unwrap_or_else(|_| format!("Error rendering template: {}", template_name))
    )
}
