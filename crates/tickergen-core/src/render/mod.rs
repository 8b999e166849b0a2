//! View-model assembly and HTML expansion for the tickers page.

mod html;
mod view_model;

pub use html::{escape_html, render_html, CONTENT_TYPE_HTML};
pub use view_model::{
    build_view_model, build_view_model_at, format_generation_date, CountryTable, PageConfig,
    TypeSection, ViewModel, DEFAULT_SCREENER_URL,
};
