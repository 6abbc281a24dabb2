//! Minimal HTML views
//!
//! The HTML surface is deliberately thin: plain string templates, no
//! template engine. JSON clients never see these.

use imagestream_domain::model::Article;
use imagestream_domain::usecases::PageView;

/// Escape text for interpolation into HTML
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Listing page
pub fn index_page(view: &PageView, image_urls: &[String]) -> String {
    let mut body = String::from("<h1>ImageStream</h1>\n<ul>\n");
    for (article, image_url) in view.entries.iter().zip(image_urls) {
        body.push_str(&format!(
            "<li><a href=\"/post/{}\"><img src=\"{}\" alt=\"{}\"></a><p>{}</p></li>\n",
            article.id,
            escape(image_url),
            escape(&article.message),
            escape(&article.message)
        ));
    }
    body.push_str("</ul>\n");

    if view.page > 1 {
        body.push_str(&format!(
            "<a href=\"/page/{}\">Newer</a>\n",
            view.prev_page
        ));
    }
    if view.page < view.page_count {
        body.push_str(&format!("<a href=\"/page/{}\">Older</a>\n", view.next_page));
    }

    page("ImageStream", &body)
}

/// Single entry page, with share links
pub fn entry_page(article: &Article, image_url: &str, post_url: &str, share_url: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<img src=\"{}\" alt=\"{}\">\n<p><a href=\"{}\">Permalink</a> <a href=\"{}\">Share</a></p>\n",
        escape(&article.message),
        escape(image_url),
        escape(&article.message),
        escape(post_url),
        escape(share_url)
    );
    page(&article.message, &body)
}

/// Manual upload form, only reachable with debug enabled
pub fn form_page() -> String {
    page(
        "ImageStream Submission API",
        "<h1>ImageStream Submission API</h1>\n\
         <form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"displayImage\">\n\
         <input type=\"text\" name=\"message\">\n\
         <button type=\"submit\">Submit</button>\n\
         </form>",
    )
}

/// Error page
pub fn error_page(message: &str) -> String {
    page("Error", &format!("<h1>Error</h1>\n<p>{}</p>", escape(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_messages() {
        let html = error_page("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
