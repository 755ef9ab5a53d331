//! Server-rendered single page: title selector, submit button and a
//! five-slot result row.

use std::fmt::Write;

use data_loader::CatalogStore;

use crate::orchestrator::RecommendationOutcome;

const STYLE: &str = "\
body{font-family:sans-serif;margin:2rem auto;max-width:1200px;padding:0 1rem}\
select{min-width:24rem;padding:.4rem}\
button{padding:.45rem 1rem;background:#ff4b4b;color:#fff;border:0;border-radius:4px}\
.success{background:#e6f4ea;padding:.6rem;border-radius:4px}\
.error{background:#fdecea;padding:.6rem;border-radius:4px}\
.slots{display:grid;grid-template-columns:repeat(5,1fr);gap:1rem}\
.slot img{width:100%;border-radius:4px}";

/// Render the full page.
///
/// `selected` pre-selects a title in the dropdown; `outcome` is the result
/// of a "show recommendations" request, if one was made.
pub fn render_page(
    store: &CatalogStore,
    selected: Option<&str>,
    outcome: Option<&RecommendationOutcome>,
) -> String {
    let mut html = String::with_capacity(64 * store.len() + 4096);

    // Writing into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>Movie Recommender System</title><style>{}</style></head><body>\
         <h1>&#127916; Movie Recommender System</h1>\
         <p>Discover your next favorite movie based on your preferences!</p>\
         <p class=\"success\">Loaded {} movies successfully!</p><hr>",
        STYLE,
        store.len()
    );

    html.push_str(
        "<form method=\"get\" action=\"/recommend\">\
         <label for=\"title\">&#127917; Type or select a movie</label><br>\
         <select id=\"title\" name=\"title\">",
    );
    for title in store.titles() {
        let escaped = escape_html(title);
        let marker = if selected == Some(title) { " selected" } else { "" };
        let _ = write!(html, "<option value=\"{escaped}\"{marker}>{escaped}</option>");
    }
    html.push_str(
        "</select> <button type=\"submit\">&#128269; Show Recommendations</button></form>",
    );

    if let Some(outcome) = outcome {
        render_outcome(&mut html, outcome);
    }

    html.push_str("<hr><p>Built with &#10084;&#65039; in Rust</p></body></html>");
    html
}

fn render_outcome(html: &mut String, outcome: &RecommendationOutcome) {
    if !outcome.is_success() {
        if let Some(error) = &outcome.error {
            let _ = write!(html, "<p class=\"error\">{}</p>", escape_html(error));
        }
        html.push_str(
            "<p class=\"error\">Could not generate recommendations. Please try again.</p>",
        );
        return;
    }

    let _ = write!(
        html,
        "<p class=\"success\">Here are {} movies similar to '{}':</p><div class=\"slots\">",
        outcome.recommendations.len(),
        escape_html(&outcome.query)
    );
    for rec in &outcome.recommendations {
        let title = escape_html(&rec.title);
        let _ = write!(
            html,
            "<div class=\"slot\"><p>{title}</p><img src=\"{}\" alt=\"{title}\"></div>",
            escape_html(&rec.poster_url)
        );
    }
    html.push_str("</div>");
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::MovieRecommendation;
    use data_loader::MovieRecord;

    fn store() -> CatalogStore {
        CatalogStore::try_new(
            vec![
                MovieRecord::new(1, "Up"),
                MovieRecord::new(2, "Tom & Jerry <2021>"),
            ],
            vec![vec![1.0, 0.1], vec![0.1, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_selector_lists_all_titles() {
        let html = render_page(&store(), Some("Up"), None);

        assert!(html.contains("Loaded 2 movies successfully!"));
        assert!(html.contains("<option value=\"Up\" selected>Up</option>"));
        assert!(html.contains("Tom &amp; Jerry &lt;2021&gt;"));
        assert!(!html.contains("class=\"slots\""));
    }

    #[test]
    fn test_renders_result_slots() {
        let outcome = RecommendationOutcome {
            query: "Up".to_string(),
            recommendations: vec![MovieRecommendation {
                movie_id: 2,
                title: "Tom & Jerry <2021>".to_string(),
                score: 0.1,
                poster_url: "https://image.tmdb.org/t/p/w500/x.jpg".to_string(),
            }],
            error: None,
        };

        let html = render_page(&store(), Some("Up"), Some(&outcome));

        assert!(html.contains("Here are 1 movies similar to 'Up':"));
        assert!(html.contains("<img src=\"https://image.tmdb.org/t/p/w500/x.jpg\""));
    }

    #[test]
    fn test_renders_error_message() {
        let outcome = RecommendationOutcome {
            query: "Nope".to_string(),
            recommendations: vec![],
            error: Some("Movie not found in catalog: 'Nope'".to_string()),
        };

        let html = render_page(&store(), None, Some(&outcome));

        assert!(html.contains("Could not generate recommendations. Please try again."));
        assert!(html.contains("Movie not found in catalog: &#39;Nope&#39;"));
    }
}
