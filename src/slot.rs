//! HTML fragments for the location slots.
//!
//! Every value interpolated into markup goes through [`escape_html`]; the
//! surrounding views insert these fragments verbatim.

use crate::weather::{WeatherClient, WeatherSnapshot};

pub const EMPTY_SLOT: &str =
    r#"<div class="centerhv"><a href="/managelocations">Click to add</a></div>"#;

pub const INVALID_SLOT: &str = r#"<div class="centerhv">Invalid Location</div>"#;

/// Renders one slot. Lookup failures degrade to [`INVALID_SLOT`].
pub async fn render_slot(client: &WeatherClient, location: Option<&str>) -> String {
    let Some(location) = location.filter(|loc| !loc.is_empty()) else {
        return EMPTY_SLOT.to_string();
    };

    match client.fetch_weather(location).await {
        Ok(snapshot) => weather_table(&snapshot),
        Err(err) => {
            tracing::warn!(location, error = %err, "weather lookup failed");
            INVALID_SLOT.to_string()
        }
    }
}

fn weather_table(snapshot: &WeatherSnapshot) -> String {
    let title = format!("{}, {}", snapshot.name, snapshot.region);
    let localtime = format!("Local time: {}", snapshot.localtime);
    let temp = format!("{}°F", snapshot.temp_f);
    let wind = format!("{} mph", snapshot.wind_mph);
    let humidity = format!("{}%", snapshot.humidity);
    let icon = format!(
        r#"<img src="{}" alt="{}">"#,
        escape_html(&snapshot.condition_icon),
        escape_html(&snapshot.condition_text)
    );

    format!(
        r#"
<table class="slottable">
<tr><th colspan="4">{}</th></tr>
<tr><td class="centered" colspan="4">{}</td></tr>
<tr><td>Temperature</td><td>{}</td><td class="weathericon" colspan="2" rowspan="2">{}</td></tr>
<tr><td>Wind</td><td>{}</td></tr>
<tr><td>Humidity</td><td>{}</td></tr>
</table>"#,
        escape_html(&title),
        escape_html(&localtime),
        escape_html(&temp),
        icon,
        escape_html(&wind),
        escape_html(&humidity),
    )
}

/// Text input for slot `number` (1-based) on the manage screen.
pub fn render_edit_line(location: Option<&str>, number: usize) -> String {
    format!(
        "<input type=\"text\" name=\"slot{number}\" width=\"25%\" value=\"{}\">\n",
        escape_html(location.unwrap_or_default())
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn body(name: &str, region: &str, condition: &str) -> serde_json::Value {
        serde_json::json!({
            "location": { "name": name, "region": region, "localtime": "2024-05-01 21:30" },
            "current": {
                "temp_f": 71.0,
                "wind_mph": 5.6,
                "humidity": 40,
                "condition": { "text": condition, "icon": "//cdn.example/icon.png" }
            }
        })
    }

    #[tokio::test]
    async fn absent_location_prompts_without_network_call() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(&mock_server.uri(), "k").unwrap();

        assert_eq!(render_slot(&client, None).await, EMPTY_SLOT);
        assert_eq!(render_slot(&client, Some("")).await, EMPTY_SLOT);
    }

    #[tokio::test]
    async fn failed_lookup_renders_invalid_location() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current.json"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(&mock_server.uri(), "k").unwrap();

        assert_eq!(render_slot(&client, Some("Nowhere12345")).await, INVALID_SLOT);
    }

    #[tokio::test]
    async fn successful_lookup_renders_weather_table() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current.json"))
            .and(query_param("q", "Tokyo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("Tokyo", "Tokyo", "Clear")))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(&mock_server.uri(), "k").unwrap();
        let html = render_slot(&client, Some("Tokyo")).await;

        assert!(html.contains(r#"<th colspan="4">Tokyo, Tokyo</th>"#));
        assert!(html.contains("Local time: 2024-05-01 21:30"));
        assert!(html.contains("<td>71°F</td>"));
        assert!(html.contains("<td>5.6 mph</td>"));
        assert!(html.contains("<td>40%</td>"));
        assert!(html.contains(r#"<img src="//cdn.example/icon.png" alt="Clear">"#));
    }

    #[tokio::test]
    async fn api_text_is_escaped() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(
                "<script>alert(1)</script>",
                "A & B",
                "\"sunny\"",
            )))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(&mock_server.uri(), "k").unwrap();
        let html = render_slot(&client, Some("anything")).await;

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;, A &amp; B"));
        assert!(html.contains("alt=\"&quot;sunny&quot;\""));
    }

    #[test]
    fn edit_line_escapes_current_value() {
        assert_eq!(
            render_edit_line(Some("\"><b>x"), 2),
            "<input type=\"text\" name=\"slot2\" width=\"25%\" value=\"&quot;&gt;&lt;b&gt;x\">\n"
        );
        assert_eq!(
            render_edit_line(None, 4),
            "<input type=\"text\" name=\"slot4\" width=\"25%\" value=\"\">\n"
        );
    }

    #[test]
    fn escape_html_handles_all_special_characters() {
        assert_eq!(escape_html(r#"<a href='x'>&"#), "&lt;a href=&#39;x&#39;&gt;&amp;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
