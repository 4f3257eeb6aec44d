//! Full HTML pages. Slot fragments are produced by [`crate::slot`].

use axum::response::Html;

use crate::slot::escape_html;

const STYLE: &str = r#"
<style>
  body { font-family: sans-serif; margin: 2em; }
  .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 1em; }
  .slot { border: 1px solid #ccc; min-height: 10em; position: relative; }
  .centerhv { position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); }
  .slottable { width: 100%; }
  .centered { text-align: center; }
  .weathericon { text-align: center; }
  .message { color: #b00; }
</style>"#;

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{}</title>{STYLE}</head>
<body>
{body}
</body>
</html>"#,
        escape_html(title)
    ))
}

/// Login and signup forms with an optional inline message.
pub fn login(message: &str) -> Html<String> {
    page(
        "Login",
        &format!(
            r#"<h1>Weather Slots</h1>
<p class="message">{}</p>
<form action="/login/check" method="post">
  <label>Username <input type="text" name="username" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Log in</button>
  <button type="submit" formaction="/login/create">Create account</button>
</form>"#,
            escape_html(message)
        ),
    )
}

/// The four weather slots, each an already rendered fragment.
pub fn locations(slots: &[String]) -> Html<String> {
    let cells: String = slots
        .iter()
        .map(|slot| format!("<div class=\"slot\">{slot}</div>\n"))
        .collect();

    page(
        "Locations",
        &format!(
            r#"<h1>Your locations</h1>
<p><a href="/managelocations">Manage locations</a> | <a href="/logout">Log out</a></p>
<div class="grid">
{cells}</div>"#
        ),
    )
}

/// Edit form; `inputs` are pre-rendered `<input>` lines.
pub fn manage_locations(inputs: &[String]) -> Html<String> {
    page(
        "Manage locations",
        &format!(
            r#"<h1>Manage locations</h1>
<form action="/locations/update" method="post">
{}<button type="submit">Save</button>
</form>
<p><a href="/locations">Back</a></p>"#,
            inputs.concat()
        ),
    )
}
