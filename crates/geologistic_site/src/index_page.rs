use jiff::civil::Date;

/// Landing page: newest day first, with a date picker bounded to the
/// published range. `days` must be sorted ascending (manifest order).
pub fn render_index(days: &[Date]) -> String {
    let min_date = days.first().map(Date::to_string).unwrap_or_default();
    let max_date = days.last().map(Date::to_string).unwrap_or_default();
    let items: String = days
        .iter()
        .rev()
        .map(|day| format!("<li><a href=\"{day}/index.html\">{day}</a></li>\n"))
        .collect();

    format!(
        r#"<!doctype html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">
<title>geologistic – daily routes</title>
<style>
 body{{font-family:system-ui,sans-serif;max-width:900px;margin:1rem auto;padding:0 1rem}}
 .muted{{color:#666}}
</style>
</head><body>
<h1>geologistic – daily routes</h1>
<p class="muted">pick a date or click one of the recent pages.</p>
<label for="pick">date:</label>
<input id="pick" type="date" min="{min_date}" max="{max_date}">
<ul>
{items}</ul>
<script>
 const i=document.getElementById('pick');
 i.addEventListener('change',()=>{{ if(i.value) location.href=`${{i.value}}/index.html`; }});
</script>
</body></html>
"#
    )
}
