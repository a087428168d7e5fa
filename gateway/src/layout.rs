//! Page layout: title, map area, detail panel area.

use crate::markup::{div, escape, h1, Node};

pub const MAP_ID: &str = "world-map";
pub const DETAILS_ID: &str = "country-details";
pub const PAGE_TITLE: &str = "Interactive World Map Dashboard";
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const EVENTS_PATH: &str = "/api/v1/events";

/// Client glue: post click payloads, apply the returned output updates
const CLIENT_SCRIPT: &str = r#"
const EVENTS_URL = "__EVENTS_PATH__";
let interaction = { state: "idle" };

function applyOutput(out) {
  const el = document.getElementById(out.id);
  if (!el) return;
  if (out.property === "figure") {
    Plotly.react(el, out.value.data, out.value.layout, { responsive: true });
    if (!el.dataset.bound) {
      el.on("plotly_click", (ev) => {
        const p = ev.points[0];
        dispatch({ points: [{ hovertext: p.hovertext, location: p.location }] });
      });
      el.dataset.bound = "1";
    }
  } else if (out.property === "children") {
    el.innerHTML = out.value;
  }
}

async function dispatch(value) {
  const res = await fetch(EVENTS_URL, {
    method: "POST",
    headers: { "content-type": "application/json" },
    body: JSON.stringify({ id: "__MAP_ID__", property: "clickData", value, state: interaction }),
  });
  if (!res.ok) return;
  const body = await res.json();
  interaction = body.state;
  body.outputs.forEach(applyOutput);
}

dispatch(null);
"#;

/// The component tree of the page body
pub fn body() -> Node {
    div()
        .child(
            h1(PAGE_TITLE)
                .style("text-align", "center")
                .style("color", "#333")
                .style("padding", "20px"),
        )
        .child(
            div()
                .style("width", "100%")
                .style("padding", "10px")
                .child(div().id(MAP_ID).style("height", "70vh")),
        )
        .child(
            div()
                .id(DETAILS_ID)
                .style("width", "80%")
                .style("margin", "0 auto")
                .style("padding", "20px")
                .style("background-color", "#f9f9f9")
                .style("border-radius", "5px")
                .style("box-shadow", "0px 0px 5px #ccc")
                .style("min-height", "100px"),
        )
        .into()
}

/// Full HTML document served at `/`
pub fn page() -> String {
    let script = CLIENT_SCRIPT
        .replace("__EVENTS_PATH__", EVENTS_PATH)
        .replace("__MAP_ID__", MAP_ID);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<script src=\"{cdn}\"></script>\n</head>\n<body style=\"font-family: sans-serif; margin: 0\">\n{body}\n<script>{script}</script>\n</body>\n</html>\n",
        title = escape(PAGE_TITLE),
        cdn = PLOTLY_CDN,
        body = body().render(),
        script = script,
    )
}
