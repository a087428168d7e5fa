//! Interaction controller.
//!
//! Events from the page are routed through an explicit callback table built
//! at startup. Each binding names the property that triggers it, the
//! property it updates, and the handler that computes the new value.
//! Bindings for one event run serially, in table order.

use country_data::Dataset;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::figure::{self, Figure};
use crate::layout::{DETAILS_ID, MAP_ID};
use crate::panel::{ClickSelection, PanelComposer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentId {
    WorldMap,
    CountryDetails,
}

impl ComponentId {
    pub fn dom_id(&self) -> &'static str {
        match self {
            ComponentId::WorldMap => MAP_ID,
            ComponentId::CountryDetails => DETAILS_ID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Figure,
    ClickData,
    Children,
}

/// Component property that fires a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub component: ComponentId,
    pub property: Property,
}

/// Component property a binding writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    pub component: ComponentId,
    pub property: Property,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Rebuild the choropleth from the full table
    RedrawMap,
    /// Compose the detail panel for the current selection
    ComposeDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub trigger: Trigger,
    pub output: Output,
    pub handler: Handler,
}

/// Both map and panel react to map clicks. The map redraw does not depend on
/// the click and produces the same figure each time.
pub fn default_bindings() -> Vec<Binding> {
    let click = Trigger {
        component: ComponentId::WorldMap,
        property: Property::ClickData,
    };
    vec![
        Binding {
            trigger: click,
            output: Output {
                component: ComponentId::WorldMap,
                property: Property::Figure,
            },
            handler: Handler::RedrawMap,
        },
        Binding {
            trigger: click,
            output: Output {
                component: ComponentId::CountryDetails,
                property: Property::Children,
            },
            handler: Handler::ComposeDetails,
        },
    ]
}

/// Payload of a Plotly click on the choropleth
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClickData {
    #[serde(default)]
    pub points: Vec<ClickPoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClickPoint {
    #[serde(default)]
    pub hovertext: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ClickData {
    /// First clicked point, if it carries a location
    pub fn selection(&self) -> Option<ClickSelection> {
        let point = self.points.first()?;
        let iso_code = point.location.as_deref()?.trim();
        if iso_code.is_empty() {
            return None;
        }
        Some(ClickSelection::new(
            point.hovertext.clone().unwrap_or_default(),
            iso_code,
        ))
    }
}

/// Idle until the first click; every later click stays in Selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InteractionState {
    #[default]
    Idle,
    Selected {
        iso_code: String,
        name: String,
    },
}

impl InteractionState {
    pub fn on_click(self, selection: Option<&ClickSelection>) -> Self {
        match selection {
            Some(sel) => InteractionState::Selected {
                iso_code: sel.iso_code.clone(),
                name: sel.displayed_name.clone(),
            },
            None => self,
        }
    }

    pub fn selection(&self) -> Option<ClickSelection> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Selected { iso_code, name } => {
                Some(ClickSelection::new(name.clone(), iso_code.clone()))
            }
        }
    }
}

/// One event delivered by the page
#[derive(Debug, Clone, Deserialize)]
pub struct UiEvent {
    pub id: ComponentId,
    pub property: Property,
    #[serde(default)]
    pub value: Option<ClickData>,
    /// State the page was in before this event
    #[serde(default)]
    pub state: InteractionState,
}

impl UiEvent {
    pub fn click(click: Option<ClickData>, state: InteractionState) -> Self {
        Self {
            id: ComponentId::WorldMap,
            property: Property::ClickData,
            value: click,
            state,
        }
    }

    fn trigger(&self) -> Trigger {
        Trigger {
            component: self.id,
            property: self.property,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutputValue {
    Figure(Box<Figure>),
    Markup(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputUpdate {
    pub id: ComponentId,
    pub property: Property,
    pub value: OutputValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    pub state: InteractionState,
    pub outputs: Vec<OutputUpdate>,
}

pub struct Controller {
    bindings: Vec<Binding>,
    dataset: Arc<Dataset>,
    composer: PanelComposer,
}

impl Controller {
    pub fn new(bindings: Vec<Binding>, dataset: Arc<Dataset>, composer: PanelComposer) -> Self {
        Self {
            bindings,
            dataset,
            composer,
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Run every binding registered for the event's trigger
    pub async fn dispatch(&self, event: UiEvent) -> DispatchResult {
        let trigger = event.trigger();
        let clicked = event.value.as_ref().and_then(ClickData::selection);
        let state = event.state.on_click(clicked.as_ref());
        let selection = state.selection();

        let mut outputs = Vec::new();
        for binding in self.bindings.iter().filter(|b| b.trigger == trigger) {
            let value = match binding.handler {
                Handler::RedrawMap => OutputValue::Figure(Box::new(figure::render(&self.dataset))),
                Handler::ComposeDetails => {
                    OutputValue::Markup(self.composer.compose(selection.as_ref()).await.render())
                }
            };
            outputs.push(OutputUpdate {
                id: binding.output.component,
                property: binding.output.property,
                value,
            });
        }

        debug!(?trigger, ?state, updates = outputs.len(), "event dispatched");
        DispatchResult { state, outputs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{placeholder, PLACEHOLDER_HINT};
    use country_info::Offline;

    fn controller() -> Controller {
        let dataset = Arc::new(Dataset::load_embedded().unwrap());
        let composer = PanelComposer::new(dataset.clone(), Arc::new(Offline));
        Controller::new(default_bindings(), dataset, composer)
    }

    fn brazil_click() -> ClickData {
        ClickData {
            points: vec![ClickPoint {
                hovertext: Some("Brazil".into()),
                location: Some("BRA".into()),
            }],
        }
    }

    #[test]
    fn test_click_selection_parsing() {
        let click: ClickData = serde_json::from_value(serde_json::json!({
            "points": [{"hovertext": "Brazil", "location": "BRA", "z": 9065.8}]
        }))
        .unwrap();
        assert_eq!(click.selection(), Some(ClickSelection::new("Brazil", "BRA")));

        assert_eq!(ClickData::default().selection(), None);
        let no_location = ClickData {
            points: vec![ClickPoint { hovertext: Some("X".into()), location: None }],
        };
        assert_eq!(no_location.selection(), None);
    }

    #[test]
    fn test_state_transitions() {
        let brazil = ClickSelection::new("Brazil", "BRA");
        let japan = ClickSelection::new("Japan", "JPN");

        let state = InteractionState::Idle.on_click(None);
        assert_eq!(state, InteractionState::Idle);

        let state = state.on_click(Some(&brazil));
        assert_eq!(state.selection(), Some(brazil.clone()));

        let state = state.on_click(Some(&japan));
        assert_eq!(state.selection(), Some(japan.clone()));

        // No way back to Idle
        let state = state.on_click(None);
        assert_eq!(state.selection(), Some(japan));
    }

    #[test]
    fn test_state_wire_format() {
        let idle = serde_json::to_value(InteractionState::Idle).unwrap();
        assert_eq!(idle, serde_json::json!({"state": "idle"}));

        let selected: InteractionState = serde_json::from_value(serde_json::json!({
            "state": "selected", "iso_code": "BRA", "name": "Brazil"
        }))
        .unwrap();
        assert_eq!(selected.selection(), Some(ClickSelection::new("Brazil", "BRA")));
    }

    #[tokio::test]
    async fn test_dispatch_runs_bindings_in_order() {
        let result = controller()
            .dispatch(UiEvent::click(Some(brazil_click()), InteractionState::Idle))
            .await;

        assert_eq!(result.outputs.len(), 2);
        assert_eq!(result.outputs[0].id, ComponentId::WorldMap);
        assert_eq!(result.outputs[0].property, Property::Figure);
        assert!(matches!(result.outputs[0].value, OutputValue::Figure(_)));
        assert_eq!(result.outputs[1].id, ComponentId::CountryDetails);
        assert!(matches!(&result.outputs[1].value, OutputValue::Markup(html) if html.contains("Brazil")));
        assert!(matches!(result.state, InteractionState::Selected { .. }));
    }

    #[tokio::test]
    async fn test_initial_event_renders_placeholder() {
        let result = controller()
            .dispatch(UiEvent::click(None, InteractionState::Idle))
            .await;

        assert_eq!(result.state, InteractionState::Idle);
        match &result.outputs[1].value {
            OutputValue::Markup(html) => {
                assert_eq!(html, &placeholder().render());
                assert!(html.contains(PLACEHOLDER_HINT));
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unbound_trigger_yields_nothing() {
        let event = UiEvent {
            id: ComponentId::CountryDetails,
            property: Property::Children,
            value: None,
            state: InteractionState::Idle,
        };
        let result = controller().dispatch(event).await;
        assert!(result.outputs.is_empty());
    }
}
