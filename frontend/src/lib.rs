use rand::SeedableRng;
use rand::rngs::SmallRng;
use seed::{prelude::*, virtual_dom::AtValue, *};
use serde::Deserialize;
use serde_wasm_bindgen::to_value;
use shared::{
    AnalysisRequest, AnalysisResult, Coordinate, DisplayState, InputSource, bounds::AREA_OF_INTEREST,
    bounds::DEFAULT_SELECTION, project, resolve,
};
use wasm_bindgen::{
    JsCast,
    prelude::{JsValue, wasm_bindgen},
};

#[wasm_bindgen(module = "/leaflet_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map();
    #[wasm_bindgen(js_name = updateMarker)]
    fn update_marker_js(coord: JsValue);
    #[wasm_bindgen(js_name = drawAreaOfInterest)]
    fn draw_area_of_interest(bounds: JsValue);
    #[wasm_bindgen(js_name = focusSelection)]
    fn focus_selection(coord: JsValue, zoom: u8);
}

fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "http://localhost:8080/api/analyze".to_string()
}

const INITIAL_ZOOM: u8 = 9;
const ANALYZED_ZOOM: u8 = 13;

pub struct Model {
    form: CoordinateForm,
    /// The one authoritative selection; the form and the map marker are
    /// projections of it.
    selection: Coordinate,
    source: InputSource,
    pending: bool,
    display: Option<DisplayState>,
    zoom: u8,
    rng: SmallRng,
}

/// Raw text of the two numeric inputs. Kept as strings so half-typed values
/// do not fight the user; they only feed the selection once they parse.
#[derive(Default, Clone)]
struct CoordinateForm {
    lat: String,
    lon: String,
}

impl CoordinateForm {
    /// Parse both fields, clamped to the area of interest the way the
    /// bounded input controls clamp them.
    fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lon = self.lon.trim().parse::<f64>().ok()?;
        Some(AREA_OF_INTEREST.clamp(Coordinate { lat, lon }))
    }

    fn set_from(&mut self, coord: Coordinate) {
        self.lat = format_coord(coord.lat);
        self.lon = format_coord(coord.lon);
    }
}

pub enum Msg {
    LatChanged(String),
    LonChanged(String),
    MapClicked { lat: f64, lon: f64 },
    Analyze,
    AnalysisFetched(Result<AnalysisResult, String>),
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::window_event(Ev::from("map-click"), |event| {
        let event = event
            .dyn_into::<web_sys::CustomEvent>()
            .expect("map-click event must be CustomEvent");
        let payload: MapClickPayload = serde_wasm_bindgen::from_value(event.detail())
            .unwrap_or(MapClickPayload { lat: 0.0, lon: 0.0 });
        Msg::MapClicked {
            lat: payload.lat,
            lon: payload.lon,
        }
    }));

    let mut model = Model {
        form: CoordinateForm::default(),
        selection: DEFAULT_SELECTION,
        source: InputSource::Manual,
        pending: false,
        display: None,
        zoom: INITIAL_ZOOM,
        rng: SmallRng::from_entropy(),
    };
    model.form.set_from(model.selection);

    if let Ok(bounds) = to_value(&AREA_OF_INTEREST) {
        draw_area_of_interest(bounds);
    }
    sync_marker(model.selection);

    model
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::LatChanged(val) => {
            model.form.lat = val;
            apply_manual_edit(model);
        }
        Msg::LonChanged(val) => {
            model.form.lon = val;
            apply_manual_edit(model);
        }
        Msg::MapClicked { lat, lon } => {
            let click = Coordinate { lat, lon };
            let manual = model.form.coordinate().unwrap_or(model.selection);
            let (selection, source) =
                resolve(model.selection, Some(click), manual, model.source);
            if source == InputSource::Map {
                // Only an in-bounds click lands here; reflect it in the form
                // without handing precedence back to the inputs.
                model.form.set_from(selection);
            }
            model.selection = selection;
            model.source = source;
            sync_marker(model.selection);
        }
        Msg::Analyze => {
            if model.pending {
                return;
            }
            model.pending = true;
            orders.perform_cmd(send_analysis_request(model.selection));
        }
        Msg::AnalysisFetched(result) => {
            model.pending = false;
            let analysis = match result {
                Ok(analysis) => analysis,
                // The proxy itself was unreachable; same fallback path as a
                // remote transport failure.
                Err(message) => AnalysisResult::TransportError { message },
            };
            model.display = Some(project(&analysis, &mut model.rng));
            model.zoom = ANALYZED_ZOOM;
            if let Ok(coord) = to_value(&model.selection) {
                focus_selection(coord, model.zoom);
            }
        }
    }
}

/// A manual edit hands precedence back to the inputs. Unparseable text leaves
/// the selection alone until it parses again.
fn apply_manual_edit(model: &mut Model) {
    if let Some(manual) = model.form.coordinate() {
        let (selection, source) = resolve(model.selection, None, manual, InputSource::Manual);
        model.selection = selection;
        model.source = source;
        sync_marker(model.selection);
    }
}

async fn send_analysis_request(coord: Coordinate) -> Msg {
    let payload = AnalysisRequest::from(coord);
    let response = match Request::new(api_root()).method(Method::Post).json(&payload) {
        Err(err) => Err(format!("{err:?}")),
        Ok(request) => match request.fetch().await {
            Err(err) => Err(format!("{err:?}")),
            Ok(raw) => match raw.check_status() {
                Err(status_err) => Err(format!("{status_err:?}")),
                Ok(resp) => match resp.json::<AnalysisResult>().await {
                    Ok(result) => Ok(result),
                    Err(err) => Err(format!("{err:?}")),
                },
            },
        },
    };

    Msg::AnalysisFetched(response)
}

pub fn view(model: &Model) -> Node<Msg> {
    let header = h1!["Deforestation Analysis Tool"];
    let intro = p![
        C!["intro"],
        "Analyze deforestation trends in the Amazon region by selecting \
         coordinates within the defined area of interest.",
    ];
    let form = view_form(model);
    let result = view_result(model);

    div![C!["app-container"], header, intro, form, result]
}

fn view_form(model: &Model) -> Node<Msg> {
    let coordinate_field = |label: &str, value: &str, min: f64, max: f64, msg: fn(String) -> Msg| {
        div![
            C!["input-field"],
            label![label],
            input![
                attrs! {
                    At::Type => "number",
                    At::Value => value,
                    At::Min => min.to_string(),
                    At::Max => max.to_string(),
                    At::Step => "0.01",
                },
                input_ev(Ev::Input, msg),
            ]
        ]
    };

    form![
        C!["controls"],
        fieldset![
            legend!["Location selection"],
            coordinate_field(
                "Latitude",
                &model.form.lat,
                AREA_OF_INTEREST.min_lat,
                AREA_OF_INTEREST.max_lat,
                Msg::LatChanged
            ),
            coordinate_field(
                "Longitude",
                &model.form.lon,
                AREA_OF_INTEREST.min_lon,
                AREA_OF_INTEREST.max_lon,
                Msg::LonChanged
            ),
            small!["Use the map or the input boxes; the last click inside the \
                    blue rectangle wins until you edit the boxes again."],
        ],
        p![
            C!["selected-coords"],
            format!(
                "Selected: {} / {}",
                format_coord(model.selection.lat),
                format_coord(model.selection.lon)
            ),
        ],
        button![
            if model.pending {
                "Analyzing deforestation trends…"
            } else {
                "Analyze Deforestation"
            },
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::Analyze
            }),
            attrs! { At::Disabled => bool_attr(model.pending) },
        ],
    ]
}

fn view_result(model: &Model) -> Node<Msg> {
    if let Some(display) = &model.display {
        div![
            C!["result"],
            h2!["Deforestation Analysis"],
            p![C!["message"], &display.message],
            p![C!["percentage"], &display.percentage_text],
            if display.estimated {
                p![C!["estimate-badge"], "fallback estimate"]
            } else {
                empty![]
            },
        ]
    } else {
        div![
            C!["result"],
            h2!["Deforestation Analysis"],
            p!["Pick a location and press Analyze to see the trend."]
        ]
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    init_map();
    App::start("app", init, update, view);
}

fn sync_marker(coord: Coordinate) {
    if let Ok(value) = to_value(&coord) {
        update_marker_js(value);
    }
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

fn format_coord(value: f64) -> String {
    format!("{value:.2}")
}

#[derive(Deserialize)]
struct MapClickPayload {
    lat: f64,
    lon: f64,
}
